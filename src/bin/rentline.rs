use clap::Parser;
use rentline_console::cli::utils::output_error;
use rentline_console::cli::{Cli, OutputFormat};
use rentline_console::error::ConsoleError;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let default_level = if rentline_console::is_development!() { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = rentline_console::cli::run(cli) {
        let (code, exit_code) = match e.downcast_ref::<ConsoleError>() {
            Some(console) => (Some(console.error_code()), console.exit_code()),
            None => (None, 1),
        };

        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => output_error(&output_format, &e.to_string(), code)?,
        }
        std::process::exit(exit_code);
    }

    Ok(())
}
