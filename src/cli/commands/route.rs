use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_route_table, open_session};
use crate::cli::utils::output_table;
use crate::cli::OutputFormat;
use crate::error::ConsoleError;
use crate::routing::{Access, Decision, Navigator, RouteDescriptor};

#[derive(Subcommand)]
pub enum RouteCommands {
    #[command(about = "Check whether the stored session may open a path")]
    Check {
        #[arg(help = "Path, e.g. /units")]
        path: String,
        #[arg(long, help = "Follow redirects to the final page")]
        follow: bool,
        #[arg(long, help = "YAML route table to use instead of the built-in one")]
        routes: Option<PathBuf>,
    },

    #[command(about = "Print the route table")]
    Table {
        #[arg(long, help = "YAML route table to use instead of the built-in one")]
        routes: Option<PathBuf>,
    },
}

pub fn handle(cmd: RouteCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        RouteCommands::Check { path, follow, routes } => {
            let table = load_route_table(routes.as_deref())?;
            let credentials = open_session()?.credentials().map_err(ConsoleError::from)?;
            let navigator = Navigator::new(&table);

            if follow {
                let navigation = navigator.navigate(&path, &credentials).map_err(ConsoleError::from)?;
                match output_format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&navigation)?),
                    OutputFormat::Text => {
                        for hop in &navigation.redirects {
                            println!("→ redirected to {}", hop);
                        }
                        println!("Opened {}", navigation.resolved);
                    }
                }
                return Ok(());
            }

            let decision = navigator.check(&path, &credentials).map_err(ConsoleError::from)?;
            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "path": path, "result": decision }))?
                ),
                OutputFormat::Text => match decision {
                    Decision::Allow => println!("Allow {}", path),
                    Decision::RedirectTo(target) => println!("Redirect {} → {}", path, target),
                },
            }
            Ok(())
        }
        RouteCommands::Table { routes } => {
            let table = load_route_table(routes.as_deref())?;
            let rows: Vec<Vec<String>> = table.routes().iter().map(route_row).collect();
            output_table(
                &output_format,
                "routes",
                serde_json::to_value(table.routes())?,
                &["Path", "Access", "Menu"],
                &rows,
            )
        }
    }
}

/// Print the sidebar links the stored role may see
pub fn handle_nav(output_format: OutputFormat) -> anyhow::Result<()> {
    let table = load_route_table(None)?;
    let credentials = open_session()?.credentials().map_err(ConsoleError::from)?;
    let links = table.visible_links(credentials.role);

    let rows: Vec<Vec<String>> = links
        .iter()
        .map(|r| vec![r.label_key.clone().unwrap_or_default(), r.path.clone()])
        .collect();
    output_table(&output_format, "links", serde_json::to_value(&links)?, &["Label", "Path"], &rows)
}

fn route_row(route: &RouteDescriptor) -> Vec<String> {
    let access = match &route.access {
        Access::Public => "public".to_string(),
        Access::Authenticated => "any".to_string(),
        Access::Roles(roles) => roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(","),
    };
    vec![route.path.clone(), access, if route.menu { "yes" } else { "" }.to_string()]
}
