use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use crate::auth::{CredentialStore, Role, Session};
use crate::cli::config::{load_json, open_session};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::error::ConsoleError;
use crate::routing::Decision;
use crate::types::AuthResponse;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Store the session returned by login, registration or invite acceptance")]
    Login {
        #[arg(long, help = "Bearer token")]
        token: Option<String>,
        #[arg(long, help = "Role (Landlord, AgencyAdmin, Manager, Maintenance, Tenant, Viewer)")]
        role: Option<Role>,
        #[arg(long, help = "Organization id")]
        org: Option<String>,
        #[arg(long, conflicts_with_all = ["token", "role", "org"], help = "JSON file holding { token, role, orgId }")]
        response: Option<PathBuf>,
    },

    #[command(about = "Clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Apply an API response status to the session (401 clears it)")]
    HandleStatus {
        #[arg(help = "HTTP status code")]
        status: u16,
    },
}

pub fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = open_session()?;

    match cmd {
        AuthCommands::Login { token, role, org, response } => {
            let response = match response {
                Some(path) => load_json::<AuthResponse>(&path)?,
                None => login_from_flags(token, role, org)?,
            };
            session.login(&response).map_err(ConsoleError::from)?;
            output_success(
                &output_format,
                &format!("Logged in as {} in organization {}", response.role, response.org_id),
                Some(json!({ "role": response.role, "orgId": response.org_id })),
            )
        }
        AuthCommands::Logout => {
            session.logout().map_err(ConsoleError::from)?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => status(&session, &output_format),
        AuthCommands::HandleStatus { status } => {
            match session.handle_status(status).map_err(ConsoleError::from)? {
                Some(Decision::RedirectTo(target)) => output_success(
                    &output_format,
                    &format!("Session invalidated; redirect to {}", target),
                    Some(json!({ "redirect": target })),
                ),
                _ => output_success(&output_format, &format!("Status {} leaves the session unchanged", status), None),
            }
        }
    }
}

fn login_from_flags(token: Option<String>, role: Option<Role>, org: Option<String>) -> Result<AuthResponse, ConsoleError> {
    match (token, role, org) {
        (Some(token), Some(role), Some(org_id)) if !token.trim().is_empty() => Ok(AuthResponse { token, role, org_id }),
        _ => Err(ConsoleError::invalid_input("login requires --token, --role and --org, or --response <file>")),
    }
}

fn status<S: CredentialStore>(session: &Session<S>, output_format: &OutputFormat) -> anyhow::Result<()> {
    let creds = session.credentials().map_err(ConsoleError::from)?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "authenticated": creds.is_authenticated(),
                "role": creds.role,
                "organizationId": creds.organization_id,
            }))?);
        }
        OutputFormat::Text => {
            if creds.is_authenticated() {
                println!("Authenticated");
                println!("Role: {}", creds.role.map(|r| r.to_string()).unwrap_or_else(|| "(none)".to_string()));
                println!("Organization: {}", creds.organization_id.as_deref().unwrap_or("(none)"));
            } else {
                println!("Not authenticated");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_from_flags_requires_all_three() {
        assert!(login_from_flags(Some("t".into()), Some(Role::Viewer), None).is_err());
        assert!(login_from_flags(Some("  ".into()), Some(Role::Viewer), Some("o".into())).is_err());

        let res = login_from_flags(Some("t".into()), Some(Role::Viewer), Some("o".into())).unwrap();
        assert_eq!(res.role, Role::Viewer);
    }
}
