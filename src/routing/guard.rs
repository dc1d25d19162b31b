use serde::Serialize;

use super::table::{Access, RouteDescriptor};
use crate::auth::Credentials;
use crate::config;

/// Outcome of a navigation check. A redirect is normal control flow: the
/// router abandons the attempt and starts over at the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "camelCase")]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Fallback routes used by the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    pub login: String,
    pub default: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        let routes = &config::config().routes;
        Self {
            login: routes.login_path.clone(),
            default: routes.default_path.clone(),
        }
    }
}

/// Decide whether `credentials` may enter `route`, using the configured
/// login and default routes as redirect targets
pub fn authorize(route: &RouteDescriptor, credentials: &Credentials) -> Decision {
    authorize_with(route, credentials, &RedirectTargets::default())
}

/// Two-tier check: first "is there a token at all", then "does the role
/// satisfy this route's allow-list". Never touches the network.
pub fn authorize_with(route: &RouteDescriptor, credentials: &Credentials, targets: &RedirectTargets) -> Decision {
    match &route.access {
        Access::Public => Decision::Allow,
        _ if !credentials.is_authenticated() => Decision::RedirectTo(targets.login.clone()),
        Access::Authenticated => Decision::Allow,
        Access::Roles(allowed) => match credentials.role {
            Some(role) if allowed.contains(&role) => Decision::Allow,
            _ => Decision::RedirectTo(targets.default.clone()),
        },
    }
}
