use serde::Serialize;

use super::error::RouteError;
use super::guard::{authorize_with, Decision, RedirectTargets};
use super::table::{RouteDescriptor, RouteTable};
use crate::auth::Credentials;
use crate::config;

/// Where a navigation attempt ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub requested: String,
    pub resolved: String,
    pub route: RouteDescriptor,
    /// Redirect targets followed, in order
    pub redirects: Vec<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Runs the guard for each navigation attempt and follows redirects
pub struct Navigator<'t> {
    table: &'t RouteTable,
    targets: RedirectTargets,
    max_redirects: usize,
}

impl<'t> Navigator<'t> {
    pub fn new(table: &'t RouteTable) -> Self {
        Self {
            table,
            targets: RedirectTargets::default(),
            max_redirects: config::config().routes.max_redirects,
        }
    }

    pub fn with_targets(mut self, targets: RedirectTargets) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Check a single path without following redirects
    pub fn check(&self, path: &str, credentials: &Credentials) -> Result<Decision, RouteError> {
        let route = self
            .table
            .lookup(path)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        Ok(authorize_with(route, credentials, &self.targets))
    }

    /// Navigate to `path`, restarting at each redirect target until a route
    /// admits the user
    pub fn navigate(&self, path: &str, credentials: &Credentials) -> Result<Navigation, RouteError> {
        let mut current = path.to_string();
        let mut redirects: Vec<String> = vec![];

        loop {
            let route = self
                .table
                .lookup(&current)
                .ok_or_else(|| RouteError::NotFound(current.clone()))?;

            match authorize_with(route, credentials, &self.targets) {
                Decision::Allow => {
                    tracing::debug!("Navigation to {} allowed via {}", current, route.path);
                    return Ok(Navigation {
                        requested: path.to_string(),
                        resolved: current,
                        route: route.clone(),
                        redirects,
                    });
                }
                Decision::RedirectTo(target) => {
                    tracing::warn!("Navigation to {} redirected to {}", current, target);
                    if redirects.len() >= self.max_redirects || target == current || redirects.contains(&target) {
                        return Err(RouteError::RedirectLoop {
                            path: path.to_string(),
                            hops: redirects.len(),
                        });
                    }
                    redirects.push(target.clone());
                    current = target;
                }
            }
        }
    }
}
