use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::RouteError;
use crate::auth::{Role, OWNER_ROLES, TENANT_ROLES};

/// Who may enter a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccessSpec", into = "AccessSpec")]
pub enum Access {
    /// Reachable without a token (login, registration)
    Public,
    /// Any role, as long as a token is present
    Authenticated,
    /// Only the listed roles
    Roles(Vec<Role>),
}

impl Access {
    pub fn roles(roles: &[Role]) -> Self {
        Access::Roles(roles.to_vec())
    }

    pub fn permits(&self, role: Role) -> bool {
        match self {
            Access::Public | Access::Authenticated => true,
            Access::Roles(roles) => roles.contains(&role),
        }
    }
}

/// Written form of [`Access`]: `public`, `any`, or a list of roles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AccessSpec {
    Keyword(String),
    Roles(Vec<Role>),
}

impl TryFrom<AccessSpec> for Access {
    type Error = String;

    fn try_from(raw: AccessSpec) -> Result<Self, Self::Error> {
        match raw {
            AccessSpec::Keyword(k) if k == "public" => Ok(Access::Public),
            AccessSpec::Keyword(k) if k == "any" => Ok(Access::Authenticated),
            AccessSpec::Keyword(k) => Err(format!("unknown access keyword '{}'", k)),
            AccessSpec::Roles(roles) if roles.is_empty() => Err("role list cannot be empty".to_string()),
            AccessSpec::Roles(roles) => Ok(Access::Roles(roles)),
        }
    }
}

impl From<Access> for AccessSpec {
    fn from(access: Access) -> Self {
        match access {
            Access::Public => AccessSpec::Keyword("public".to_string()),
            Access::Authenticated => AccessSpec::Keyword("any".to_string()),
            Access::Roles(roles) => AccessSpec::Roles(roles),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    /// Path pattern; `:name` segments match any single segment
    pub path: String,
    /// i18n key of the menu label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_key: Option<String>,
    pub access: Access,
    /// Listed in the sidebar
    #[serde(default)]
    pub menu: bool,
}

impl RouteDescriptor {
    pub fn new(path: &str, access: Access) -> Self {
        Self {
            path: path.to_string(),
            label_key: None,
            access,
            menu: false,
        }
    }

    pub fn menu_link(path: &str, label_key: &str, access: Access) -> Self {
        Self {
            path: path.to_string(),
            label_key: Some(label_key.to_string()),
            access,
            menu: true,
        }
    }

    fn is_pattern(&self) -> bool {
        self.path.split('/').any(|s| s.starts_with(':'))
    }

    pub fn matches_path(&self, path: &str) -> bool {
        let wanted: Vec<&str> = segments(&self.path).collect();
        let given: Vec<&str> = segments(path).collect();
        wanted.len() == given.len()
            && wanted
                .iter()
                .zip(&given)
                .all(|(w, g)| if w.starts_with(':') { !g.is_empty() } else { w == g })
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.split('/').filter(|s| !s.is_empty())
}

/// Static route table, defined once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let owners = || Access::roles(OWNER_ROLES);
        let owners_and_tenants = [OWNER_ROLES, TENANT_ROLES].concat();

        Self {
            routes: vec![
                RouteDescriptor::new("/login", Access::Public),
                RouteDescriptor::new("/register", Access::Public),
                RouteDescriptor::new("/accept-invite", Access::Public),
                RouteDescriptor::menu_link("/", "nav.dashboard", Access::Authenticated),
                RouteDescriptor::menu_link("/properties", "nav.properties", owners()),
                RouteDescriptor::new("/properties/:id", owners()),
                RouteDescriptor::new("/portfolio", owners()),
                RouteDescriptor::menu_link("/units", "nav.units", owners()),
                RouteDescriptor::menu_link("/leases", "nav.leases", Access::Roles(owners_and_tenants)),
                RouteDescriptor::menu_link("/maintenance", "nav.maintenance", Access::Authenticated),
                RouteDescriptor::menu_link("/tenants", "nav.tenants", owners()),
                RouteDescriptor::menu_link("/invites", "nav.invites", owners()),
                RouteDescriptor::menu_link("/settings", "nav.settings", Access::Authenticated),
                RouteDescriptor::new("/onboarding", Access::Authenticated),
            ],
        }
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(RouteError::InvalidTable(format!("path must start with '/': {}", route.path)));
            }
            if !seen.insert(route.path.as_str()) {
                return Err(RouteError::InvalidTable(format!("duplicate path: {}", route.path)));
            }
            if let Access::Roles(roles) = &route.access {
                if roles.is_empty() {
                    return Err(RouteError::InvalidTable(format!("empty role list: {}", route.path)));
                }
            }
        }
        Ok(Self { routes })
    }

    /// Parse a table from YAML: a list of `{ path, labelKey?, access, menu? }`
    pub fn from_yaml(yaml: &str) -> Result<Self, RouteError> {
        let routes: Vec<RouteDescriptor> = serde_yaml::from_str(yaml)?;
        Self::new(routes)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Route for a concrete path; literal routes win over patterns
    pub fn lookup(&self, path: &str) -> Option<&RouteDescriptor> {
        let mut candidates = self.routes.iter().filter(|r| r.matches_path(path));
        let first = candidates.next()?;
        if !first.is_pattern() {
            return Some(first);
        }
        candidates.find(|r| !r.is_pattern()).or(Some(first))
    }

    /// Sidebar links for a role. A missing role is treated as Viewer.
    pub fn visible_links(&self, role: Option<Role>) -> Vec<&RouteDescriptor> {
        let role = role.unwrap_or(Role::Viewer);
        self.routes
            .iter()
            .filter(|r| r.menu && r.access.permits(role))
            .collect()
    }
}
