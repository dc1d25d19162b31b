pub mod error;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};

pub use error::StoreError;
pub use session::Session;
pub use store::{CredentialKey, CredentialStore, FileCredentialStore, MemoryCredentialStore};

/// Closed set of roles a console user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Landlord,
    AgencyAdmin,
    Manager,
    Maintenance,
    Tenant,
    Viewer,
}

/// Roles that own or manage property
pub const OWNER_ROLES: &[Role] = &[Role::Landlord, Role::AgencyAdmin, Role::Manager];

pub const TENANT_ROLES: &[Role] = &[Role::Tenant];

/// Roles an owner may hand out through an invitation
pub const INVITABLE_ROLES: &[Role] = &[Role::Tenant, Role::Maintenance, Role::Viewer];

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Landlord,
        Role::AgencyAdmin,
        Role::Manager,
        Role::Maintenance,
        Role::Tenant,
        Role::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Landlord => "Landlord",
            Role::AgencyAdmin => "AgencyAdmin",
            Role::Manager => "Manager",
            Role::Maintenance => "Maintenance",
            Role::Tenant => "Tenant",
            Role::Viewer => "Viewer",
        }
    }

    pub fn is_owner(&self) -> bool {
        OWNER_ROLES.contains(self)
    }

    pub fn can_edit_maintenance_status(&self) -> bool {
        self.is_owner() || *self == Role::Maintenance
    }

    /// Only tenants file new maintenance tickets
    pub fn can_report_maintenance(&self) -> bool {
        *self == Role::Tenant
    }

    pub fn is_invitable(&self) -> bool {
        INVITABLE_ROLES.contains(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl std::fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Locally persisted authentication state. Expiry is enforced by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<String>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, role: Role, organization_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
            organization_id: Some(organization_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("landlord".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Manager.can_edit_maintenance_status());
        assert!(Role::Maintenance.can_edit_maintenance_status());
        assert!(!Role::Tenant.can_edit_maintenance_status());
        assert!(Role::Tenant.can_report_maintenance());
        assert!(!Role::Landlord.can_report_maintenance());
        assert!(Role::Viewer.is_invitable());
        assert!(!Role::AgencyAdmin.is_invitable());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let creds = Credentials {
            token: Some(String::new()),
            role: Some(Role::Landlord),
            organization_id: None,
        };
        assert!(!creds.is_authenticated());
        assert!(Credentials::new("t", Role::Viewer, "o").is_authenticated());
    }
}
