use super::error::StoreError;
use super::store::{CredentialKey, CredentialStore};
use super::{Credentials, Role};
use crate::config;
use crate::routing::Decision;
use crate::types::AuthResponse;

/// HTTP status that invalidates the local session
pub const UNAUTHORIZED: u16 = 401;

/// Login, logout and invalidation over a credential store. Writes happen
/// only through these methods.
#[derive(Debug)]
pub struct Session<S: CredentialStore> {
    store: S,
}

impl<S: CredentialStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the stored session. The token is written last, so a failed
    /// write reads as signed out rather than a token paired with a stale role.
    pub fn persist(&mut self, token: &str, role: Role, organization_id: &str) -> Result<(), StoreError> {
        self.clear()?;
        self.store.set(CredentialKey::Role, role.as_str())?;
        self.store.set(CredentialKey::OrgId, organization_id)?;
        self.store.set(CredentialKey::Token, token)?;
        tracing::info!("Stored session for role {} in organization {}", role, organization_id);
        Ok(())
    }

    /// Store the result of login, organization registration or invite
    /// acceptance. Overwrites any previous role.
    pub fn login(&mut self, response: &AuthResponse) -> Result<(), StoreError> {
        self.persist(&response.token, response.role, &response.org_id)
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.clear()?;
        tracing::info!("Session cleared by logout");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        for key in CredentialKey::ALL {
            self.store.remove(key)?;
        }
        Ok(())
    }

    pub fn credentials(&self) -> Result<Credentials, StoreError> {
        let token = self.store.get(CredentialKey::Token)?;
        let role = match self.store.get(CredentialKey::Role)? {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!("Ignoring stored role: {}", e);
                    None
                }
            },
            None => None,
        };
        let organization_id = self.store.get(CredentialKey::OrgId)?;

        Ok(Credentials { token, role, organization_id })
    }

    /// React to an API response status. An unauthorized response clears the
    /// session and sends the user to the login route.
    pub fn handle_status(&mut self, status: u16) -> Result<Option<Decision>, StoreError> {
        if status != UNAUTHORIZED {
            return Ok(None);
        }

        self.clear()?;
        let login = &config::config().routes.login_path;
        if config::config().security.audit_logging {
            tracing::warn!("Unauthorized response, session invalidated; redirecting to {}", login);
        }
        Ok(Some(Decision::RedirectTo(login.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;

    #[test]
    fn test_login_then_credentials() {
        let mut session = Session::new(MemoryCredentialStore::new());
        session
            .login(&AuthResponse {
                token: "jwt".to_string(),
                role: Role::Tenant,
                org_id: "org".to_string(),
            })
            .unwrap();

        let creds = session.credentials().unwrap();
        assert_eq!(creds, Credentials::new("jwt", Role::Tenant, "org"));
    }

    #[test]
    fn test_logout_clears_every_key() {
        let mut session = Session::new(MemoryCredentialStore::new());
        session.persist("jwt", Role::Landlord, "org").unwrap();
        session.logout().unwrap();
        assert_eq!(session.credentials().unwrap(), Credentials::anonymous());
    }

    #[test]
    fn test_unknown_stored_role_reads_as_none() {
        let mut store = MemoryCredentialStore::new();
        store.set(CredentialKey::Token, "jwt").unwrap();
        store.set(CredentialKey::Role, "Overlord").unwrap();

        let creds = Session::new(store).credentials().unwrap();
        assert!(creds.is_authenticated());
        assert_eq!(creds.role, None);
    }

    /// Memory store that fails writes to one key
    struct FailingStore {
        inner: MemoryCredentialStore,
        fail_on: Option<CredentialKey>,
    }

    impl CredentialStore for FailingStore {
        fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
            if self.fail_on == Some(key) {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: CredentialKey) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_persist_reads_as_signed_out() {
        let mut session = Session::new(FailingStore {
            inner: MemoryCredentialStore::new(),
            fail_on: None,
        });
        session.persist("old", Role::Landlord, "org-a").unwrap();

        session.store.fail_on = Some(CredentialKey::OrgId);
        assert!(session.persist("new", Role::Tenant, "org-b").is_err());

        let creds = session.credentials().unwrap();
        assert!(!creds.is_authenticated());
        assert_ne!(creds.role, Some(Role::Landlord));
    }

    #[test]
    fn test_unauthorized_status_invalidates() {
        let mut session = Session::new(MemoryCredentialStore::new());
        session.persist("jwt", Role::Manager, "org").unwrap();

        assert_eq!(session.handle_status(200).unwrap(), None);
        assert!(session.credentials().unwrap().is_authenticated());

        let decision = session.handle_status(401).unwrap();
        assert_eq!(decision, Some(Decision::RedirectTo(config::config().routes.login_path.clone())));
        assert_eq!(session.credentials().unwrap(), Credentials::anonymous());
    }
}
