use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::StoreError;

/// The three persisted credential keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    Token,
    Role,
    OrgId,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 3] = [CredentialKey::Token, CredentialKey::Role, CredentialKey::OrgId];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::Token => "token",
            CredentialKey::Role => "role",
            CredentialKey::OrgId => "orgId",
        }
    }
}

/// Durable key-value storage for credentials
pub trait CredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: CredentialKey, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: CredentialKey) -> Result<(), StoreError>;
}

/// Process-local store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    values: BTreeMap<&'static str, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn set(&mut self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.as_str(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: CredentialKey) -> Result<(), StoreError> {
        self.values.remove(key.as_str());
        Ok(())
    }
}

/// JSON file store that survives restarts. Each write replaces the file
/// through a rename so a crash never leaves it half-written.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key.as_str()))
    }

    fn set(&mut self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        values.insert(key.as_str().to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&mut self, key: CredentialKey) -> Result<(), StoreError> {
        let mut values = self.load()?;
        if values.remove(key.as_str()).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("rentline_store_{}", uuid::Uuid::new_v4().simple()))
            .join("credentials.json")
    }

    #[test]
    fn test_memory_store_get_set_remove() {
        let mut store = MemoryCredentialStore::new();
        assert_eq!(store.get(CredentialKey::Token).unwrap(), None);
        store.set(CredentialKey::Token, "abc").unwrap();
        assert_eq!(store.get(CredentialKey::Token).unwrap().as_deref(), Some("abc"));
        store.remove(CredentialKey::Token).unwrap();
        assert_eq!(store.get(CredentialKey::Token).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_path();
        let mut store = FileCredentialStore::new(&path);
        store.set(CredentialKey::Role, "Manager").unwrap();
        store.set(CredentialKey::OrgId, "org-1").unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get(CredentialKey::Role).unwrap().as_deref(), Some("Manager"));
        assert_eq!(reopened.get(CredentialKey::OrgId).unwrap().as_deref(), Some("org-1"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"orgId\""));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let store = FileCredentialStore::new(temp_path());
        assert_eq!(store.get(CredentialKey::Token).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.get(CredentialKey::Token), Err(StoreError::Corrupt(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
