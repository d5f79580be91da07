//! In-memory credential store.
//!
//! Reference implementation of the `CredentialStore` port for tests, demos
//! and deployments that load callers from configuration at startup.

use crate::domain::credential::CallerCredential;
use crate::ports::outbound::CredentialStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Thread-safe map of app id to credential.
///
/// Credentials are immutable once stored; updates replace the whole entry so
/// a verifier holding the previous `Arc` keeps a consistent view.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Arc<CallerCredential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of credentials.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let credentials: Vec<CallerCredential> = serde_json::from_str(content)?;
        Ok(credentials.into_iter().collect())
    }

    /// Insert or replace a credential, returning the previous one.
    pub fn insert(&self, credential: CallerCredential) -> Option<Arc<CallerCredential>> {
        self.credentials
            .write()
            .insert(credential.app_id.clone(), Arc::new(credential))
    }

    pub fn remove(&self, app_id: &str) -> Option<Arc<CallerCredential>> {
        self.credentials.write().remove(app_id)
    }

    /// Flip the active flag. Returns false if the app id is unknown.
    pub fn set_active(&self, app_id: &str, active: bool) -> bool {
        let mut credentials = self.credentials.write();
        match credentials.get_mut(app_id) {
            Some(entry) => {
                let mut updated = CallerCredential::clone(entry);
                updated.active = active;
                *entry = Arc::new(updated);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.credentials.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.read().is_empty()
    }
}

impl FromIterator<CallerCredential> for InMemoryCredentialStore {
    fn from_iter<I: IntoIterator<Item = CallerCredential>>(iter: I) -> Self {
        let store = Self::new();
        for credential in iter {
            store.insert(credential);
        }
        store
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_active_credential(&self, app_id: &str) -> Option<Arc<CallerCredential>> {
        self.credentials
            .read()
            .get(app_id)
            .filter(|c| c.active)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_active_credential() {
        let store = InMemoryCredentialStore::new();
        store.insert(CallerCredential::new("app123", "secret"));

        let found = store.find_active_credential("app123").unwrap();
        assert_eq!(found.app_id, "app123");
        assert!(store.find_active_credential("other").is_none());
    }

    #[test]
    fn test_inactive_credential_is_hidden() {
        let store: InMemoryCredentialStore =
            [CallerCredential::new("app123", "secret").inactive()]
                .into_iter()
                .collect();

        assert!(store.find_active_credential("app123").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_active_replaces_entry() {
        let store = InMemoryCredentialStore::new();
        store.insert(CallerCredential::new("app123", "secret"));
        let before = store.find_active_credential("app123").unwrap();

        assert!(store.set_active("app123", false));
        assert!(store.find_active_credential("app123").is_none());
        // The handle taken earlier is unchanged
        assert!(before.active);

        assert!(store.set_active("app123", true));
        assert!(store.find_active_credential("app123").is_some());
        assert!(!store.set_active("missing", true));
    }

    #[test]
    fn test_lookup_returns_shared_handle() {
        let store = InMemoryCredentialStore::new();
        store.insert(CallerCredential::new("app123", "secret"));

        let a = store.find_active_credential("app123").unwrap();
        let b = store.find_active_credential("app123").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_from_json() {
        let store = InMemoryCredentialStore::from_json(
            r#"[
                { "app_id": "a", "app_secret": "sa", "sign_timeout_second": 60 },
                { "app_id": "b", "app_secret": "sb", "active": false }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            store.find_active_credential("a").unwrap().sign_timeout_second,
            Some(60)
        );
        assert!(store.find_active_credential("b").is_none());
    }

    #[test]
    fn test_remove() {
        let store = InMemoryCredentialStore::new();
        store.insert(CallerCredential::new("app123", "secret"));
        assert!(store.remove("app123").is_some());
        assert!(store.is_empty());
    }
}
