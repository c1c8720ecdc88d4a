//! Swappable handle to the active credential store instance

use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::store::{CredentialStore, StoreEntry, StoreError, StoreResult};

/// Holds the store instance that currently serves all operations
///
/// The target can be replaced at any time with `set`. Callers that already
/// obtained the old instance keep using it until their call finishes; every
/// `get` issued after `set` returns sees the new one.
///
/// The holder itself implements `CredentialStore` by forwarding each call to
/// the current target.
pub struct DelegateHolder {
    name: String,
    current: RwLock<Option<Arc<dyn CredentialStore>>>,
}

impl DelegateHolder {
    /// Create a holder serving `instance`
    pub fn new(instance: Arc<dyn CredentialStore>) -> Self {
        Self {
            name: instance.name().to_string(),
            current: RwLock::new(Some(instance)),
        }
    }

    /// Create a holder with no target yet
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: RwLock::new(None),
        }
    }

    /// Get the current instance
    ///
    /// Fails with `StoreError::NotLoaded` only if nothing was ever set.
    pub fn get(&self) -> StoreResult<Arc<dyn CredentialStore>> {
        self.current.read().clone().ok_or(StoreError::NotLoaded)
    }

    /// Replace the current instance, returning the previous one
    pub fn set(&self, instance: Arc<dyn CredentialStore>) -> Option<Arc<dyn CredentialStore>> {
        self.current.write().replace(instance)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}

impl std::fmt::Debug for DelegateHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateHolder")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl CredentialStore for DelegateHolder {
    fn name(&self) -> &str {
        &self.name
    }

    fn entry(&self, alias: &str) -> StoreResult<Option<StoreEntry>> {
        self.get()?.entry(alias)
    }

    fn aliases(&self) -> StoreResult<Vec<String>> {
        self.get()?.aliases()
    }

    fn set_entry(&self, alias: &str, entry: StoreEntry) -> StoreResult<()> {
        self.get()?.set_entry(alias, entry)
    }

    fn delete_entry(&self, alias: &str) -> StoreResult<()> {
        self.get()?.delete_entry(alias)
    }

    fn contains_alias(&self, alias: &str) -> StoreResult<bool> {
        self.get()?.contains_alias(alias)
    }

    fn size(&self) -> StoreResult<usize> {
        self.get()?.size()
    }

    fn creation_date(&self, alias: &str) -> StoreResult<Option<SystemTime>> {
        self.get()?.creation_date(alias)
    }

    fn is_key_entry(&self, alias: &str) -> StoreResult<bool> {
        self.get()?.is_key_entry(alias)
    }

    fn is_certificate_entry(&self, alias: &str) -> StoreResult<bool> {
        self.get()?.is_certificate_entry(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, EntryKind};

    fn store_with(name: &str, alias: &str) -> Arc<dyn CredentialStore> {
        let store = DocumentStore::new(name);
        store
            .set_entry(alias, StoreEntry::new(EntryKind::Certificate, alias))
            .unwrap();
        Arc::new(store)
    }

    #[test]
    fn test_empty_holder() {
        let holder = DelegateHolder::empty("yaml");
        assert!(!holder.is_loaded());
        assert!(matches!(holder.get(), Err(StoreError::NotLoaded)));
        assert!(matches!(holder.aliases(), Err(StoreError::NotLoaded)));
        assert_eq!(holder.name(), "yaml");
    }

    #[test]
    fn test_forwarding() {
        let holder = DelegateHolder::new(store_with("yaml", "server"));
        assert!(holder.is_loaded());
        assert_eq!(holder.name(), "yaml");
        assert_eq!(holder.aliases().unwrap(), vec!["server".to_string()]);
        assert!(holder.is_certificate_entry("server").unwrap());
        assert!(!holder.is_key_entry("server").unwrap());
        assert_eq!(holder.size().unwrap(), 1);

        holder
            .set_entry("client", StoreEntry::new(EntryKind::PrivateKey, "key"))
            .unwrap();
        assert!(holder.contains_alias("client").unwrap());
        holder.delete_entry("client").unwrap();
        assert!(!holder.contains_alias("client").unwrap());
    }

    #[test]
    fn test_set_replaces_target() {
        let holder = DelegateHolder::empty("yaml");
        assert!(holder.set(store_with("yaml", "old")).is_none());

        let previous = holder.set(store_with("yaml", "new")).unwrap();
        assert!(previous.contains_alias("old").unwrap());
        assert!(holder.contains_alias("new").unwrap());
        assert!(!holder.contains_alias("old").unwrap());
    }

    #[test]
    fn test_concurrent_get_and_set() {
        use std::thread;

        let holder = Arc::new(DelegateHolder::new(store_with("yaml", "a")));
        let mut handles = vec![];

        for i in 0..8 {
            let holder = Arc::clone(&holder);
            handles.push(thread::spawn(move || {
                for _ in 0..200 {
                    if i % 2 == 0 {
                        let alias = if i % 4 == 0 { "a" } else { "b" };
                        holder.set(store_with("yaml", alias));
                    } else {
                        // Every reader sees a whole instance: exactly one alias
                        let aliases = holder.get().unwrap().aliases().unwrap();
                        assert_eq!(aliases.len(), 1);
                        assert!(aliases[0] == "a" || aliases[0] == "b");
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
