//! In-memory credential store produced by the document engines

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::traits::{CredentialStore, StoreEntry, StoreResult};

/// In-memory credential store
///
/// This is the instance type the built-in document engines hand out after
/// parsing a file. It is fully read-write, but writes only live in memory:
/// the next reload from disk replaces the whole instance.
///
/// # Thread Safety
///
/// The store uses `RwLock` internally and is safe to use from multiple threads.
///
/// # Example
///
/// ```
/// use hotstore_core::store::{CredentialStore, DocumentStore, EntryKind, StoreEntry};
///
/// let store = DocumentStore::new("yaml");
/// store.set_entry("ca", StoreEntry::new(EntryKind::Certificate, "pem")).unwrap();
/// assert_eq!(store.aliases().unwrap(), vec!["ca".to_string()]);
/// ```
#[derive(Debug)]
pub struct DocumentStore {
    name: String,
    entries: RwLock<BTreeMap<String, StoreEntry>>,
}

impl DocumentStore {
    /// Create a new empty store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store with initial entries
    pub fn with_entries(name: impl Into<String>, entries: BTreeMap<String, StoreEntry>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(entries),
        }
    }

    /// Get the number of entries in the store
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for DocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn entry(&self, alias: &str) -> StoreResult<Option<StoreEntry>> {
        Ok(self.entries.read().get(alias).cloned())
    }

    fn aliases(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn set_entry(&self, alias: &str, entry: StoreEntry) -> StoreResult<()> {
        self.entries.write().insert(alias.to_string(), entry);
        Ok(())
    }

    fn delete_entry(&self, alias: &str) -> StoreResult<()> {
        self.entries.write().remove(alias);
        Ok(())
    }

    fn contains_alias(&self, alias: &str) -> StoreResult<bool> {
        Ok(self.entries.read().contains_key(alias))
    }

    fn size(&self) -> StoreResult<usize> {
        Ok(self.len())
    }
}
