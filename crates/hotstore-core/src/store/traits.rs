//! Core traits and types for credential stores

use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::LoadError;

/// Kind of material held under an alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A private key, usually with its certificate chain
    PrivateKey,
    /// A trusted certificate
    Certificate,
    /// An opaque secret (symmetric key, token, ...)
    Secret,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::PrivateKey => "private_key",
            EntryKind::Certificate => "certificate",
            EntryKind::Secret => "secret",
        }
    }
}

/// A single entry in a credential store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// What kind of material this is
    pub kind: EntryKind,
    /// When the entry was created
    pub created: SystemTime,
    /// Opaque material (e.g. PEM text); never interpreted by this crate
    pub material: String,
}

impl StoreEntry {
    pub fn new(kind: EntryKind, material: impl Into<String>) -> Self {
        Self {
            kind,
            created: SystemTime::now(),
            material: material.into(),
        }
    }

    /// Set the creation time
    pub fn with_created(mut self, created: SystemTime) -> Self {
        self.created = created;
        self
    }
}

/// Errors that can occur during credential store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load store from {}: {source}", path.display())]
    StoreLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Store is not loaded")]
    NotLoaded,

    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Create a file access error for `path`
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a store load error for `path`
    pub fn store_load(path: impl Into<PathBuf>, source: LoadError) -> Self {
        Self::StoreLoad {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for credential store implementations
///
/// A credential store is a container of keys and certificates addressed by
/// alias. Implementations can be:
/// - Documents parsed by a store engine (`DocumentStore`)
/// - The delegate holder, which forwards to whatever instance it holds
/// - The hot-reloading façade (`ReloadingStore`)
///
/// Every operation returns a `StoreResult` so that wrappers can surface
/// failures (such as a failed reload) from the operation that hit them.
///
/// # Example
///
/// ```
/// use hotstore_core::store::{CredentialStore, DocumentStore, EntryKind, StoreEntry};
///
/// let store = DocumentStore::new("yaml");
/// store.set_entry("server", StoreEntry::new(EntryKind::Certificate, "-----BEGIN CERTIFICATE-----")).unwrap();
/// assert!(store.is_certificate_entry("server").unwrap());
/// ```
pub trait CredentialStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Look up an entry by alias
    fn entry(&self, alias: &str) -> StoreResult<Option<StoreEntry>>;

    /// List all aliases in the store
    fn aliases(&self) -> StoreResult<Vec<String>>;

    /// Add or replace an entry
    fn set_entry(&self, alias: &str, entry: StoreEntry) -> StoreResult<()>;

    /// Delete an entry. Deleting an absent alias is not an error.
    fn delete_entry(&self, alias: &str) -> StoreResult<()>;

    /// Check if an alias exists
    fn contains_alias(&self, alias: &str) -> StoreResult<bool> {
        Ok(self.entry(alias)?.is_some())
    }

    /// Number of entries in the store
    fn size(&self) -> StoreResult<usize> {
        Ok(self.aliases()?.len())
    }

    /// Creation date of the entry under `alias`
    fn creation_date(&self, alias: &str) -> StoreResult<Option<SystemTime>> {
        Ok(self.entry(alias)?.map(|e| e.created))
    }

    /// Whether `alias` holds a private key
    fn is_key_entry(&self, alias: &str) -> StoreResult<bool> {
        Ok(matches!(self.entry(alias)?, Some(e) if e.kind == EntryKind::PrivateKey))
    }

    /// Whether `alias` holds a trusted certificate
    fn is_certificate_entry(&self, alias: &str) -> StoreResult<bool> {
        Ok(matches!(self.entry(alias)?, Some(e) if e.kind == EntryKind::Certificate))
    }
}
