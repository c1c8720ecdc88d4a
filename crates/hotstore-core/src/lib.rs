//! Hotstore Core
//!
//! A credential store that follows its backing file on disk. Long-running
//! services keep one `ReloadingStore` and get rotated keys and certificates
//! (e.g. written by a certificate-management sidecar) on the next access,
//! without a restart.
//!
//! ## How it works
//!
//! Every store operation first reconciles: the file's modification time is
//! compared with the one recorded at the last load, and if the file is newer
//! a fresh instance is loaded through the configured store engine and swapped
//! in. A failed reload never discards the last good instance.
//!
//! ```rust,no_run
//! use hotstore_core::{CredentialStore, Password, ReloadingStore};
//!
//! let store = ReloadingStore::open("yaml", None, "/etc/tls/keystore.yaml", Some(Password::from("changeit")))?;
//! if let Some(entry) = store.entry("server")? {
//!     println!("{} created {:?}", entry.kind.as_str(), entry.created);
//! }
//! # Ok::<(), hotstore_core::StoreError>(())
//! ```
//!
//! Store formats are pluggable through `engine::StoreEngine`; YAML and JSON
//! document engines are built in.

pub mod store;
pub mod engine;
pub mod reload;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use store::{CredentialStore, DocumentStore, EntryKind, StoreEntry, StoreError, StoreResult};

pub use engine::{
    StoreEngine, LoadError, LoadResult, DocumentEngine, DocumentFormat, StoreDocument,
    register_store_engine, open_store_engine, list_store_engines,
};

pub use reload::{
    Password, StoreSource, FileSource, DelegateHolder,
    ReloadController, ReloadOptions, StalenessPolicy, ReloadingStore,
};

pub use config::{StoreConfig, StoreConfigFile, PasswordSource};

pub use logging::{Logger, SharedLogger, FileLogger, NoOpLogger};
