//! Store engine trait and load errors

use std::io::Read;

use thiserror::Error;

use crate::store::CredentialStore;

/// Errors an engine can report while turning bytes into a store
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported store engine: {0}")]
    UnsupportedEngine(String),

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    #[error("Wrong password or failed integrity check")]
    WrongPassword,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// A store engine parses one on-disk format into a `CredentialStore`
///
/// Engines are opaque to the reload machinery: it only hands them a byte
/// stream and the password, and swaps in whatever they return.
///
/// Implementations can be:
/// - The built-in `DocumentEngine` (YAML / JSON documents)
/// - Custom engines registered with `register_store_engine` (PKCS#12, HSM-backed, ...)
pub trait StoreEngine: Send + Sync {
    /// Engine identifier, e.g. "yaml"
    fn id(&self) -> &str;

    /// Provider that implements this engine, e.g. "builtin"
    fn provider(&self) -> &str;

    /// Build a new store instance from `reader`, unlocking it with `password`
    fn load(&self, reader: &mut dyn Read, password: &[u8]) -> LoadResult<Box<dyn CredentialStore>>;
}
