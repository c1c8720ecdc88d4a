//! Credential store abstractions
//!
//! This module provides:
//! - `CredentialStore` trait: the operations every store (and every wrapper) serves
//! - `StoreEntry` / `EntryKind`: what lives under an alias
//! - `DocumentStore`: the in-memory instance built by the document engines

mod traits;
mod document;

pub use traits::{CredentialStore, EntryKind, StoreEntry, StoreError, StoreResult};
pub use document::DocumentStore;
