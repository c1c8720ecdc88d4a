//! Store engines: turning a byte stream and a password into a credential store
//!
//! This module provides:
//! - `StoreEngine` trait for plugging in store formats
//! - Built-in `DocumentEngine` for YAML and JSON credential documents
//! - A registry for resolving engines by id and provider

mod traits;
mod document;
mod registry;

pub use traits::{LoadError, LoadResult, StoreEngine};
pub use document::{
    password_digest, DocumentEngine, DocumentEntry, DocumentFormat, StoreDocument, BUILTIN_PROVIDER,
};
pub use registry::{
    has_store_engine, list_store_engines, open_store_engine, register_store_engine,
    unregister_store_engine, EngineDefinition, EngineFactory,
};
