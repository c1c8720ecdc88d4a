//! Configuration of reloading stores
//!
//! Stores are declared in a YAML or JSON file and opened by name.

mod file;

pub use file::{PasswordSource, StoreConfig, StoreConfigFile};
