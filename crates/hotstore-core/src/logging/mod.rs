//! Logging abstractions
//!
//! Reloading stores log through an injected `Logger`, which defaults to a
//! `FileLogger` adapter; registry and config code write to the global
//! `file_logger` directly.

mod traits;
mod adapters;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use adapters::{FileLogger, NoOpLogger};

pub use file_logger::{log_file_path, LogLevel};
