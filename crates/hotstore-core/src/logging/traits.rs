//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction injected into reloading stores
///
/// Implementations:
/// - `FileLogger`: forwards to the global file logger (the default)
/// - `NoOpLogger`: discards everything
/// - Host adapters: forward to the embedding application's logging
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;
