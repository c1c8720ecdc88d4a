//! `Logger` implementations shipped with the crate

use super::file_logger;
use super::traits::Logger;

/// Routes injected-logger calls to the global file logger under a fixed module tag
///
/// This is what reloading stores log through unless a host supplies its own
/// logger, so reload activity lands in the same file as registry and config
/// messages when `HOTSTORE_DEBUG` is set.
#[derive(Debug, Clone)]
pub struct FileLogger {
    module: String,
}

impl FileLogger {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new("ReloadController")
    }
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        file_logger::debug(&self.module, message);
    }

    fn info(&self, message: &str) {
        file_logger::info(&self.module, message);
    }

    fn warn(&self, message: &str) {
        file_logger::warn(&self.module, message);
    }

    fn error(&self, message: &str) {
        file_logger::error(&self.module, message);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub const fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::SharedLogger;
    use std::sync::Arc;

    #[test]
    fn test_file_logger_module_tag() {
        assert_eq!(FileLogger::default().module(), "ReloadController");
        assert_eq!(FileLogger::new("tls-store").module(), "tls-store");
    }

    #[test]
    fn test_adapters_as_shared_loggers() {
        let loggers: Vec<SharedLogger> = vec![
            Arc::new(FileLogger::new("test")),
            Arc::new(NoOpLogger::new()),
        ];
        for logger in &loggers {
            logger.debug("reloading");
            logger.info("reloaded");
            logger.warn("keeping previous store");
            logger.error("failed");
        }
    }
}
