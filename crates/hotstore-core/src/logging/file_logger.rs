//! File-based debug logger for troubleshooting
//!
//! Provides a global logger that writes to a file. Useful when the host
//! process swallows stderr (sidecars, service managers).
//!
//! Controlled by environment variables, read once on first use:
//! - `HOTSTORE_DEBUG=1|true` enables it
//! - `HOTSTORE_LOG_LEVEL=debug|info|warn|error` sets the threshold
//! - `HOTSTORE_LOG_FILE=/path` overrides the default `$TMPDIR/hotstore-debug.log`

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::SystemTime;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Parse a level name, falling back to `Debug`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Debug,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Global file logger configuration and state
struct FileLoggerState {
    file: Option<File>,
    min_level: LogLevel,
}

impl FileLoggerState {
    fn new() -> Self {
        let enabled = std::env::var("HOTSTORE_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let min_level = std::env::var("HOTSTORE_LOG_LEVEL")
            .map(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        // Only touch the filesystem when enabled
        let file = if enabled {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file_path())
                .ok()
        } else {
            None
        };

        Self { file, min_level }
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }

        if let Some(ref mut file) = self.file {
            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| {
                    let secs = d.as_secs();
                    let millis = d.subsec_millis();
                    let hours = (secs % 86400) / 3600;
                    let mins = (secs % 3600) / 60;
                    let secs = secs % 60;
                    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
                })
                .unwrap_or_else(|_| "??:??:??.???".to_string());

            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp, level, module, message);
            let _ = file.flush();
        }
    }
}

/// Global logger instance
static LOGGER: OnceLock<Mutex<FileLoggerState>> = OnceLock::new();

fn get_logger() -> &'static Mutex<FileLoggerState> {
    LOGGER.get_or_init(|| Mutex::new(FileLoggerState::new()))
}

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    if let Ok(mut logger) = get_logger().lock() {
        logger.write(level, module, message);
    }
}

/// Log a debug message
pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

/// Log an info message
pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

/// Log a warning message
pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Log an error message
pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

/// Get the path to the log file
pub fn log_file_path() -> PathBuf {
    std::env::var_os("HOTSTORE_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("hotstore-debug.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(LogLevel::parse("INFO"), LogLevel::Info);
        // No finer level than debug
        assert_eq!(LogLevel::parse("trace"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::parse(" error "), LogLevel::Error);
        assert_eq!(LogLevel::parse("bogus"), LogLevel::Debug);
    }

    #[test]
    fn test_logging() {
        // Just make sure it doesn't panic
        debug("test", "test message");
        info("test", "test message");
        warn("test", "test message");
        error("test", "test message");
    }
}
