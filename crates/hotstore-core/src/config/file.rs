//! File-based declaration of reloading stores (YAML or JSON)
//!
//! ```yaml
//! stores:
//!   - name: server-tls
//!     engine: yaml
//!     path: tls/keystore.yaml        # relative to this file
//!     password:
//!       env: TLS_STORE_PASSWORD
//!     policy: newer-only             # or: compat
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::file_logger as log;
use crate::logging::SharedLogger;
use crate::reload::{Password, ReloadOptions, ReloadingStore, StalenessPolicy};
use crate::store::{StoreError, StoreResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfigFile {
    /// Declared stores
    #[serde(default)]
    pub stores: Vec<StoreConfig>,
}

/// One reloading store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name used to look the store up
    pub name: String,
    /// Store engine id (format), e.g. "yaml"
    pub engine: String,
    /// Engine provider; the built-in one is preferred when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Path of the store file
    pub path: PathBuf,
    /// Where the store password comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordSource>,
    /// Staleness rule
    #[serde(default)]
    pub policy: StalenessPolicy,
}

/// Where to read a store password from; exactly one field must be set
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PasswordSource {
    /// Inline value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Name of an environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    /// File holding the password; one trailing newline is ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl PasswordSource {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn env(name: impl Into<String>) -> Self {
        Self {
            env: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }

    /// Read the password
    pub fn resolve(&self) -> StoreResult<Password> {
        match (&self.value, &self.env, &self.file) {
            (Some(value), None, None) => Ok(Password::from(value.as_str())),
            (None, Some(name), None) => std::env::var(name)
                .map(Password::from)
                .map_err(|_| {
                    StoreError::InvalidConfiguration(format!(
                        "Password environment variable {} is not set",
                        name
                    ))
                }),
            (None, None, Some(path)) => {
                let mut bytes = fs::read(path).map_err(|e| StoreError::file_access(path, e))?;
                if bytes.last() == Some(&b'\n') {
                    bytes.pop();
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                }
                Ok(Password::from(bytes))
            }
            _ => Err(StoreError::InvalidConfiguration(
                "Password source must set exactly one of value, env, file".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for PasswordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordSource")
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("env", &self.env)
            .field("file", &self.file)
            .finish()
    }
}

impl StoreConfig {
    /// Create a store declaration with the default policy and no password
    pub fn new(name: impl Into<String>, engine: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            engine: engine.into(),
            provider: None,
            path: path.into(),
            password: None,
            policy: StalenessPolicy::default(),
        }
    }

    /// Set the provider
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the password source
    pub fn with_password(mut self, password: PasswordSource) -> Self {
        self.password = Some(password);
        self
    }

    /// Set the staleness policy
    pub fn with_policy(mut self, policy: StalenessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Open the declared store, performing its initial load
    pub fn open(&self, logger: SharedLogger) -> StoreResult<ReloadingStore> {
        log::info("StoreConfig", &format!("Opening store '{}' at {}", self.name, self.path.display()));

        let password = match &self.password {
            Some(source) => Some(source.resolve()?),
            None => None,
        };
        let options = ReloadOptions::new()
            .with_policy(self.policy)
            .with_logger(logger);

        ReloadingStore::with_options(&self.engine, self.provider.as_deref(), &self.path, password, options)
            .map_err(|e| {
                log::error("StoreConfig", &format!("Failed to open store '{}': {}", self.name, e));
                e
            })
    }

    fn resolve_relative(&mut self, base: &Path) {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
        if let Some(file) = self.password.as_mut().and_then(|p| p.file.as_mut()) {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }
}

impl StoreConfigFile {
    /// Load a configuration file
    ///
    /// `.json` files are parsed as JSON, everything else as YAML. Relative
    /// store and password-file paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| StoreError::file_access(path, e))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let mut config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        if let Some(base) = path.parent() {
            for store in &mut config.stores {
                store.resolve_relative(base);
            }
        }

        log::debug(
            "StoreConfig",
            &format!("Loaded {} store declaration(s) from {}", config.stores.len(), path.display()),
        );
        Ok(config)
    }

    /// Parse YAML content
    pub fn from_yaml(content: &str) -> StoreResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| StoreError::InvalidConfiguration(format!("Failed to parse YAML: {}", e)))
    }

    /// Parse JSON content
    pub fn from_json(content: &str) -> StoreResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| StoreError::InvalidConfiguration(format!("Failed to parse JSON: {}", e)))
    }

    /// Find a store declaration by name
    pub fn find(&self, name: &str) -> Option<&StoreConfig> {
        self.stores.iter().find(|s| s.name == name)
    }

    /// Open a declared store by name
    pub fn open(&self, name: &str, logger: SharedLogger) -> StoreResult<ReloadingStore> {
        self.find(name)
            .ok_or_else(|| StoreError::InvalidConfiguration(format!("No store named '{}'", name)))?
            .open(logger)
    }
}
