//! Reload decision and delegate swap
//!
//! The controller owns everything needed to rebuild a store from its backing
//! file (path, engine, password) and the timestamp of the revision it last
//! loaded. `reconcile` compares that timestamp with the file's current
//! modification time and, when the file is stale, loads a new instance and
//! publishes it through the `DelegateHolder`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::credentials::Password;
use super::holder::DelegateHolder;
use super::source::{FileSource, StoreSource};
use crate::engine::{open_store_engine, LoadError, StoreEngine};
use crate::logging::{FileLogger, Logger, SharedLogger};
use crate::store::{CredentialStore, StoreError, StoreResult};

/// Rule deciding whether the backing file is newer than the loaded revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalenessPolicy {
    /// Reload only when the file's time is strictly after the recorded one.
    /// Equal or older timestamps never reload.
    #[default]
    NewerOnly,
    /// Skip only when the recorded time is strictly after the file's time.
    /// An unchanged timestamp reloads on every check.
    Compat,
}

impl StalenessPolicy {
    /// Whether a store loaded at `recorded` must be reloaded for a file at `current`
    pub fn is_stale(&self, recorded: Option<SystemTime>, current: SystemTime) -> bool {
        match (self, recorded) {
            (_, None) => true,
            (StalenessPolicy::NewerOnly, Some(recorded)) => current > recorded,
            (StalenessPolicy::Compat, Some(recorded)) => recorded <= current,
        }
    }
}

/// Optional knobs for building a `ReloadController`
#[derive(Clone)]
pub struct ReloadOptions {
    policy: StalenessPolicy,
    logger: SharedLogger,
    engine: Option<Arc<dyn StoreEngine>>,
    source: Option<Arc<dyn StoreSource>>,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadOptions {
    pub fn new() -> Self {
        Self {
            policy: StalenessPolicy::default(),
            logger: Arc::new(FileLogger::default()),
            engine: None,
            source: None,
        }
    }

    /// Set the staleness policy
    pub fn with_policy(mut self, policy: StalenessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the logger used for reload activity
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Use this engine instead of resolving one from the registry
    pub fn with_engine(mut self, engine: Arc<dyn StoreEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Read from this source instead of the file at the store path
    pub fn with_source(mut self, source: Arc<dyn StoreSource>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Mutable part of the controller, guarded by one lock
#[derive(Debug, Default)]
struct ReloadState {
    /// Modification time of the revision the delegate was built from
    last_observed_modified: Option<SystemTime>,
    /// Modification time of the last revision the engine rejected
    rejected_modified: Option<SystemTime>,
    /// Number of successful reloads after the initial load
    reloads: u64,
}

/// Decides when a credential store is stale and swaps in a fresh instance
///
/// # Example
///
/// ```no_run
/// use hotstore_core::reload::{Password, ReloadController};
/// use hotstore_core::store::CredentialStore;
///
/// let controller = ReloadController::new(
///     "yaml",
///     None,
///     "/etc/tls/keystore.yaml",
///     Some(Password::from("changeit")),
/// )?;
///
/// controller.reconcile()?;
/// let aliases = controller.current()?.aliases()?;
/// # Ok::<(), hotstore_core::StoreError>(())
/// ```
pub struct ReloadController {
    path: PathBuf,
    engine_id: String,
    provider: Option<String>,
    credentials: Password,
    policy: StalenessPolicy,
    engine: Arc<dyn StoreEngine>,
    source: Arc<dyn StoreSource>,
    logger: SharedLogger,
    state: Mutex<ReloadState>,
    delegate: DelegateHolder,
}

impl ReloadController {
    /// Create a controller and perform the initial load
    ///
    /// `password` must be present (it may be empty). Any failure to resolve
    /// the engine, read the file or parse it is returned and no controller
    /// is produced.
    pub fn new(
        engine_id: &str,
        provider: Option<&str>,
        path: impl Into<PathBuf>,
        password: Option<Password>,
    ) -> StoreResult<Self> {
        Self::with_options(engine_id, provider, path, password, ReloadOptions::new())
    }

    /// Create a controller with explicit options and perform the initial load
    pub fn with_options(
        engine_id: &str,
        provider: Option<&str>,
        path: impl Into<PathBuf>,
        password: Option<Password>,
        options: ReloadOptions,
    ) -> StoreResult<Self> {
        let path = path.into();
        let credentials = password.ok_or_else(|| {
            StoreError::InvalidConfiguration(format!(
                "Password must be provided for store {}",
                path.display()
            ))
        })?;

        let engine = match options.engine {
            Some(engine) => engine,
            None => open_store_engine(engine_id, provider).ok_or_else(|| {
                let name = match provider {
                    Some(provider) => format!("{} (provider {})", engine_id, provider),
                    None => engine_id.to_string(),
                };
                StoreError::store_load(&path, LoadError::UnsupportedEngine(name))
            })?,
        };
        let source = options
            .source
            .unwrap_or_else(|| Arc::new(FileSource::new(&path)));

        options
            .logger
            .debug(&format!("Loading credential store {}", path.display()));
        let modified = observe(source.as_ref(), &path)?;
        let instance = load(engine.as_ref(), source.as_ref(), &path, &credentials)?;

        Ok(Self {
            engine_id: engine_id.to_string(),
            provider: provider.map(|p| p.to_string()),
            credentials,
            policy: options.policy,
            engine,
            source,
            logger: options.logger,
            state: Mutex::new(ReloadState {
                last_observed_modified: Some(modified),
                ..ReloadState::default()
            }),
            delegate: DelegateHolder::new(instance),
            path,
        })
    }

    /// Reload the store if its backing file changed since the last load
    ///
    /// Holding the state lock across check, load and swap keeps the recorded
    /// timestamp matched with the published delegate. On any error the
    /// previous delegate stays in place.
    ///
    /// A revision the engine rejected is reported once, to the caller that
    /// hit it; later calls keep serving the previous delegate until the
    /// file's modification time moves again.
    pub fn reconcile(&self) -> StoreResult<()> {
        let mut state = self.state.lock();

        let modified = observe(self.source.as_ref(), &self.path)?;
        if !self.policy.is_stale(state.last_observed_modified, modified) {
            return Ok(());
        }
        if state.rejected_modified == Some(modified) {
            return Ok(());
        }

        self.logger
            .debug(&format!("Reloading credential store {}", self.path.display()));
        match load(self.engine.as_ref(), self.source.as_ref(), &self.path, &self.credentials) {
            Ok(instance) => {
                self.delegate.set(instance);
                state.last_observed_modified = Some(modified);
                state.rejected_modified = None;
                state.reloads += 1;
                self.logger
                    .info(&format!("Reloaded credential store {}", self.path.display()));
                Ok(())
            }
            Err(e) => {
                if matches!(e, StoreError::StoreLoad { .. }) {
                    state.rejected_modified = Some(modified);
                }
                self.logger.warn(&format!(
                    "Keeping previous credential store for {}: {}",
                    self.path.display(),
                    e
                ));
                Err(e)
            }
        }
    }

    /// The currently published store instance, without reconciling
    pub fn current(&self) -> StoreResult<Arc<dyn CredentialStore>> {
        self.delegate.get()
    }

    /// The holder that serves store operations
    pub fn delegate(&self) -> &DelegateHolder {
        &self.delegate
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn engine_id(&self) -> &str {
        &self.engine_id
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn policy(&self) -> StalenessPolicy {
        self.policy
    }

    /// Modification time of the revision currently served
    pub fn last_observed_modified(&self) -> Option<SystemTime> {
        self.state.lock().last_observed_modified
    }

    /// Number of successful reloads since construction
    pub fn reload_count(&self) -> u64 {
        self.state.lock().reloads
    }
}

impl std::fmt::Debug for ReloadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadController")
            .field("path", &self.path)
            .field("engine_id", &self.engine_id)
            .field("provider", &self.provider)
            .field("policy", &self.policy)
            .field("last_observed_modified", &self.last_observed_modified())
            .finish()
    }
}

fn observe(source: &dyn StoreSource, path: &Path) -> StoreResult<SystemTime> {
    source
        .modified()
        .map_err(|e| StoreError::file_access(path, e))
}

fn load(
    engine: &dyn StoreEngine,
    source: &dyn StoreSource,
    path: &Path,
    password: &Password,
) -> StoreResult<Arc<dyn CredentialStore>> {
    let mut reader = source.open().map_err(|e| StoreError::file_access(path, e))?;
    let instance = engine
        .load(&mut reader, password.as_bytes())
        .map_err(|e| StoreError::store_load(path, e))?;
    Ok(Arc::from(instance))
}
