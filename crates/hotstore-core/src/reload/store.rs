//! Hot-reloading credential store façade

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use super::controller::{ReloadController, ReloadOptions};
use super::credentials::Password;
use crate::store::{CredentialStore, StoreEntry, StoreError, StoreResult};

/// A credential store that follows its backing file
///
/// Every operation first reconciles with the file on disk, then runs against
/// whichever instance is current. A failed reload is returned from the
/// operation that triggered it; the previously loaded instance keeps serving.
///
/// Clones share the same controller.
///
/// # Example
///
/// ```no_run
/// use hotstore_core::reload::{Password, ReloadingStore};
/// use hotstore_core::store::CredentialStore;
///
/// let store = ReloadingStore::open(
///     "yaml",
///     None,
///     "/etc/tls/keystore.yaml",
///     Some(Password::from("changeit")),
/// )?;
///
/// // Picks up a rotated certificate without a restart
/// let cert = store.entry("server")?;
/// # Ok::<(), hotstore_core::StoreError>(())
/// ```
#[derive(Clone)]
pub struct ReloadingStore {
    name: String,
    controller: Arc<ReloadController>,
}

impl ReloadingStore {
    /// Open a reloading store, performing the initial load
    pub fn open(
        engine_id: &str,
        provider: Option<&str>,
        path: impl Into<PathBuf>,
        password: Option<Password>,
    ) -> StoreResult<Self> {
        Self::with_options(engine_id, provider, path, password, ReloadOptions::new())
    }

    /// Open a reloading store with explicit options
    pub fn with_options(
        engine_id: &str,
        provider: Option<&str>,
        path: impl Into<PathBuf>,
        password: Option<Password>,
        options: ReloadOptions,
    ) -> StoreResult<Self> {
        let controller = ReloadController::with_options(engine_id, provider, path, password, options)?;
        Ok(Self::from_controller(controller))
    }

    /// Wrap an existing controller
    pub fn from_controller(controller: ReloadController) -> Self {
        Self {
            name: format!("reloading:{}", controller.path().display()),
            controller: Arc::new(controller),
        }
    }

    /// Check the backing file and reload if it is stale
    pub fn reconcile(&self) -> StoreResult<()> {
        self.controller.reconcile()
    }

    /// `reconcile` on tokio's blocking pool, for async hosts
    pub async fn reconcile_async(&self) -> StoreResult<()> {
        let controller = Arc::clone(&self.controller);
        tokio::task::spawn_blocking(move || controller.reconcile())
            .await
            .map_err(|e| StoreError::Other(format!("Reload task failed: {}", e)))?
    }

    pub fn controller(&self) -> &ReloadController {
        &self.controller
    }
}

impl std::fmt::Debug for ReloadingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadingStore")
            .field("name", &self.name)
            .field("controller", &self.controller)
            .finish()
    }
}

impl CredentialStore for ReloadingStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn entry(&self, alias: &str) -> StoreResult<Option<StoreEntry>> {
        self.reconcile()?;
        self.controller.delegate().entry(alias)
    }

    fn aliases(&self) -> StoreResult<Vec<String>> {
        self.reconcile()?;
        self.controller.delegate().aliases()
    }

    fn set_entry(&self, alias: &str, entry: StoreEntry) -> StoreResult<()> {
        self.reconcile()?;
        self.controller.delegate().set_entry(alias, entry)
    }

    fn delete_entry(&self, alias: &str) -> StoreResult<()> {
        self.reconcile()?;
        self.controller.delegate().delete_entry(alias)
    }

    fn contains_alias(&self, alias: &str) -> StoreResult<bool> {
        self.reconcile()?;
        self.controller.delegate().contains_alias(alias)
    }

    fn size(&self) -> StoreResult<usize> {
        self.reconcile()?;
        self.controller.delegate().size()
    }

    fn creation_date(&self, alias: &str) -> StoreResult<Option<SystemTime>> {
        self.reconcile()?;
        self.controller.delegate().creation_date(alias)
    }

    fn is_key_entry(&self, alias: &str) -> StoreResult<bool> {
        self.reconcile()?;
        self.controller.delegate().is_key_entry(alias)
    }

    fn is_certificate_entry(&self, alias: &str) -> StoreResult<bool> {
        self.reconcile()?;
        self.controller.delegate().is_certificate_entry(alias)
    }
}
