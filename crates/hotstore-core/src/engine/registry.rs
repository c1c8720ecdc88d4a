//! Store engine registry for resolving engines by id and provider

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::document::{DocumentEngine, BUILTIN_PROVIDER};
use super::traits::StoreEngine;
use crate::logging::file_logger as log;

/// Factory function type for creating store engines
///
/// Shared so it can be called after the registry lock is released; a factory
/// may itself register engines.
pub type EngineFactory = Arc<dyn Fn() -> Arc<dyn StoreEngine> + Send + Sync>;

/// Definition of a registered store engine
pub struct EngineDefinition {
    /// Engine identifier (store format), e.g. "yaml"
    pub id: String,
    /// Provider implementing the engine, e.g. "builtin"
    pub provider: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: EngineFactory,
}

impl std::fmt::Debug for EngineDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineDefinition")
            .field("id", &self.id)
            .field("provider", &self.provider)
            .field("description", &self.description)
            .finish()
    }
}

type RegistryKey = (String, String);

fn key(id: &str, provider: &str) -> RegistryKey {
    (id.to_lowercase(), provider.to_lowercase())
}

/// Global registry of store engines, keyed by (id, provider)
static REGISTRY: Lazy<RwLock<HashMap<RegistryKey, EngineDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Register built-in engines
    map.insert(
        key("yaml", BUILTIN_PROVIDER),
        EngineDefinition {
            id: "yaml".to_string(),
            provider: BUILTIN_PROVIDER.to_string(),
            description: "YAML credential document".to_string(),
            factory: Arc::new(|| Arc::new(DocumentEngine::yaml()) as Arc<dyn StoreEngine>),
        },
    );

    map.insert(
        key("json", BUILTIN_PROVIDER),
        EngineDefinition {
            id: "json".to_string(),
            provider: BUILTIN_PROVIDER.to_string(),
            description: "JSON credential document".to_string(),
            factory: Arc::new(|| Arc::new(DocumentEngine::json()) as Arc<dyn StoreEngine>),
        },
    );

    RwLock::new(map)
});

/// Register a store engine
///
/// Registering the same (id, provider) pair again replaces the previous definition.
///
/// # Example
///
/// ```
/// use hotstore_core::engine::{register_store_engine, open_store_engine, DocumentEngine, StoreEngine};
/// use std::sync::Arc;
///
/// register_store_engine(
///     "devstore",
///     "acme",
///     "Acme development store",
///     Arc::new(|| Arc::new(DocumentEngine::yaml()) as Arc<dyn StoreEngine>),
/// );
/// assert!(open_store_engine("devstore", Some("acme")).is_some());
/// ```
pub fn register_store_engine(id: &str, provider: &str, description: &str, factory: EngineFactory) {
    log::info("EngineRegistry", &format!("Registering engine '{}' from provider '{}'", id, provider));
    let mut registry = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    registry.insert(
        key(id, provider),
        EngineDefinition {
            id: id.to_string(),
            provider: provider.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Open an engine by id, optionally pinned to a provider
///
/// Without a provider the built-in implementation is preferred; otherwise the
/// registration with the alphabetically first provider name wins.
///
/// # Returns
/// A new engine instance, or None if no matching engine is registered
pub fn open_store_engine(id: &str, provider: Option<&str>) -> Option<Arc<dyn StoreEngine>> {
    let factory = {
        let registry = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
        find_definition(&registry, id, provider).map(|def| Arc::clone(&def.factory))
    };

    match factory {
        Some(factory) => Some(factory()),
        None => {
            log::warn(
                "EngineRegistry",
                &format!("No engine '{}' (provider: {})", id, provider.unwrap_or("any")),
            );
            None
        }
    }
}

fn find_definition<'a>(
    registry: &'a HashMap<RegistryKey, EngineDefinition>,
    id: &str,
    provider: Option<&str>,
) -> Option<&'a EngineDefinition> {
    match provider {
        Some(provider) => registry.get(&key(id, provider)),
        None => registry.get(&key(id, BUILTIN_PROVIDER)).or_else(|| {
            let id = id.to_lowercase();
            registry
                .iter()
                .filter(|((def_id, _), _)| *def_id == id)
                .min_by(|(a, _), (b, _)| a.1.cmp(&b.1))
                .map(|(_, def)| def)
        }),
    }
}

/// List all registered engines
///
/// # Returns
/// A vector of (id, provider, description) tuples
pub fn list_store_engines() -> Vec<(String, String, String)> {
    let registry = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    registry
        .values()
        .map(|def| (def.id.clone(), def.provider.clone(), def.description.clone()))
        .collect()
}

/// Check if an engine is registered under any provider
pub fn has_store_engine(id: &str) -> bool {
    let id = id.to_lowercase();
    let registry = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    registry.keys().any(|(def_id, _)| *def_id == id)
}

/// Unregister an engine (mainly for testing)
pub fn unregister_store_engine(id: &str, provider: &str) -> bool {
    let mut registry = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    registry.remove(&key(id, provider)).is_some()
}
