//! Definition Registry - write-once cache of model definitions
//!
//! The registry is an explicit object owned by the application; nothing is
//! stored globally. Each model type gets one cell, initialized at most once:
//! concurrent first accesses wait for the single build, and a failed build
//! leaves the cell empty so the next access retries.

use std::any::{type_name, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use super::builder::DefinitionBuilder;
use super::model_definition::Definition;
use crate::error::ModelResult;
use crate::model::Model;

type DefinitionCell = Arc<OnceCell<Arc<Definition>>>;

/// Thread-safe registry of built definitions keyed by model type
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    builder: DefinitionBuilder,
    definitions: Arc<DashMap<TypeId, DefinitionCell>>,
}

impl DefinitionRegistry {
    /// Create a registry that builds definitions with the given builder
    pub fn new(builder: DefinitionBuilder) -> Self {
        Self {
            builder,
            definitions: Arc::new(DashMap::new()),
        }
    }

    pub fn builder(&self) -> &DefinitionBuilder {
        &self.builder
    }

    /// Get the definition of a model type, building it from the model's
    /// declarations on first access
    pub fn get<M: Model + 'static>(&self) -> ModelResult<Arc<Definition>> {
        self.get_or_build::<M, _>(|| self.builder.build_model::<M>())
    }

    /// Get the definition cached for `K`, or build and cache it with `build`.
    ///
    /// `build` runs at most once per key for the registry's lifetime unless it
    /// fails.
    pub fn get_or_build<K, F>(&self, build: F) -> ModelResult<Arc<Definition>>
    where
        K: 'static,
        F: FnOnce() -> ModelResult<Definition>,
    {
        let key = TypeId::of::<K>();
        let cell = self.cell(key);

        if let Some(definition) = cell.get() {
            tracing::trace!(model = type_name::<K>(), "Definition registry hit");
            return Ok(Arc::clone(definition));
        }

        cell.get_or_try_init(|| {
            tracing::debug!(model = type_name::<K>(), "Building model definition");
            build().map(Arc::new)
        })
        .map(Arc::clone)
        .map_err(|err| {
            tracing::warn!(model = type_name::<K>(), error = %err, "Model definition build failed");
            err
        })
    }

    /// Check if a definition has been built for a model type
    pub fn contains<K: 'static>(&self) -> bool {
        self.definitions
            .get(&TypeId::of::<K>())
            .map(|cell| cell.get().is_some())
            .unwrap_or(false)
    }

    /// Number of built definitions
    pub fn len(&self) -> usize {
        self.definitions
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached definition
    pub fn clear(&self) {
        self.definitions.clear();
    }

    /// The cell for a key, created on first use. The map's shard lock is
    /// released before the cell is initialized.
    fn cell(&self, key: TypeId) -> DefinitionCell {
        if let Some(cell) = self.definitions.get(&key) {
            return Arc::clone(cell.value());
        }

        self.definitions
            .entry(key)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::tests::{Post, User};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Marker;

    #[test]
    fn test_get_returns_same_instance() {
        let registry = DefinitionRegistry::default();

        let first = registry.get::<User>().unwrap();
        let second = registry.get::<User>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.contains::<User>());
        assert!(!registry.contains::<Post>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builder_runs_once() {
        let registry = DefinitionRegistry::default();
        let calls = AtomicUsize::new(0);
        let build = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Definition::new(Vec::new()))
        };

        registry.get_or_build::<Marker, _>(build).unwrap();
        registry.get_or_build::<Marker, _>(build).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let registry = DefinitionRegistry::default();

        let result = registry.get_or_build::<Marker, _>(|| {
            Err(ModelError::Configuration("broken".to_string()))
        });
        assert!(result.is_err());
        assert!(!registry.contains::<Marker>());
        assert!(registry.is_empty());

        let definition = registry
            .get_or_build::<Marker, _>(|| Ok(Definition::new(Vec::new())))
            .unwrap();
        assert!(definition.is_empty());
        assert!(registry.contains::<Marker>());
    }

    #[test]
    fn test_clones_share_cache() {
        let registry = DefinitionRegistry::default();
        let clone = registry.clone();

        let first = registry.get::<User>().unwrap();
        let second = clone.get::<User>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        clone.clear();
        assert!(registry.is_empty());
    }
}
