//! Catalog of node types that can be instantiated by name.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use log::{debug, error};
use once_cell::sync::Lazy;

use crate::error::NodesError;
use crate::model::data_model::NodeDataModel;

/// Builds a fresh model instance.
pub type ModelFactory = Box<dyn Fn() -> Box<dyn NodeDataModel> + Send + Sync>;

static GLOBAL_REGISTRY: Lazy<Arc<DataModelRegistry>> =
    Lazy::new(|| Arc::new(DataModelRegistry::new()));

/// Process-wide registry used by scenes created with `FlowScene::default()`.
pub fn global_registry() -> Arc<DataModelRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Maps model names to factories. Names are kept sorted.
pub struct DataModelRegistry {
    factories: RwLock<BTreeMap<String, ModelFactory>>,
}

impl DataModelRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a model type constructed through `Default`.
    pub fn register_model<M>(&self) -> Result<(), NodesError>
    where
        M: NodeDataModel + Default,
    {
        self.register_factory(Box::new(|| Box::new(M::default()) as Box<dyn NodeDataModel>))
    }

    /// Register a factory. The name comes from a probe instance.
    pub fn register_factory(&self, factory: ModelFactory) -> Result<(), NodesError> {
        let name = factory().name();
        let mut factories = self.factories.write().map_err(|_| NodesError::LockPoisoned)?;
        if factories.contains_key(&name) {
            return Err(NodesError::DuplicateModel(name));
        }
        debug!("Registered node model '{}'", name);
        factories.insert(name, factory);
        Ok(())
    }

    /// Names of all registered models, ascending.
    pub fn registered_model_names(&self) -> Vec<String> {
        match self.factories.read() {
            Ok(factories) => factories.keys().cloned().collect(),
            Err(_) => {
                error!("Model registry lock poisoned");
                Vec::new()
            }
        }
    }

    /// Instantiate the model registered under `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn NodeDataModel>> {
        let factories = match self.factories.read() {
            Ok(factories) => factories,
            Err(_) => {
                error!("Model registry lock poisoned");
                return None;
            }
        };
        factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories
            .read()
            .map(|factories| factories.contains_key(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.factories.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DataModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
