use std::{fmt, sync::Arc};

use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::{
    action::{Action, ActionCreator, ActionCreatorEntry},
    async_pairs::add_missing_async_creators,
    config::ActionsConfig,
    creators::ActionCreators,
    error::ActionsError,
    scope::{scope_creators, Namespace, ScopedBinding},
};

type ConstantTable = Arc<RwLock<IndexMap<String, String>>>;

/// Wrapped creator whose `type` is read from its host's constant table on
/// every call.
#[derive(Clone)]
pub struct ScopedActionCreator {
    key: String,
    constant_name: String,
    creator: ActionCreator,
    constants: ConstantTable,
}

impl ScopedActionCreator {
    /// Key the creator is bound under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the constant holding the creator's label.
    #[must_use]
    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    /// Invokes the underlying creator and stamps the current label as `type`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionsError::Creator`] when the underlying creator fails.
    pub fn call(&self, args: &[Value]) -> Result<Action, ActionsError> {
        let mut action = self
            .creator
            .invoke(args)
            .map_err(|source| ActionsError::creator(&self.key, source))?;
        let label = self.constants.read().get(&self.constant_name).cloned();
        action.set_type(label.map_or(Value::Null, Value::String));
        Ok(action)
    }
}

impl fmt::Debug for ScopedActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedActionCreator")
            .field("key", &self.key)
            .field("constant_name", &self.constant_name)
            .finish_non_exhaustive()
    }
}

/// Host object exposing scoped creators and their type constants.
///
/// Constants can be reassigned with [`Actions::set_constant`]; creators pick
/// up the new label on their next call.
pub struct Actions {
    namespace: Namespace,
    creators: IndexMap<String, ScopedActionCreator>,
    constants: ConstantTable,
    layout: IndexSet<String>,
}

impl Actions {
    /// Runs the full pipeline over `creators` under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionsError::Creator`] when a creator fails its zero-argument
    /// probe.
    pub fn new(
        creators: &ActionCreators,
        namespace: impl Into<Namespace>,
    ) -> Result<Self, ActionsError> {
        let namespace = namespace.into();
        let bindings = scope_creators(add_missing_async_creators(creators), &namespace)?;
        let actions = Self::bind(namespace, bindings);
        debug!(
            namespace = %actions.namespace,
            creators = actions.creators.len(),
            "built scoped actions"
        );
        Ok(actions)
    }

    /// Runs the pipeline without a namespace.
    ///
    /// # Errors
    ///
    /// See [`Actions::new`].
    pub fn unscoped(creators: &ActionCreators) -> Result<Self, ActionsError> {
        Self::new(creators, Namespace::none())
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ActionsBuilder {
        ActionsBuilder::default()
    }

    fn bind(namespace: Namespace, bindings: Vec<ScopedBinding>) -> Self {
        let constants: ConstantTable = Arc::new(RwLock::new(IndexMap::new()));
        let mut creators = IndexMap::with_capacity(bindings.len());
        let mut layout = IndexSet::with_capacity(bindings.len() * 2);
        {
            let mut table = constants.write();
            for binding in bindings {
                layout.insert(binding.key.clone());
                layout.insert(binding.constant_name.clone());
                table.insert(binding.constant_name.clone(), binding.label);
                creators.insert(
                    binding.key.clone(),
                    ScopedActionCreator {
                        key: binding.key,
                        constant_name: binding.constant_name,
                        creator: binding.creator,
                        constants: Arc::clone(&constants),
                    },
                );
            }
        }
        Self {
            namespace,
            creators,
            constants,
            layout,
        }
    }

    /// Calls the creator bound under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionsError::UnknownCreator`] for unbound keys and
    /// [`ActionsError::Creator`] when the creator fails.
    pub fn call(&self, key: &str, args: &[Value]) -> Result<Action, ActionsError> {
        self.creators
            .get(key)
            .ok_or_else(|| ActionsError::UnknownCreator(key.to_string()))?
            .call(args)
    }

    /// Handle to the creator bound under `key`.
    ///
    /// The handle shares this host's constants and stays usable after the
    /// host is dropped.
    #[must_use]
    pub fn creator(&self, key: &str) -> Option<ScopedActionCreator> {
        self.creators.get(key).cloned()
    }

    /// Whether a creator is bound under `key`.
    #[must_use]
    pub fn contains_creator(&self, key: &str) -> bool {
        self.creators.contains_key(key)
    }

    /// Current value of a type constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<String> {
        self.constants.read().get(name).cloned()
    }

    /// Reassigns a type constant, returning its previous value.
    ///
    /// Actions already returned keep their label; later calls use the new one.
    ///
    /// # Errors
    ///
    /// Returns [`ActionsError::UnknownConstant`] when `name` is not bound.
    pub fn set_constant(
        &self,
        name: &str,
        label: impl Into<String>,
    ) -> Result<String, ActionsError> {
        let mut table = self.constants.write();
        let slot = table
            .get_mut(name)
            .ok_or_else(|| ActionsError::UnknownConstant(name.to_string()))?;
        Ok(std::mem::replace(slot, label.into()))
    }

    /// Snapshot of every constant in binding order.
    #[must_use]
    pub fn constants(&self) -> IndexMap<String, String> {
        self.constants.read().clone()
    }

    /// Creator keys in binding order.
    pub fn creator_keys(&self) -> impl Iterator<Item = &str> {
        self.creators.keys().map(String::as_str)
    }

    /// Every bound name: each creator key followed by its constant name.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.layout.iter().map(String::as_str)
    }

    /// Namespace applied at construction.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Number of bound creators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    /// Whether no creators are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("namespace", &self.namespace)
            .field("constants", &*self.constants.read())
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`Actions`].
#[derive(Debug, Default)]
pub struct ActionsBuilder {
    creators: ActionCreators,
    namespace: Namespace,
}

impl ActionsBuilder {
    /// Adds a creator closure.
    #[must_use]
    pub fn creator<F>(mut self, key: impl Into<String>, creator: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Action> + Send + Sync + 'static,
    {
        self.creators.insert(key, ActionCreator::new(creator));
        self
    }

    /// Adds a shortcut entry.
    #[must_use]
    pub fn shortcut(mut self, key: impl Into<String>) -> Self {
        self.creators.insert(key, ActionCreatorEntry::Shortcut);
        self
    }

    /// Appends every entry of `creators`.
    #[must_use]
    pub fn creators(mut self, creators: ActionCreators) -> Self {
        self.creators.extend(creators);
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<Namespace>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Applies loaded configuration.
    #[must_use]
    pub fn config(mut self, config: &ActionsConfig) -> Self {
        self.namespace = config.namespace();
        self
    }

    /// Finalizes the builder.
    ///
    /// # Errors
    ///
    /// See [`Actions::new`].
    pub fn build(self) -> Result<Actions, ActionsError> {
        Actions::new(&self.creators, self.namespace)
    }
}
