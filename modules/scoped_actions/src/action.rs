use std::{fmt, sync::Arc};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field that carries an action's label.
pub const TYPE_FIELD: &str = "type";

/// Labeled data record emitted by an action creator.
///
/// The record is an open JSON object. It conventionally holds a string
/// [`TYPE_FIELD`], which may be absent when the label is derived from the
/// creator's key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Map<String, Value>);

impl Action {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Fails when `value` is not a JSON object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => bail!("action must be a JSON object, got {other}"),
        }
    }

    /// Adds a field and returns self for chaining.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Inserts a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Looks up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the label when the record carries a string `type`.
    #[must_use]
    pub fn action_type(&self) -> Option<&str> {
        self.0.get(TYPE_FIELD).and_then(Value::as_str)
    }

    /// Overwrites the `type` field.
    pub fn set_type(&mut self, label: impl Into<Value>) {
        self.0.insert(TYPE_FIELD.to_string(), label.into());
    }

    /// Borrows the underlying fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts the record into a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Action {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        action.into_value()
    }
}

type CreatorFn = dyn Fn(&[Value]) -> Result<Action> + Send + Sync;

/// Shared callable producing an [`Action`] from positional arguments.
#[derive(Clone)]
pub struct ActionCreator {
    inner: Arc<CreatorFn>,
}

impl ActionCreator {
    /// Wraps a closure.
    pub fn new<F>(creator: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Action> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(creator),
        }
    }

    /// Invokes the creator.
    ///
    /// # Errors
    ///
    /// Propagates whatever the wrapped closure returns.
    pub fn invoke(&self, args: &[Value]) -> Result<Action> {
        (self.inner)(args)
    }

    /// Invokes the creator with no arguments to inspect its default record.
    ///
    /// Creators must tolerate this call without side effects.
    ///
    /// # Errors
    ///
    /// Propagates whatever the wrapped closure returns.
    pub fn probe(&self) -> Result<Action> {
        self.invoke(&[])
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator").finish_non_exhaustive()
    }
}

/// Value stored under a key of the input mapping.
#[derive(Debug, Clone)]
pub enum ActionCreatorEntry {
    /// User supplied creator.
    Creator(ActionCreator),
    /// Synthesize a default creator from the key's name.
    Shortcut,
}

impl From<ActionCreator> for ActionCreatorEntry {
    fn from(creator: ActionCreator) -> Self {
        Self::Creator(creator)
    }
}

/// Positional argument `index`, or `null` when it was not supplied.
#[must_use]
pub fn argument(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_type_only() {
        let action = Action::new().with_field(TYPE_FIELD, "SET_VALUE");
        assert_eq!(action.action_type(), Some("SET_VALUE"));

        let numeric = Action::new().with_field(TYPE_FIELD, 3);
        assert_eq!(numeric.action_type(), None);
        assert_eq!(Action::new().action_type(), None);
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(Action::from_json(json!([1, 2])).is_err());
        let action = Action::from_json(json!({"value": 1})).unwrap();
        assert_eq!(action.get("value"), Some(&json!(1)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let action = Action::new()
            .with_field(TYPE_FIELD, "SET_VALUE")
            .with_field("value", 3);
        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded, json!({"type": "SET_VALUE", "value": 3}));
        let decoded: Action = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, action);
    }

    #[test]
    fn creators_receive_positional_arguments() {
        let creator =
            ActionCreator::new(|args| Ok(Action::new().with_field("value", argument(args, 0))));
        let action = creator.invoke(&[json!(7)]).unwrap();
        assert_eq!(action.into_value(), json!({"value": 7}));
        let probed = creator.probe().unwrap();
        assert_eq!(probed.into_value(), json!({"value": null}));
    }
}
