use anyhow::Result;
use indexmap::IndexMap;
use serde_json::Value;

use crate::action::{Action, ActionCreator, ActionCreatorEntry};

/// Insertion-ordered mapping from camelCase key to creator entry.
///
/// Re-inserting a key replaces its entry but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ActionCreators {
    entries: IndexMap<String, ActionCreatorEntry>,
}

impl ActionCreators {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a creator closure and returns self for chaining.
    #[must_use]
    pub fn creator<F>(mut self, key: impl Into<String>, creator: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Action> + Send + Sync + 'static,
    {
        self.insert(key, ActionCreator::new(creator));
        self
    }

    /// Adds a shortcut entry and returns self for chaining.
    #[must_use]
    pub fn shortcut(mut self, key: impl Into<String>) -> Self {
        self.insert(key, ActionCreatorEntry::Shortcut);
        self
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: impl Into<ActionCreatorEntry>,
    ) -> Option<ActionCreatorEntry> {
        self.entries.insert(key.into(), entry.into())
    }

    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ActionCreatorEntry> {
        self.entries.get(key)
    }

    /// Whether `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionCreatorEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }
}

impl<K: Into<String>> FromIterator<(K, ActionCreatorEntry)> for ActionCreators {
    fn from_iter<I: IntoIterator<Item = (K, ActionCreatorEntry)>>(iter: I) -> Self {
        let mut creators = Self::new();
        for (key, entry) in iter {
            creators.insert(key, entry);
        }
        creators
    }
}

impl<K: Into<String>> Extend<(K, ActionCreatorEntry)> for ActionCreators {
    fn extend<I: IntoIterator<Item = (K, ActionCreatorEntry)>>(&mut self, iter: I) {
        for (key, entry) in iter {
            self.insert(key, entry);
        }
    }
}

impl IntoIterator for ActionCreators {
    type Item = (String, ActionCreatorEntry);
    type IntoIter = indexmap::map::IntoIter<String, ActionCreatorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let creators = ActionCreators::new()
            .shortcut("setValue")
            .creator("requestValue", |_| Ok(Action::new()))
            .shortcut("reset");
        let keys: Vec<_> = creators.keys().collect();
        assert_eq!(keys, ["setValue", "requestValue", "reset"]);
    }

    #[test]
    fn replacing_an_entry_keeps_its_slot() {
        let mut creators = ActionCreators::new().shortcut("a").shortcut("b");
        let previous = creators.insert("a", ActionCreator::new(|_| Ok(Action::new())));
        assert!(matches!(previous, Some(ActionCreatorEntry::Shortcut)));
        assert!(matches!(
            creators.get("a"),
            Some(ActionCreatorEntry::Creator(_))
        ));
        let keys: Vec<_> = creators.keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn collects_from_pairs() {
        let creators: ActionCreators = vec![
            ("setValue", ActionCreatorEntry::Shortcut),
            ("syncValue", ActionCreatorEntry::Shortcut),
        ]
        .into_iter()
        .collect();
        assert_eq!(creators.len(), 2);
        assert!(creators.contains_key("syncValue"));
        assert!(!creators.is_empty());
    }
}
