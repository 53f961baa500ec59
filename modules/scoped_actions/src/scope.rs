use std::fmt;

use tracing::trace;

use crate::{
    action::{argument, Action, ActionCreator, ActionCreatorEntry},
    async_pairs::REQUEST_PREFIX,
    creators::ActionCreators,
    error::ActionsError,
    naming::{strip_nonempty_prefix, to_constant_name, uncapitalize},
};

const SETTER_PREFIX: &str = "set";

/// Optional scope prepended to every label as `@namespace/LABEL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Namespace(Option<String>);

impl Namespace {
    /// Creates a namespace; an empty name means no namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self(None)
        } else {
            Self(Some(name))
        }
    }

    /// The absent namespace.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Returns the namespace name when one is set.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Scopes a literal label.
    ///
    /// ```
    /// use scoped_actions::Namespace;
    ///
    /// assert_eq!(Namespace::new("application").apply("SET_VALUE"), "@application/SET_VALUE");
    /// assert_eq!(Namespace::none().apply("SET_VALUE"), "SET_VALUE");
    /// ```
    #[must_use]
    pub fn apply(&self, label: &str) -> String {
        match &self.0 {
            Some(namespace) => format!("@{namespace}/{label}"),
            None => label.to_string(),
        }
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Option<String>> for Namespace {
    fn from(name: Option<String>) -> Self {
        name.map_or_else(Self::none, Self::new)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

/// Creator resolved and labeled, ready to be bound onto a host.
#[derive(Debug, Clone)]
pub(crate) struct ScopedBinding {
    pub(crate) key: String,
    pub(crate) constant_name: String,
    pub(crate) label: String,
    pub(crate) creator: ActionCreator,
}

/// Turns an entry into a concrete creator, synthesizing one for shortcuts.
///
/// Shortcut keys `set<Name>` produce `{name: value}`, `request<Name>` produce
/// `{request: value}`, anything else produces an empty record.
#[must_use]
pub fn resolve_entry(key: &str, entry: &ActionCreatorEntry) -> ActionCreator {
    match entry {
        ActionCreatorEntry::Creator(creator) => creator.clone(),
        ActionCreatorEntry::Shortcut => shortcut_creator(key),
    }
}

fn shortcut_creator(key: &str) -> ActionCreator {
    if let Some(rest) = strip_nonempty_prefix(key, SETTER_PREFIX) {
        let field = uncapitalize(rest);
        ActionCreator::new(move |args| Ok(Action::new().with_field(field.clone(), argument(args, 0))))
    } else if strip_nonempty_prefix(key, REQUEST_PREFIX).is_some() {
        ActionCreator::new(|args| Ok(Action::new().with_field("request", argument(args, 0))))
    } else {
        ActionCreator::new(|_| Ok(Action::new()))
    }
}

/// Probes `creator` with no arguments and returns its literal label.
///
/// A non-empty string `type` wins; otherwise the label is derived from `key`.
///
/// # Errors
///
/// Returns [`ActionsError::Creator`] when the probe call fails.
pub fn probe_label(key: &str, creator: &ActionCreator) -> Result<String, ActionsError> {
    let probed = creator
        .probe()
        .map_err(|source| ActionsError::creator(key, source))?;
    Ok(match probed.action_type() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => to_constant_name(key),
    })
}

pub(crate) fn scope_creators(
    creators: ActionCreators,
    namespace: &Namespace,
) -> Result<Vec<ScopedBinding>, ActionsError> {
    let mut bindings = Vec::with_capacity(creators.len());
    for (key, entry) in creators {
        let creator = resolve_entry(&key, &entry);
        let label = namespace.apply(&probe_label(&key, &creator)?);
        let constant_name = to_constant_name(&key);
        trace!(key = %key, constant = %constant_name, label = %label, "scoped action creator");
        bindings.push(ScopedBinding {
            key,
            constant_name,
            label,
            creator,
        });
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TYPE_FIELD;
    use anyhow::anyhow;
    use serde_json::json;

    #[test]
    fn empty_namespace_is_absent() {
        assert_eq!(Namespace::new(""), Namespace::none());
        assert_eq!(Namespace::from(None), Namespace::none());
        assert_eq!(Namespace::from("app").as_str(), Some("app"));
        assert_eq!(Namespace::new("app").to_string(), "app");
    }

    #[test]
    fn setter_shortcut_uses_uncapitalized_field() {
        let creator = resolve_entry("setValueList", &ActionCreatorEntry::Shortcut);
        let action = creator.invoke(&[json!([1, 2])]).unwrap();
        assert_eq!(action.into_value(), json!({"valueList": [1, 2]}));
    }

    #[test]
    fn request_shortcut_wraps_request() {
        let creator = resolve_entry("requestValue", &ActionCreatorEntry::Shortcut);
        let action = creator.invoke(&[json!(3)]).unwrap();
        assert_eq!(action.into_value(), json!({"request": 3}));
    }

    #[test]
    fn other_shortcuts_are_empty() {
        for key in ["syncValue", "set", "request"] {
            let creator = resolve_entry(key, &ActionCreatorEntry::Shortcut);
            let action = creator.invoke(&[json!(3)]).unwrap();
            assert_eq!(action.into_value(), json!({}), "shortcut {key}");
        }
    }

    #[test]
    fn probe_prefers_explicit_label() {
        let explicit =
            ActionCreator::new(|_| Ok(Action::new().with_field(TYPE_FIELD, "CUSTOM_TYPE")));
        assert_eq!(probe_label("setValue", &explicit).unwrap(), "CUSTOM_TYPE");

        let blank = ActionCreator::new(|_| Ok(Action::new().with_field(TYPE_FIELD, "")));
        assert_eq!(probe_label("setValue", &blank).unwrap(), "SET_VALUE");

        let unlabeled = ActionCreator::new(|_| Ok(Action::new()));
        assert_eq!(probe_label("setValue", &unlabeled).unwrap(), "SET_VALUE");
    }

    #[test]
    fn probe_failure_names_the_key() {
        let failing = ActionCreator::new(|_| Err(anyhow!("needs an argument")));
        let err = probe_label("loadPage", &failing).unwrap_err();
        assert!(matches!(&err, ActionsError::Creator { key, .. } if key == "loadPage"));
        assert!(err.to_string().contains("needs an argument"));
    }

    #[test]
    fn scoping_applies_namespace_to_labels() {
        let creators = ActionCreators::new()
            .creator("setValue", |_| {
                Ok(Action::new().with_field(TYPE_FIELD, "SET_VALUE"))
            })
            .shortcut("syncValue");
        let bindings = scope_creators(creators, &Namespace::new("application")).unwrap();
        let labels: Vec<_> = bindings
            .iter()
            .map(|binding| (binding.constant_name.as_str(), binding.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            [
                ("SET_VALUE", "@application/SET_VALUE"),
                ("SYNC_VALUE", "@application/SYNC_VALUE")
            ]
        );
    }
}
