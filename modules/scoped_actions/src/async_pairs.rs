use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::{
    action::{argument, Action, ActionCreator, ActionCreatorEntry, TYPE_FIELD},
    creators::ActionCreators,
    naming::{strip_nonempty_prefix, to_constant_name, uncapitalize},
};

/// Key prefix marking an asynchronous request creator.
pub const REQUEST_PREFIX: &str = "request";

/// Companion keys derived from a `request*` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncPair {
    /// `<prefix>RequestSucceeded`.
    pub success_key: String,
    /// `<prefix>RequestFailed`.
    pub failure_key: String,
}

impl AsyncPair {
    /// Derives the companions for `key`, or `None` when it is not a request key.
    ///
    /// `requestValue` yields `valueRequestSucceeded` and `valueRequestFailed`.
    #[must_use]
    pub fn for_request_key(key: &str) -> Option<Self> {
        let prefix = uncapitalize(strip_nonempty_prefix(key, REQUEST_PREFIX)?);
        Some(Self {
            success_key: format!("{prefix}RequestSucceeded"),
            failure_key: format!("{prefix}RequestFailed"),
        })
    }

    fn success_creator(&self) -> ActionCreator {
        payload_creator(to_constant_name(&self.success_key), "response")
    }

    fn failure_creator(&self) -> ActionCreator {
        payload_creator(to_constant_name(&self.failure_key), "reason")
    }
}

fn payload_creator(label: String, field: &'static str) -> ActionCreator {
    ActionCreator::new(move |args| {
        Ok(Action::new()
            .with_field(TYPE_FIELD, label.clone())
            .with_field(field, argument(args, 0)))
    })
}

/// Returns `creators` with success/failure companions added for every
/// request key whose success companion is missing.
///
/// Generated companions are placed ahead of their request key. Only the
/// success key gates generation: a failure companion defined without its
/// success companion is replaced by the generated one.
#[must_use]
pub fn add_missing_async_creators(creators: &ActionCreators) -> ActionCreators {
    let mut merged: IndexMap<String, ActionCreatorEntry> = IndexMap::with_capacity(creators.len());
    let mut generated: IndexSet<String> = IndexSet::new();

    for (key, entry) in creators.iter() {
        if let Some(pair) = AsyncPair::for_request_key(key) {
            if creators.contains_key(&pair.success_key) {
                debug!(
                    request = key,
                    success = %pair.success_key,
                    "request companions already defined"
                );
            } else {
                debug!(
                    request = key,
                    success = %pair.success_key,
                    failure = %pair.failure_key,
                    "generating request companions"
                );
                merged.insert(pair.success_key.clone(), pair.success_creator().into());
                merged.insert(pair.failure_key.clone(), pair.failure_creator().into());
                generated.insert(pair.success_key);
                generated.insert(pair.failure_key);
            }
        }
        if generated.contains(key) {
            continue;
        }
        merged.insert(key.to_string(), entry.clone());
    }

    merged.into_iter().collect()
}
