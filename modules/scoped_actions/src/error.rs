use thiserror::Error;

/// Errors surfaced while building or invoking scoped creators.
#[derive(Debug, Error)]
pub enum ActionsError {
    /// A user supplied creator failed, during the construction probe or a call.
    #[error("action creator `{key}` failed: {source}")]
    Creator {
        /// Key of the failing creator.
        key: String,
        /// Error returned by the creator.
        #[source]
        source: anyhow::Error,
    },
    /// No creator is bound under the key.
    #[error("unknown action creator `{0}`")]
    UnknownCreator(String),
    /// No constant is bound under the name.
    #[error("unknown action type constant `{0}`")]
    UnknownConstant(String),
}

impl ActionsError {
    pub(crate) fn creator(key: &str, source: anyhow::Error) -> Self {
        Self::Creator {
            key: key.to_string(),
            source,
        }
    }
}
