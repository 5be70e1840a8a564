//! Error type for the codec and the executor.

use tablequery_model::DynamoDBError;

/// Everything that can end a query invocation.
///
/// All variants are fatal: the executor never retries and never returns a
/// partial aggregate alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Caller-supplied attribute value JSON could not be unescaped or parsed.
    #[error("invalid attribute value JSON: {0}")]
    Decode(String),

    /// A decoded value could not be translated to wire form.
    #[error("cannot marshal attribute value at `{path}`: {reason}")]
    Marshal {
        /// Location of the offending element, rooted at `$` or at a placeholder name.
        path: String,
        /// Why the translation failed.
        reason: String,
    },

    /// The store rejected a page fetch.
    #[error(transparent)]
    Store(#[from] DynamoDBError),

    /// A returned item could not be flattened to JSON.
    #[error("failed to serialize item: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The caller cancelled the invocation.
    #[error("query cancelled after {pages} page fetch(es)")]
    Cancelled {
        /// Page fetches that completed before cancellation was observed.
        pages: u64,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QueryError {
    /// Attribute the error to an expression attribute value placeholder.
    #[must_use]
    pub fn for_placeholder(self, placeholder: &str) -> Self {
        match self {
            Self::Decode(message) => Self::Decode(format!("{placeholder}: {message}")),
            Self::Marshal { path, reason } => Self::Marshal {
                path: format!("{placeholder}{}", path.trim_start_matches('$')),
                reason,
            },
            other => other,
        }
    }
}

/// Convenience result type for TableQuery operations.
pub type TableQueryResult<T> = Result<T, QueryError>;
