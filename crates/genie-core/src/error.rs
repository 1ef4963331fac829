//! Error types for the migration pipeline.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during a migration run.
///
/// All of these are terminal for the current run; nothing is retried
/// internally. Each variant names the phase that produced it, since
/// remediation differs: rule errors are a local configuration problem and
/// never touch the network, fetch errors point at the source workspace,
/// publish errors at the target.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The rule source is not a flat string-to-string JSON object.
    #[error("malformed rule set: {0}")]
    MalformedRuleSet(String),

    /// A rule has an empty search string, which would match at every
    /// position in the buffer.
    #[error("invalid rule at index {index}: search string is empty")]
    InvalidRule { index: usize },

    /// Fetching the source space failed.
    #[error("failed to fetch space {space_id}: {source}")]
    FetchFailed {
        space_id: String,
        source: StoreError,
    },

    /// Publishing to the target workspace failed.
    #[error("failed to publish space: {source}")]
    PublishFailed { source: StoreError },

    /// Update mode was selected without a target space id.
    #[error("update mode requires a target space id")]
    MissingTarget,

    /// Create mode was selected without a warehouse id.
    #[error("create mode requires a warehouse id")]
    MissingWarehouse,
}
