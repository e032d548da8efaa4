use thiserror::Error;

/// The failure modes of the feature-engineering operations.
///
/// Every failure is local to the call that produced it; pure numeric code has
/// no transient failure mode, so nothing is retried internally.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A requested column name is not present in the table
    #[error("no column named `{0}` in the table")]
    UnknownColumn(String),

    /// The caller asked for features but supplied no column names
    #[error("the feature list must not be empty")]
    EmptyFeatureList,

    /// A parameter combination with no defined meaning
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Previously generated parameters do not fit the data they are
    /// reapplied to
    #[error("shape mismatch: expected {expected} {what}, got {got}")]
    ShapeMismatch {
        /// The dimension that disagreed, e.g. "rows"
        what: &'static str,
        /// The extent the fitted parameters require
        expected: usize,
        /// The extent the supplied data actually has
        got: usize,
    },
}
