use thiserror::Error;

/// Reasons a single document yields no table. None of these stop a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no valid <h1> or <h2> header found")]
    NoAnchorFound,

    #[error("no table found under the specified headers")]
    NoTableFound,

    #[error("table has no '{column}' column")]
    MissingIdentityColumn { column: String },
}
