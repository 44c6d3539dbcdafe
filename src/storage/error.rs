use thiserror::Error;

/// Failures surfaced by the document store. Every variant maps to a 500 at
/// the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("store write failed: {0}")]
    Write(String),
}
