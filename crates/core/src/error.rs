//! Errors for the shared primitives.

use thiserror::Error;

/// Failure to parse a typed identifier from text.
#[derive(Debug, Error)]
#[error("invalid {kind}: {source}")]
pub struct InvalidId {
    pub(crate) kind: &'static str,
    #[source]
    pub(crate) source: uuid::Error,
}

impl InvalidId {
    /// The identifier type that failed to parse (e.g. `"InvoiceId"`).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}
