//! Errors crossing the backend boundary.

use thiserror::Error;

use billkhata_invoicing::ValidationError;

/// A collaborator call failed.
///
/// Reads are expected to fall back to safe defaults on these; submission and
/// document retrieval surface them to the user with the state unchanged.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {code}")]
    Status { code: u16 },

    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

/// Why a submission did not produce a persisted invoice.
///
/// Validation failures are raised before any collaborator is contacted; in
/// both cases the draft is left exactly as the user had it.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
