//! `billkhata-core` — shared domain primitives.
//!
//! This crate contains **pure domain** building blocks (no IO, no HTTP):
//! typed identifiers, lenient decimal coercion, and locale display helpers.

pub mod error;
pub mod id;
pub mod money;

pub use error::InvalidId;
pub use id::{InvoiceId, ProfileId};
pub use money::{format_date, format_inr, lenient_decimal};
