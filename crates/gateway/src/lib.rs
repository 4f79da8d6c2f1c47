//! Boundary layer between the draft engine and the backend service.
//!
//! The engine itself never performs IO; everything it needs from the outside
//! world is expressed as the collaborator ports in [`ports`]. [`rest`] talks
//! to the real backend over HTTP, [`in_memory`] is a faithful test double,
//! and [`session`] wires a draft and the ports into the submit/refresh flow.

pub mod error;
pub mod in_memory;
pub mod ports;
pub mod rest;
pub mod session;
pub mod telemetry;
pub mod types;

pub use error::{GatewayError, SubmitError};
pub use in_memory::InMemoryBackend;
pub use ports::{CustomerDirectory, InvoiceStore, ProfileStore, Reporting};
pub use rest::RestGateway;
pub use session::BillingSession;
pub use types::{CustomerSummary, PeriodSummary, SalesSummary};

/// Free-text fields are sent as `null` rather than empty strings.
pub(crate) fn blank_to_none(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
