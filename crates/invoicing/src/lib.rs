//! Invoicing domain module.
//!
//! This crate contains the invoice draft engine: the in-progress invoice's
//! state, its editing operations, the totals arithmetic, and the submission
//! gate. It is purely deterministic domain logic (no IO, no HTTP, no storage);
//! persistence happens behind the gateway crate's boundary contracts.

pub mod draft;
pub mod invoice;
pub mod totals;
pub mod validate;

pub use draft::{
    Customer, CustomerField, DraftError, InvoiceDraft, ItemField, LineItem, PaymentType,
};
pub use invoice::{Invoice, InvoiceStatus};
pub use totals::{Totals, compute_totals};
pub use validate::ValidationError;
