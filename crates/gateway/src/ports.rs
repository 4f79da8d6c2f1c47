//! Collaborator ports: the fixed interface the backend is reached through.
//!
//! One trait per collaborator so embedders can stub them independently. All
//! calls are a single async round trip; retry policy (if any) belongs to the
//! caller, never to the engine.

use async_trait::async_trait;

use billkhata_core::InvoiceId;
use billkhata_invoicing::{Invoice, InvoiceDraft};
use billkhata_profile::{CompanyProfile, CompanyProfileInput};

use crate::error::GatewayError;
use crate::types::{CustomerSummary, SalesSummary};

/// The singleton company profile record.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch(&self) -> Result<CompanyProfile, GatewayError>;

    /// Wholesale save; the returned record is the persisted state.
    async fn save(&self, input: &CompanyProfileInput) -> Result<CompanyProfile, GatewayError>;
}

/// Persisted invoices.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// All persisted invoices, in insertion order.
    async fn list(&self) -> Result<Vec<Invoice>, GatewayError>;

    /// Persist a validated draft. Identity, invoice number, dates, and
    /// settlement fields are assigned by the store.
    async fn create(&self, draft: &InvoiceDraft) -> Result<Invoice, GatewayError>;

    /// The printable document for an invoice, as an opaque byte blob.
    async fn render_document(&self, id: InvoiceId) -> Result<Vec<u8>, GatewayError>;
}

/// Per-customer aggregates derived from persisted invoices.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn customers(&self) -> Result<Vec<CustomerSummary>, GatewayError>;
}

/// Sales reporting aggregates.
#[async_trait]
pub trait Reporting: Send + Sync {
    async fn summary(&self) -> Result<SalesSummary, GatewayError>;
}
