//! One user's billing session: the live draft plus cached read views.
//!
//! The session is the single owner of the mutable draft; edits go through
//! `draft_mut()` and run to completion before the next is accepted. The only
//! outward calls are `submit`, `save_profile`, `download_document`, and the
//! read-side refreshes.

use std::sync::Arc;

use billkhata_core::InvoiceId;
use billkhata_invoicing::{Invoice, InvoiceDraft};
use billkhata_profile::{CompanyProfile, CompanyProfileInput};

use crate::error::{GatewayError, SubmitError};
use crate::ports::{CustomerDirectory, InvoiceStore, ProfileStore, Reporting};
use crate::types::{CustomerSummary, SalesSummary};

/// Draft engine plus the backend boundary, wired together.
pub struct BillingSession<G> {
    gateway: Arc<G>,
    draft: InvoiceDraft,
    profile: CompanyProfile,
    invoices: Vec<Invoice>,
    customers: Vec<CustomerSummary>,
    summary: SalesSummary,
}

impl<G> BillingSession<G>
where
    G: ProfileStore + InvoiceStore + CustomerDirectory + Reporting,
{
    /// Start with the empty draft template and empty cached views.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            draft: InvoiceDraft::default(),
            profile: CompanyProfile::default(),
            invoices: Vec::new(),
            customers: Vec::new(),
            summary: SalesSummary::default(),
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    /// Mutable access for the editing operations; every mutator leaves the
    /// draft fully consistent, so handing this out is safe.
    pub fn draft_mut(&mut self) -> &mut InvoiceDraft {
        &mut self.draft
    }

    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn customers(&self) -> &[CustomerSummary] {
        &self.customers
    }

    pub fn summary(&self) -> &SalesSummary {
        &self.summary
    }

    /// Validate and persist the draft.
    ///
    /// Validation failures return before any collaborator is contacted. On a
    /// persistence failure the draft is left exactly as entered so the user
    /// can retry. Only a successful round trip resets the draft to the empty
    /// template and refreshes the read views.
    pub async fn submit(&mut self) -> Result<Invoice, SubmitError> {
        self.draft.validate_for_submission()?;

        let invoice = match self.gateway.create(&self.draft).await {
            Ok(invoice) => invoice,
            Err(err) => {
                tracing::error!("invoice submission failed: {err}");
                return Err(err.into());
            }
        };
        tracing::info!(invoice_number = %invoice.invoice_number, "invoice persisted");

        self.draft = InvoiceDraft::default();
        self.refresh_all().await;
        Ok(invoice)
    }

    /// Wholesale profile save. The cached profile is only replaced on
    /// success; failures propagate for the UI to surface.
    pub async fn save_profile(&mut self, input: &CompanyProfileInput) -> Result<(), GatewayError> {
        match self.gateway.save(input).await {
            Ok(profile) => {
                self.profile = profile;
                Ok(())
            }
            Err(err) => {
                tracing::error!("profile save failed: {err}");
                Err(err)
            }
        }
    }

    /// Fetch the printable document for a persisted invoice. Failures
    /// propagate; nothing in the session changes either way.
    pub async fn download_document(&self, id: InvoiceId) -> Result<Vec<u8>, GatewayError> {
        self.gateway.render_document(id).await.map_err(|err| {
            tracing::error!(%id, "document retrieval failed: {err}");
            err
        })
    }

    /// Reads fail silently into safe defaults: a broken backend must never
    /// take down the editing surface.
    pub async fn refresh_invoices(&mut self) {
        self.invoices = match self.gateway.list().await {
            Ok(invoices) => invoices,
            Err(err) => {
                tracing::warn!("invoice list refresh failed: {err}");
                Vec::new()
            }
        };
    }

    pub async fn refresh_customers(&mut self) {
        self.customers = match self.gateway.customers().await {
            Ok(customers) => customers,
            Err(err) => {
                tracing::warn!("customer ledger refresh failed: {err}");
                Vec::new()
            }
        };
    }

    pub async fn refresh_summary(&mut self) {
        self.summary = match self.gateway.summary().await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!("sales summary refresh failed: {err}");
                SalesSummary::default()
            }
        };
    }

    pub async fn refresh_profile(&mut self) {
        self.profile = match self.gateway.fetch().await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("profile refresh failed: {err}");
                CompanyProfile::default()
            }
        };
    }

    /// The four read-side refreshes, run after a successful submission (and
    /// available to embedders on demand).
    pub async fn refresh_all(&mut self) {
        self.refresh_profile().await;
        self.refresh_invoices().await;
        self.refresh_customers().await;
        self.refresh_summary().await;
    }
}
