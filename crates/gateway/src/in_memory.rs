//! In-memory implementation of the collaborator ports.
//!
//! A faithful stand-in for the backend: it assigns invoice numbers the same
//! way (monthly sequence), applies the same settlement rules (cash sales are
//! paid at creation), and derives the customer ledger and sales summary with
//! the same aggregation rules. Used by session tests and embedders that want
//! an offline mode.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use billkhata_core::{InvoiceId, format_date, format_inr};
use billkhata_invoicing::{Invoice, InvoiceDraft, InvoiceStatus, PaymentType};
use billkhata_profile::{CompanyProfile, CompanyProfileInput};

use crate::blank_to_none;
use crate::error::GatewayError;
use crate::ports::{CustomerDirectory, InvoiceStore, ProfileStore, Reporting};
use crate::types::{CustomerSummary, PeriodSummary, SalesSummary};

#[derive(Debug, Default)]
struct State {
    invoices: Vec<Invoice>,
    profile: Option<CompanyProfile>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory backend with failure injection for exercising error paths.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read-side call fail until cleared.
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    /// Make invoice creation and profile saves fail until cleared.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }
}

/// Monthly sequence: `INV/{year}/{month}/{seq}`, seq counting invoices
/// already dated in the same month.
fn next_invoice_number(invoices: &[Invoice], today: NaiveDate) -> String {
    let seq = invoices
        .iter()
        .filter(|invoice| {
            invoice.invoice_date.year() == today.year()
                && invoice.invoice_date.month() == today.month()
        })
        .count()
        + 1;
    format!("INV/{}/{:02}/{:03}", today.year(), today.month(), seq)
}

fn unavailable() -> GatewayError {
    GatewayError::Status { code: 503 }
}

fn add_to_period(period: &mut PeriodSummary, invoice: &Invoice) {
    period.total_sales += invoice.total;
    match invoice.payment_type {
        PaymentType::Cash => period.cash_sales += invoice.total,
        PaymentType::Credit => period.credit_sales += invoice.total,
    }
    period.invoice_count += 1;
}

/// Plain-text stand-in for the backend's PDF payload. The core treats the
/// document as opaque bytes either way.
fn render_text_document(invoice: &Invoice, profile: &CompanyProfile) -> Vec<u8> {
    let mut doc = String::new();
    let _ = writeln!(doc, "{}", profile.name);
    let _ = writeln!(doc, "INVOICE {}", invoice.invoice_number);
    let _ = writeln!(doc, "Date: {}", format_date(invoice.invoice_date));
    if let Some(due) = invoice.due_date {
        let _ = writeln!(doc, "Due Date: {}", format_date(due));
    }
    let _ = writeln!(doc, "Bill To: {}", invoice.customer_display_name());
    for item in &invoice.items {
        let _ = writeln!(
            doc,
            "{} x{} @ {} = {}",
            item.description(),
            item.quantity(),
            format_inr(item.rate()),
            format_inr(item.amount()),
        );
    }
    let _ = writeln!(doc, "Subtotal: {}", format_inr(invoice.subtotal));
    if invoice.discount > Decimal::ZERO {
        let _ = writeln!(doc, "Discount: {}", format_inr(invoice.discount));
    }
    if !invoice.gst_amount.is_zero() {
        let _ = writeln!(
            doc,
            "GST ({}%): {}",
            invoice.gst_rate,
            format_inr(invoice.gst_amount)
        );
    }
    let _ = writeln!(doc, "Total: {}", format_inr(invoice.total));
    let _ = writeln!(doc, "Payment Type: {:?}", invoice.payment_type);
    let _ = writeln!(doc, "{}", profile.footer_text);
    doc.into_bytes()
}

#[async_trait]
impl ProfileStore for InMemoryBackend {
    async fn fetch(&self) -> Result<CompanyProfile, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(unavailable());
        }
        Ok(state.profile.clone().unwrap_or_default())
    }

    async fn save(&self, input: &CompanyProfileInput) -> Result<CompanyProfile, GatewayError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(unavailable());
        }
        let mut profile = state.profile.take().unwrap_or_default();
        profile.apply(input);
        state.profile = Some(profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Invoice>, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(unavailable());
        }
        Ok(state.invoices.clone())
    }

    async fn create(&self, draft: &InvoiceDraft) -> Result<Invoice, GatewayError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(unavailable());
        }

        let now = Utc::now();
        let today = now.date_naive();
        let (status, amount_paid) = match draft.payment_type() {
            PaymentType::Cash => (InvoiceStatus::Paid, draft.total()),
            PaymentType::Credit => (InvoiceStatus::Unpaid, Decimal::ZERO),
        };

        let invoice = Invoice {
            id: InvoiceId::new(),
            invoice_number: next_invoice_number(&state.invoices, today),
            invoice_date: today,
            due_date: draft.due_date(),
            payment_type: draft.payment_type(),
            customer: draft.customer().cloned(),
            items: draft.items().to_vec(),
            subtotal: draft.subtotal(),
            discount: draft.discount(),
            gst_rate: draft.gst_rate(),
            gst_amount: draft.gst_amount(),
            total: draft.total(),
            notes: blank_to_none(draft.notes()),
            terms: blank_to_none(draft.terms()),
            created_at: now,
            status,
            amount_paid,
        };

        state.invoices.push(invoice.clone());
        Ok(invoice)
    }

    async fn render_document(&self, id: InvoiceId) -> Result<Vec<u8>, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(unavailable());
        }
        let invoice = state
            .invoices
            .iter()
            .find(|invoice| invoice.id == id)
            .ok_or(GatewayError::Status { code: 404 })?;
        let profile = state.profile.clone().unwrap_or_default();
        Ok(render_text_document(invoice, &profile))
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryBackend {
    async fn customers(&self) -> Result<Vec<CustomerSummary>, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(unavailable());
        }

        let mut by_name: BTreeMap<String, CustomerSummary> = BTreeMap::new();
        for invoice in &state.invoices {
            let Some(customer) = &invoice.customer else {
                continue;
            };
            let entry = by_name
                .entry(customer.name.clone())
                .or_insert_with(|| CustomerSummary {
                    name: customer.name.clone(),
                    mobile: customer.mobile.clone(),
                    address: customer.address.clone(),
                    total_credit: Decimal::ZERO,
                    amount_paid: Decimal::ZERO,
                    outstanding: Decimal::ZERO,
                    invoice_count: 0,
                });
            if invoice.payment_type == PaymentType::Credit {
                entry.total_credit += invoice.total;
            }
            entry.amount_paid += invoice.amount_paid;
            entry.outstanding = entry.total_credit - entry.amount_paid;
            entry.invoice_count += 1;
        }

        Ok(by_name.into_values().collect())
    }
}

#[async_trait]
impl Reporting for InMemoryBackend {
    async fn summary(&self) -> Result<SalesSummary, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(unavailable());
        }

        let today = Utc::now().date_naive();
        let mut summary = SalesSummary::default();
        for invoice in &state.invoices {
            if invoice.invoice_date == today {
                add_to_period(&mut summary.today, invoice);
            }
            let created = invoice.created_at.date_naive();
            if created.year() == today.year() && created.month() == today.month() {
                add_to_period(&mut summary.this_month, invoice);
            }
            if invoice.payment_type == PaymentType::Credit {
                summary.total_outstanding += invoice.outstanding();
            }
        }

        Ok(summary)
    }
}
