//! Persisted invoice records, as returned by the backend.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billkhata_core::InvoiceId;

use crate::draft::{Customer, LineItem, PaymentType};

/// Settlement state assigned by the backend (cash sales are `Paid` at
/// creation; credit sales start `Unpaid`). Unknown values decode as `Unpaid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Partial,
    #[serde(other)]
    Unpaid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Partial => "Partial",
            InvoiceStatus::Unpaid => "Unpaid",
        }
    }
}

/// A persisted invoice.
///
/// The numbers are exactly what the draft computed at submission time; the
/// backend adds identity (`id`, `invoice_number`), dates, and the settlement
/// fields (`status`, `amount_paid`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payment_type: PaymentType,
    pub customer: Option<Customer>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub gst_rate: Decimal,
    pub gst_amount: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub amount_paid: Decimal,
}

impl Invoice {
    /// Amount still owed on this invoice.
    pub fn outstanding(&self) -> Decimal {
        self.total - self.amount_paid
    }

    /// Name shown in invoice lists: the customer, or `"Cash Sale"` when the
    /// invoice carries no customer record.
    pub fn customer_display_name(&self) -> &str {
        self.customer
            .as_ref()
            .map(|customer| customer.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Cash Sale")
    }
}
