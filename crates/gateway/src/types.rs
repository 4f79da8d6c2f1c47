//! Read-side shapes returned by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the customer ledger: aggregates over a customer's invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub name: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    /// Sum of credit invoice totals.
    pub total_credit: Decimal,
    pub amount_paid: Decimal,
    /// `total_credit - amount_paid`.
    pub outstanding: Decimal,
    pub invoice_count: u64,
}

/// Sales aggregates for one reporting window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_sales: Decimal,
    pub cash_sales: Decimal,
    pub credit_sales: Decimal,
    pub invoice_count: u64,
}

/// The dashboard summary: today, this month, and total credit outstanding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub today: PeriodSummary,
    pub this_month: PeriodSummary,
    pub total_outstanding: Decimal,
}
