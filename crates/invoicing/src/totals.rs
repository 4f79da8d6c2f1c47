//! Derived monetary fields.
//!
//! Every mutator that touches items, discount, or GST rate routes through
//! [`compute_totals`]; nothing else in the workspace performs this arithmetic.
//! Every edit triggers a full recompute, never an incremental delta.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::draft::LineItem;

/// The three derived monetary fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub gst_amount: Decimal,
    pub total: Decimal,
}

/// Single source of truth for the invoice arithmetic.
///
/// GST is computed on the discounted base. The base is **not** clamped at
/// zero: a discount larger than the subtotal produces a negative base, a
/// negative GST amount, and a negative total.
pub fn compute_totals(items: &[LineItem], discount: Decimal, gst_rate: Decimal) -> Totals {
    let subtotal: Decimal = items.iter().map(LineItem::amount).sum();
    let base = subtotal - discount;
    let gst_amount = base * gst_rate / Decimal::ONE_HUNDRED;
    Totals {
        subtotal,
        gst_amount,
        total: base + gst_amount,
    }
}
