//! Decimal coercion and locale display helpers.
//!
//! Monetary values are kept as plain [`Decimal`]s everywhere in the engine;
//! the formatting functions here are display-layer only and never feed back
//! into stored state.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Lenient numeric coercion for free-text-adjacent input fields.
///
/// Live-editing fields (discount, GST rate) send whatever the user has typed
/// so far; malformed text is treated as zero rather than surfaced as an error.
pub fn lenient_decimal(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Format an amount as Indian Rupees with Indian digit grouping.
///
/// `1234567.891` renders as `₹12,34,567.89`; negative amounts as `-₹…`.
pub fn format_inr(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}₹{}.{frac_part}", group_indian(int_part))
}

/// Dates are shown in the `dd-mm-YYYY` form used on invoices.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Indian grouping: the last three digits form one group, the rest pair up.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
