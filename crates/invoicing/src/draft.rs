//! The invoice draft engine.
//!
//! [`InvoiceDraft`] owns the one in-progress invoice of a session and keeps
//! it internally consistent: every edit is synchronous, applies fully, and
//! leaves the derived fields (`subtotal`, `gst_amount`, `total`, per-row
//! `amount`) in agreement with [`compute_totals`](crate::totals::compute_totals).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use billkhata_core::lenient_decimal;

use crate::totals::compute_totals;

/// How the invoice is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Credit,
}

/// The billed party. Only meaningful for credit invoices; a cash sale
/// carries no customer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

/// One row of the invoice.
///
/// `amount` is derived (`quantity * rate`) and cannot be set independently;
/// the only writers are the row constructors and the draft's mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    description: String,
    quantity: Decimal,
    rate: Decimal,
    amount: Decimal,
}

impl LineItem {
    /// A fresh editable row: empty description, quantity 1, rate 0.
    pub fn blank() -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// An edit to a single line-item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    Description(String),
    Quantity(Decimal),
    Rate(Decimal),
}

/// An edit to a single customer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerField {
    Name(String),
    Mobile(String),
    Address(String),
}

/// Editing failures. Out-of-range indexes fail rather than clamp.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("line item index {index} out of range (items: {len})")]
    ItemIndexOutOfRange { index: usize, len: usize },
}

/// The in-progress invoice.
///
/// Fields are private so that every mutation flows through the named editing
/// operations below; after any of them returns, the draft's invariants hold:
/// derived fields agree with the arithmetic in `totals`, `items` is never
/// empty, and a cash draft carries no customer.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    payment_type: PaymentType,
    customer: Option<Customer>,
    items: Vec<LineItem>,
    discount: Decimal,
    gst_rate: Decimal,
    subtotal: Decimal,
    gst_amount: Decimal,
    total: Decimal,
    notes: String,
    terms: String,
    due_date: Option<NaiveDate>,
}

impl Default for InvoiceDraft {
    /// The empty template a session starts from (and resets to after a
    /// successful submission): cash sale, one blank row, everything zero.
    fn default() -> Self {
        Self {
            payment_type: PaymentType::Cash,
            customer: None,
            items: vec![LineItem::blank()],
            discount: Decimal::ZERO,
            gst_rate: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            gst_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            notes: String::new(),
            terms: String::new(),
            due_date: None,
        }
    }
}

impl InvoiceDraft {
    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn gst_rate(&self) -> Decimal {
        self.gst_rate
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn gst_amount(&self) -> Decimal {
        self.gst_amount
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn terms(&self) -> &str {
        &self.terms
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Update one field of `items[index]`.
    ///
    /// Quantity and rate edits recompute the row amount; negative values are
    /// floored at zero (both fields are specified non-negative). Every item
    /// edit ends in a full totals recompute.
    pub fn set_item_field(&mut self, index: usize, field: ItemField) -> Result<(), DraftError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(DraftError::ItemIndexOutOfRange { index, len })?;

        match field {
            ItemField::Description(text) => item.description = text,
            ItemField::Quantity(quantity) => {
                item.quantity = quantity.max(Decimal::ZERO);
                item.amount = item.quantity * item.rate;
            }
            ItemField::Rate(rate) => {
                item.rate = rate.max(Decimal::ZERO);
                item.amount = item.quantity * item.rate;
            }
        }

        self.recompute();
        Ok(())
    }

    /// Append a fresh blank row. Always succeeds.
    pub fn add_item(&mut self) {
        self.items.push(LineItem::blank());
        self.recompute();
    }

    /// Remove `items[index]`.
    ///
    /// Policy: an invoice always displays at least one row, so removal is a
    /// no-op while exactly one item remains.
    pub fn remove_item(&mut self, index: usize) -> Result<(), DraftError> {
        if self.items.len() == 1 {
            return Ok(());
        }
        let len = self.items.len();
        if index >= len {
            return Err(DraftError::ItemIndexOutOfRange { index, len });
        }
        self.items.remove(index);
        self.recompute();
        Ok(())
    }

    /// Set the absolute discount amount from raw user text.
    ///
    /// Malformed text coerces to zero (never an error); negative values are
    /// floored at zero since the discount is a non-negative amount.
    pub fn set_discount(&mut self, raw: &str) {
        self.discount = lenient_decimal(raw).max(Decimal::ZERO);
        self.recompute();
    }

    /// Set the GST rate (percent) from raw user text.
    ///
    /// Same parse-or-zero coercion as the discount. The expected domain is
    /// 0–100 but out-of-range values are accepted; hinting is a UI concern.
    pub fn set_gst_rate(&mut self, raw: &str) {
        self.gst_rate = lenient_decimal(raw);
        self.recompute();
    }

    /// Toggle between cash and credit.
    ///
    /// Switching to cash unconditionally discards the customer; switching to
    /// credit leaves whatever customer data exists untouched.
    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        if payment_type == PaymentType::Cash {
            self.customer = None;
        }
        self.payment_type = payment_type;
    }

    /// Update one customer field, creating the record on first write.
    ///
    /// Tolerated regardless of payment type; only `set_payment_type(Cash)`
    /// clears the record.
    pub fn set_customer_field(&mut self, field: CustomerField) {
        let customer = self.customer.get_or_insert_with(Customer::default);
        match field {
            CustomerField::Name(name) => customer.name = name,
            CustomerField::Mobile(mobile) => customer.mobile = blank_to_none(mobile),
            CustomerField::Address(address) => customer.address = blank_to_none(address),
        }
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_terms(&mut self, terms: impl Into<String>) {
        self.terms = terms.into();
    }

    fn recompute(&mut self) {
        let totals = compute_totals(&self.items, self.discount, self.gst_rate);
        self.subtotal = totals.subtotal;
        self.gst_amount = totals.gst_amount;
        self.total = totals.total;
    }
}

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::compute_totals;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    /// A draft with one "Widget" row: qty 2 @ 50.
    fn widget_draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::default();
        draft
            .set_item_field(0, ItemField::Description("Widget".into()))
            .unwrap();
        draft
            .set_item_field(0, ItemField::Quantity(Decimal::from(2)))
            .unwrap();
        draft
            .set_item_field(0, ItemField::Rate(Decimal::from(50)))
            .unwrap();
        draft
    }

    #[test]
    fn empty_template_shape() {
        let draft = InvoiceDraft::default();
        assert_eq!(draft.payment_type(), PaymentType::Cash);
        assert!(draft.customer().is_none());
        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.items()[0], LineItem::blank());
        assert_eq!(draft.discount(), Decimal::ZERO);
        assert_eq!(draft.gst_rate(), Decimal::ZERO);
        assert_eq!(draft.subtotal(), Decimal::ZERO);
        assert_eq!(draft.total(), Decimal::ZERO);
        assert!(draft.due_date().is_none());
    }

    #[test]
    fn item_edits_keep_row_amount_derived() {
        let draft = widget_draft();
        assert_eq!(draft.items()[0].amount(), Decimal::from(100));
        assert_eq!(draft.subtotal(), Decimal::from(100));
    }

    #[test]
    fn scenario_full_gst() {
        let mut draft = widget_draft();
        draft.set_gst_rate("18");
        assert_eq!(draft.subtotal(), Decimal::from(100));
        assert_eq!(draft.gst_amount(), Decimal::from(18));
        assert_eq!(draft.total(), Decimal::from(118));
    }

    #[test]
    fn scenario_discounted_gst() {
        let mut draft = widget_draft();
        draft.set_gst_rate("18");
        draft.set_discount("20");
        assert_eq!(draft.subtotal(), Decimal::from(100));
        assert_eq!(draft.gst_amount(), dec("14.4"));
        assert_eq!(draft.total(), dec("94.4"));
    }

    #[test]
    fn out_of_range_item_edit_fails() {
        let mut draft = InvoiceDraft::default();
        let err = draft
            .set_item_field(3, ItemField::Rate(Decimal::from(10)))
            .unwrap_err();
        assert_eq!(err, DraftError::ItemIndexOutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn remove_item_is_noop_on_last_row() {
        let mut draft = widget_draft();
        draft.set_gst_rate("18");
        let before = draft.clone();
        draft.remove_item(0).unwrap();
        assert_eq!(draft, before);
    }

    #[test]
    fn remove_item_drops_row_and_recomputes() {
        let mut draft = widget_draft();
        draft.add_item();
        draft
            .set_item_field(1, ItemField::Rate(Decimal::from(25)))
            .unwrap();
        assert_eq!(draft.subtotal(), Decimal::from(125));

        draft.remove_item(1).unwrap();
        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.subtotal(), Decimal::from(100));
    }

    #[test]
    fn remove_item_out_of_range_fails_when_removal_is_possible() {
        let mut draft = widget_draft();
        draft.add_item();
        let err = draft.remove_item(7).unwrap_err();
        assert_eq!(err, DraftError::ItemIndexOutOfRange { index: 7, len: 2 });
    }

    #[test]
    fn lenient_parse_law_for_discount_and_gst() {
        let mut garbage = widget_draft();
        garbage.set_discount("abc");
        garbage.set_gst_rate("");

        let mut zeroes = widget_draft();
        zeroes.set_discount("0");
        zeroes.set_gst_rate("0");

        assert_eq!(garbage, zeroes);
    }

    #[test]
    fn negative_discount_floors_at_zero() {
        let mut draft = widget_draft();
        draft.set_discount("-50");
        assert_eq!(draft.discount(), Decimal::ZERO);
        assert_eq!(draft.total(), Decimal::from(100));
    }

    #[test]
    fn gst_rate_outside_expected_domain_is_accepted() {
        let mut draft = widget_draft();
        draft.set_gst_rate("150");
        assert_eq!(draft.gst_rate(), Decimal::from(150));
        assert_eq!(draft.gst_amount(), Decimal::from(150));
    }

    #[test]
    fn switching_to_cash_discards_customer() {
        let mut draft = InvoiceDraft::default();
        draft.set_payment_type(PaymentType::Credit);
        draft.set_customer_field(CustomerField::Name("Asha Traders".into()));
        draft.set_customer_field(CustomerField::Mobile("9876543210".into()));
        assert!(draft.customer().is_some());

        draft.set_payment_type(PaymentType::Cash);
        assert!(draft.customer().is_none());
    }

    #[test]
    fn switching_to_credit_preserves_existing_customer() {
        let mut draft = InvoiceDraft::default();
        draft.set_customer_field(CustomerField::Name("Asha Traders".into()));
        let before = draft.customer().cloned();

        draft.set_payment_type(PaymentType::Credit);
        assert_eq!(draft.customer().cloned(), before);
    }

    #[test]
    fn customer_record_created_on_first_write() {
        let mut draft = InvoiceDraft::default();
        draft.set_customer_field(CustomerField::Address("12 MG Road".into()));
        let customer = draft.customer().unwrap();
        assert_eq!(customer.name, "");
        assert_eq!(customer.address.as_deref(), Some("12 MG Road"));
    }

    #[test]
    fn blank_mobile_clears_to_none() {
        let mut draft = InvoiceDraft::default();
        draft.set_customer_field(CustomerField::Mobile("98765".into()));
        draft.set_customer_field(CustomerField::Mobile("  ".into()));
        assert!(draft.customer().unwrap().mobile.is_none());
    }

    #[test]
    fn free_text_writers_do_not_touch_totals() {
        let mut draft = widget_draft();
        draft.set_gst_rate("18");
        let total = draft.total();

        draft.set_notes("Deliver before Friday");
        draft.set_terms("Net 30");
        draft.set_due_date(NaiveDate::from_ymd_opt(2026, 9, 15));
        assert_eq!(draft.total(), total);
    }

    #[test]
    fn payment_type_serializes_to_backend_strings() {
        assert_eq!(
            serde_json::to_value(PaymentType::Cash).unwrap(),
            serde_json::json!("Cash")
        );
        assert_eq!(
            serde_json::to_value(PaymentType::Credit).unwrap(),
            serde_json::json!("Credit")
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// One step of an arbitrary editing session.
        #[derive(Debug, Clone)]
        enum Edit {
            Describe(usize, String),
            Quantity(usize, i64),
            Rate(usize, i64),
            Add,
            Remove(usize),
            Discount(String),
            GstRate(String),
        }

        fn edit_strategy() -> impl Strategy<Value = Edit> {
            prop_oneof![
                (0usize..6, "[a-zA-Z ]{0,12}").prop_map(|(i, s)| Edit::Describe(i, s)),
                (0usize..6, -50i64..500).prop_map(|(i, q)| Edit::Quantity(i, q)),
                (0usize..6, -50i64..10_000).prop_map(|(i, r)| Edit::Rate(i, r)),
                Just(Edit::Add),
                (0usize..6).prop_map(Edit::Remove),
                "[0-9a-z.]{0,6}".prop_map(Edit::Discount),
                "[0-9a-z.]{0,6}".prop_map(Edit::GstRate),
            ]
        }

        fn apply(draft: &mut InvoiceDraft, edit: Edit) {
            // Out-of-range indexes are allowed to fail; the property is about
            // the state the draft is left in, not about the edit succeeding.
            match edit {
                Edit::Describe(i, s) => {
                    let _ = draft.set_item_field(i, ItemField::Description(s));
                }
                Edit::Quantity(i, q) => {
                    let _ = draft.set_item_field(i, ItemField::Quantity(Decimal::from(q)));
                }
                Edit::Rate(i, r) => {
                    let _ = draft.set_item_field(i, ItemField::Rate(Decimal::from(r)));
                }
                Edit::Add => draft.add_item(),
                Edit::Remove(i) => {
                    let _ = draft.remove_item(i);
                }
                Edit::Discount(raw) => draft.set_discount(&raw),
                Edit::GstRate(raw) => draft.set_gst_rate(&raw),
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: after every edit in any sequence, the stored derived
            /// fields agree with a fresh `compute_totals`, per-row amounts are
            /// `quantity * rate`, and at least one row remains.
            #[test]
            fn invariants_hold_after_every_edit(
                edits in prop::collection::vec(edit_strategy(), 1..40)
            ) {
                let mut draft = InvoiceDraft::default();

                for edit in edits {
                    apply(&mut draft, edit);

                    prop_assert!(!draft.items().is_empty());
                    for item in draft.items() {
                        prop_assert_eq!(item.amount(), item.quantity() * item.rate());
                    }

                    let totals = compute_totals(draft.items(), draft.discount(), draft.gst_rate());
                    prop_assert_eq!(totals.subtotal, draft.subtotal());
                    prop_assert_eq!(totals.gst_amount, draft.gst_amount());
                    prop_assert_eq!(totals.total, draft.total());
                    prop_assert!(draft.discount() >= Decimal::ZERO);
                }
            }

            /// Property: switching to cash always leaves the customer absent,
            /// whatever was entered before.
            #[test]
            fn cash_always_clears_customer(
                name in "[a-zA-Z ]{0,16}",
                mobile in "[0-9]{0,10}",
            ) {
                let mut draft = InvoiceDraft::default();
                draft.set_payment_type(PaymentType::Credit);
                draft.set_customer_field(CustomerField::Name(name));
                draft.set_customer_field(CustomerField::Mobile(mobile));

                draft.set_payment_type(PaymentType::Cash);
                prop_assert!(draft.customer().is_none());
            }
        }
    }
}
