//! The submission gate.
//!
//! This is the only validation applied before a draft is handed to the
//! invoice store; every other field is optional by design.

use thiserror::Error;

use crate::draft::{InvoiceDraft, PaymentType};

/// Reasons a draft cannot be submitted. Surfaced to the user as a blocking
/// message; the draft itself is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("add a description to at least one line item")]
    MissingLineItemDescription,
    #[error("customer name is required for credit invoices")]
    MissingCustomerName,
}

impl InvoiceDraft {
    /// Decide whether this draft constitutes a submittable invoice.
    ///
    /// At least one item must carry a non-blank description, and a credit
    /// invoice must name its customer.
    pub fn validate_for_submission(&self) -> Result<(), ValidationError> {
        let any_described = self
            .items()
            .iter()
            .any(|item| !item.description().trim().is_empty());
        if !any_described {
            return Err(ValidationError::MissingLineItemDescription);
        }

        if self.payment_type() == PaymentType::Credit {
            let named = self
                .customer()
                .is_some_and(|customer| !customer.name.trim().is_empty());
            if !named {
                return Err(ValidationError::MissingCustomerName);
            }
        }

        Ok(())
    }
}
