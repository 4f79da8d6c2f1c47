//! HTTP implementation of the collaborator ports.
//!
//! Talks to the backend's `/api` routes. All port methods map non-2xx
//! statuses to [`GatewayError::Status`]; body decoding failures map to
//! [`GatewayError::Decode`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};

use billkhata_core::InvoiceId;
use billkhata_invoicing::{Customer, Invoice, InvoiceDraft, LineItem, PaymentType};
use billkhata_profile::{CompanyProfile, CompanyProfileInput};

use crate::blank_to_none;
use crate::error::GatewayError;
use crate::ports::{CustomerDirectory, InvoiceStore, ProfileStore, Reporting};
use crate::types::{CustomerSummary, SalesSummary};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST client for the backend service.
pub struct RestGateway {
    base_url: String,
    client: reqwest::Client,
}

impl RestGateway {
    /// `base_url` is the API root, e.g. `https://host/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.client.get(self.url(path)).send().await?;
        let response = ok_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let response = ok_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

fn ok_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status {
            code: status.as_u16(),
        })
    }
}

/// The invoice-create payload: the draft's numbers as computed, with empty
/// free-text fields sent as `null`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateInvoiceRequest<'a> {
    payment_type: PaymentType,
    customer: Option<&'a Customer>,
    items: &'a [LineItem],
    subtotal: Decimal,
    discount: Decimal,
    gst_rate: Decimal,
    gst_amount: Decimal,
    total: Decimal,
    notes: Option<String>,
    terms: Option<String>,
    due_date: Option<NaiveDate>,
}

impl<'a> From<&'a InvoiceDraft> for CreateInvoiceRequest<'a> {
    fn from(draft: &'a InvoiceDraft) -> Self {
        Self {
            payment_type: draft.payment_type(),
            customer: draft.customer(),
            items: draft.items(),
            subtotal: draft.subtotal(),
            discount: draft.discount(),
            gst_rate: draft.gst_rate(),
            gst_amount: draft.gst_amount(),
            total: draft.total(),
            notes: blank_to_none(draft.notes()),
            terms: blank_to_none(draft.terms()),
            due_date: draft.due_date(),
        }
    }
}

#[async_trait]
impl ProfileStore for RestGateway {
    async fn fetch(&self) -> Result<CompanyProfile, GatewayError> {
        self.get_json("/company-profile").await
    }

    async fn save(&self, input: &CompanyProfileInput) -> Result<CompanyProfile, GatewayError> {
        self.post_json("/company-profile", input).await
    }
}

#[async_trait]
impl InvoiceStore for RestGateway {
    async fn list(&self) -> Result<Vec<Invoice>, GatewayError> {
        self.get_json("/invoices").await
    }

    async fn create(&self, draft: &InvoiceDraft) -> Result<Invoice, GatewayError> {
        let request = CreateInvoiceRequest::from(draft);
        self.post_json("/invoices", &request).await
    }

    async fn render_document(&self, id: InvoiceId) -> Result<Vec<u8>, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/invoices/{id}/pdf")))
            .send()
            .await?;
        let response = ok_status(response)?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl CustomerDirectory for RestGateway {
    async fn customers(&self) -> Result<Vec<CustomerSummary>, GatewayError> {
        self.get_json("/customers").await
    }
}

#[async_trait]
impl Reporting for RestGateway {
    async fn summary(&self) -> Result<SalesSummary, GatewayError> {
        self.get_json("/reports/summary").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billkhata_invoicing::{CustomerField, ItemField};

    #[test]
    fn create_request_matches_backend_wire_shape() {
        let mut draft = InvoiceDraft::default();
        draft.set_payment_type(PaymentType::Credit);
        draft.set_customer_field(CustomerField::Name("Asha Traders".into()));
        draft
            .set_item_field(0, ItemField::Description("Widget".into()))
            .unwrap();
        draft
            .set_item_field(0, ItemField::Quantity(Decimal::from(2)))
            .unwrap();
        draft
            .set_item_field(0, ItemField::Rate(Decimal::from(50)))
            .unwrap();
        draft.set_discount("20");
        draft.set_gst_rate("18");
        draft.set_terms("Net 30");

        let request = CreateInvoiceRequest::from(&draft);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["payment_type"], serde_json::json!("Credit"));
        assert_eq!(json["customer"]["name"], serde_json::json!("Asha Traders"));
        assert_eq!(json["items"][0]["description"], serde_json::json!("Widget"));
        // Empty notes travel as null, never as "".
        assert_eq!(json["notes"], serde_json::Value::Null);
        assert_eq!(json["terms"], serde_json::json!("Net 30"));
        assert_eq!(json["due_date"], serde_json::Value::Null);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let gateway = RestGateway::new("http://localhost:8000/api/").unwrap();
        assert_eq!(
            gateway.url("/invoices"),
            "http://localhost:8000/api/invoices"
        );
    }
}
