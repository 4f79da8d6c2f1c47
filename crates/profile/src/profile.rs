//! The company profile record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billkhata_core::ProfileId;

fn default_footer_text() -> String {
    "Thank you for your business!".to_string()
}

/// Singleton-per-tenant company details, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: ProfileId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
    pub bank_details: Option<String>,
    #[serde(default = "default_footer_text")]
    pub footer_text: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for CompanyProfile {
    /// The placeholder profile shown before the tenant has saved one.
    fn default() -> Self {
        Self {
            id: ProfileId::new(),
            name: "Your Company Name".to_string(),
            phone: None,
            email: None,
            address: None,
            gstin: None,
            bank_details: None,
            footer_text: default_footer_text(),
            updated_at: Utc::now(),
        }
    }
}

/// The wholesale-save payload: every editable field at once. There is no
/// per-field patching for the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfileInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
    pub bank_details: Option<String>,
    #[serde(default = "default_footer_text")]
    pub footer_text: String,
}

impl CompanyProfileInput {
    /// Start an edit from the current record.
    pub fn from_profile(profile: &CompanyProfile) -> Self {
        Self {
            name: profile.name.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            address: profile.address.clone(),
            gstin: profile.gstin.clone(),
            bank_details: profile.bank_details.clone(),
            footer_text: profile.footer_text.clone(),
        }
    }
}

impl CompanyProfile {
    /// Replace every editable field from the input and stamp the update time.
    pub fn apply(&mut self, input: &CompanyProfileInput) {
        self.name = input.name.clone();
        self.phone = input.phone.clone();
        self.email = input.email.clone();
        self.address = input.address.clone();
        self.gstin = input.gstin.clone();
        self.bank_details = input.bank_details.clone();
        self.footer_text = input.footer_text.clone();
        self.updated_at = Utc::now();
    }
}
