//! Company profile: the singleton configuration record printed on invoices.
//!
//! No derived fields and no engine rules here; the record shares the same
//! "load, edit, persist wholesale" shape as the rest of the app but is kept
//! out of the draft engine.

pub mod profile;

pub use profile::{CompanyProfile, CompanyProfileInput};
