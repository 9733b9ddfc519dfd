//! Typed search results
//!
//! The service returns loosely shaped JSON; [`decode`] turns it into the
//! structs below, failing with a decode error when the shape is wrong.

mod address;
pub(crate) mod decode;
mod phone;

pub use address::{format_address, Address};
pub use phone::PhoneNumber;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// JSON object type
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Result of an email lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSearchResult {
    pub email: String,
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub addresses: Vec<Address>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub extra_info: Option<JsonObject>,
}

/// Result of a phone lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneSearchResult {
    pub phone: PhoneNumber,
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub addresses: Vec<Address>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub extra_info: Option<JsonObject>,
}

/// Result of a domain lookup: one entry per address found on the domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSearchResult {
    pub domain: String,
    pub results: Vec<EmailSearchResult>,
    pub total_results: usize,
}

/// Any search result, as stored in the client cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResult {
    Email(EmailSearchResult),
    Phone(PhoneSearchResult),
    Domain(DomainSearchResult),
}

impl SearchResult {
    pub fn into_email(self) -> Option<EmailSearchResult> {
        match self {
            SearchResult::Email(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_phone(self) -> Option<PhoneSearchResult> {
        match self {
            SearchResult::Phone(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_domain(self) -> Option<DomainSearchResult> {
        match self {
            SearchResult::Domain(result) => Some(result),
            _ => None,
        }
    }
}

impl From<EmailSearchResult> for SearchResult {
    fn from(result: EmailSearchResult) -> Self {
        SearchResult::Email(result)
    }
}

impl From<PhoneSearchResult> for SearchResult {
    fn from(result: PhoneSearchResult) -> Self {
        SearchResult::Phone(result)
    }
}

impl From<DomainSearchResult> for SearchResult {
    fn from(result: DomainSearchResult) -> Self {
        SearchResult::Domain(result)
    }
}

#[cfg(test)]
mod tests;
