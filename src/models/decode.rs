//! Payload decoding
//!
//! Wire shapes are private; only the typed results leave this module.

use super::{
    Address, DomainSearchResult, EmailSearchResult, JsonObject, PhoneNumber, PhoneSearchResult,
};
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Date formats accepted for date of birth
const DOB_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

#[derive(Debug, Deserialize)]
struct PersonPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dob: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    addresses: Vec<AddressPayload>,
    #[serde(default, alias = "phone_numbers", deserialize_with = "null_as_default")]
    numbers: Vec<String>,
    #[serde(default)]
    extra_info: Option<JsonObject>,
}

#[derive(Debug, Deserialize)]
struct DomainPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<DomainEntryPayload>,
}

#[derive(Debug, Deserialize)]
struct DomainEntryPayload {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dob: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    addresses: Vec<AddressPayload>,
    #[serde(default, alias = "numbers", deserialize_with = "null_as_default")]
    phone_numbers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AddressPayload {
    Text(String),
    Structured {
        #[serde(default)]
        street: String,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        state: Option<String>,
        #[serde(default)]
        postal_code: Option<String>,
        #[serde(default)]
        country: Option<String>,
        #[serde(default)]
        zestimate: Option<Value>,
    },
}

impl AddressPayload {
    fn into_address(self) -> Result<Address> {
        match self {
            AddressPayload::Text(text) => Ok(Address::from_text(&text)),
            AddressPayload::Structured {
                street,
                city,
                state,
                postal_code,
                country,
                zestimate,
            } => Ok(Address {
                street,
                city,
                state,
                postal_code,
                country,
                zestimate: zestimate.map(parse_zestimate).transpose()?.flatten(),
            }),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_zestimate(value: Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',')).collect();
            cleaned
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::decode(format!("Invalid zestimate value '{s}'")))
        }
        other => Err(Error::decode(format!("Invalid zestimate value {other}"))),
    }
}

/// Parse a date of birth; unrecognised formats yield `None`
pub(crate) fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = DOB_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    debug!("Unrecognised date of birth format: {}", raw);
    None
}

/// Parse the body and reject payloads that carry an `error` field
fn parse_body(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body)?;

    match value.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) => return Err(Error::api(message.clone())),
        Some(other) => return Err(Error::api(other.to_string())),
    }

    if !value.is_object() {
        return Err(Error::decode("Expected a JSON object"));
    }

    Ok(value)
}

fn convert_addresses(addresses: Vec<AddressPayload>) -> Result<Vec<Address>> {
    addresses
        .into_iter()
        .map(AddressPayload::into_address)
        .collect()
}

fn convert_numbers(numbers: &[String]) -> Vec<PhoneNumber> {
    numbers.iter().map(|n| PhoneNumber::parse(n)).collect()
}

pub(crate) fn email_result(email: &str, body: &str) -> Result<EmailSearchResult> {
    let payload: PersonPayload = serde_json::from_value(parse_body(body)?)?;

    Ok(EmailSearchResult {
        email: email.to_string(),
        name: payload.name,
        dob: payload.dob.as_deref().and_then(parse_dob),
        addresses: convert_addresses(payload.addresses)?,
        phone_numbers: convert_numbers(&payload.numbers),
        extra_info: payload.extra_info,
    })
}

pub(crate) fn phone_result(phone: PhoneNumber, body: &str) -> Result<PhoneSearchResult> {
    let payload: PersonPayload = serde_json::from_value(parse_body(body)?)?;

    Ok(PhoneSearchResult {
        phone,
        name: payload.name,
        dob: payload.dob.as_deref().and_then(parse_dob),
        addresses: convert_addresses(payload.addresses)?,
        phone_numbers: convert_numbers(&payload.numbers),
        extra_info: payload.extra_info,
    })
}

pub(crate) fn domain_result(domain: &str, body: &str) -> Result<DomainSearchResult> {
    let payload: DomainPayload = serde_json::from_value(parse_body(body)?)?;

    let results = payload
        .results
        .into_iter()
        .map(|entry| {
            Ok(EmailSearchResult {
                email: entry.email,
                name: entry.name,
                dob: entry.dob.as_deref().and_then(parse_dob),
                addresses: convert_addresses(entry.addresses)?,
                phone_numbers: convert_numbers(&entry.phone_numbers),
                extra_info: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DomainSearchResult {
        domain: domain.to_string(),
        total_results: results.len(),
        results,
    })
}
