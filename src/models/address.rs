//! Postal addresses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Street type abbreviations expanded when formatting free-text addresses
const STREET_TYPES: &[(&str, &str)] = &[
    ("st", "Street"),
    ("ave", "Avenue"),
    ("blvd", "Boulevard"),
    ("rd", "Road"),
    ("ln", "Lane"),
    ("dr", "Drive"),
    ("ct", "Court"),
    ("ter", "Terrace"),
    ("pl", "Place"),
    ("way", "Way"),
    ("pkwy", "Parkway"),
    ("cir", "Circle"),
    ("sq", "Square"),
    ("hwy", "Highway"),
    ("bend", "Bend"),
    ("cove", "Cove"),
];

const US_STATES: &[&str] = &[
    "al", "ak", "az", "ar", "ca", "co", "ct", "de", "fl", "ga", "hi", "id", "il", "in", "ia",
    "ks", "ky", "la", "me", "md", "ma", "mi", "mn", "ms", "mo", "mt", "ne", "nv", "nh", "nj",
    "nm", "ny", "nc", "nd", "oh", "ok", "or", "pa", "ri", "sc", "sd", "tn", "tx", "ut", "vt",
    "va", "wa", "wv", "wi", "wy",
];

/// A physical address, optionally with an estimated property value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    /// Estimated property value in USD
    pub zestimate: Option<f64>,
}

impl Address {
    /// Address holding only a free-text street line, formatted
    pub fn from_text(text: &str) -> Self {
        Self {
            street: format_address(text),
            ..Self::default()
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = std::iter::once(self.street.as_str())
            .chain(
                [&self.city, &self.state, &self.postal_code, &self.country]
                    .into_iter()
                    .filter_map(|part| part.as_deref())
                    .filter(|part| !part.is_empty()),
            )
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Normalize a free-text address line
///
/// Words are title-cased, street type abbreviations are expanded and a
/// trailing US state abbreviation (optionally followed by a ZIP code) is
/// upper-cased.
pub fn format_address(raw: &str) -> String {
    let mut parts: Vec<Vec<String>> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.split_whitespace().map(format_word).collect())
        .collect();

    if let Some(last) = parts.last_mut() {
        let state_index = match last.as_slice() {
            [.., _, zip] if is_all_digits(zip) => Some(last.len() - 2),
            [.., word] if !is_all_digits(word) => Some(last.len() - 1),
            _ => None,
        };
        if let Some(i) = state_index {
            let lower = last[i].to_lowercase();
            if US_STATES.contains(&lower.as_str()) {
                last[i] = lower.to_uppercase();
            }
        }
    }

    parts
        .iter()
        .map(|words| words.join(" "))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_word(word: &str) -> String {
    let lower = word.to_lowercase();
    STREET_TYPES
        .iter()
        .find(|(abbr, _)| *abbr == lower)
        .map_or_else(|| title_case(word), |(_, full)| (*full).to_string())
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
