//! Request fingerprints
//!
//! Two requests that differ only cosmetically (case, surrounding whitespace,
//! phone punctuation, parameter order) must produce the same key.

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim and lowercase a domain name
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

/// Keep only the ASCII digits of a phone number
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Normalize a parameter value according to its name
pub fn normalize_param(name: &str, value: &str) -> String {
    match name {
        "email" => normalize_email(value),
        "domain" => normalize_domain(value),
        "phone" => normalize_phone(value),
        _ => value.trim().to_string(),
    }
}

/// Percent-encode the characters that delimit a key
fn escape(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '?' => out.push_str("%3F"),
            _ => out.push(c),
        }
    }
    out
}

/// Deterministic cache key for an operation and its parameters
///
/// Produces `"<operation>?<name>=<value>&..."` with names lowercased,
/// values normalized by [`normalize_param`] and pairs sorted by name.
/// Separator characters inside names and values are percent-encoded, so
/// distinct parameter lists never share a key.
pub fn key_for(operation: &str, params: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| {
            let name = name.trim().to_lowercase();
            let value = normalize_param(&name, value);
            (escape(&name), escape(&value))
        })
        .collect();
    pairs.sort();

    let query = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", escape(&operation.trim().to_lowercase()), query)
}
