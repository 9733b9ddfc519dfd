//! Tests for result models and payload decoding

use super::decode::{domain_result, email_result, parse_dob, phone_result};
use super::*;
use crate::error::ErrorKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Addresses
// ============================================================================

#[test_case("123 main st, springfield, il 62704", "123 Main Street, Springfield, IL 62704" ; "state with zip")]
#[test_case("42 ocean ave, miami, fl", "42 Ocean Avenue, Miami, FL" ; "state without zip")]
#[test_case("  7 PARK BLVD ,, Austin , TX 73301 ", "7 Park Boulevard, Austin, TX 73301" ; "extra separators")]
#[test_case("9 elm dr, london, uk", "9 Elm Drive, London, Uk" ; "non us region")]
#[test_case("", "" ; "empty")]
fn test_format_address(raw: &str, expected: &str) {
    assert_eq!(format_address(raw), expected);
}

#[test]
fn test_address_display() {
    let address = Address {
        street: "1 Infinite Loop".to_string(),
        city: Some("Cupertino".to_string()),
        state: Some("CA".to_string()),
        postal_code: Some("95014".to_string()),
        country: None,
        zestimate: None,
    };
    assert_eq!(address.to_string(), "1 Infinite Loop, Cupertino, CA, 95014");
}

// ============================================================================
// Phone numbers
// ============================================================================

#[test_case("(212) 234-5678", "+12122345678", true ; "us ten digit")]
#[test_case("1-212-234-5678", "+12122345678", true ; "us with trunk prefix")]
#[test_case("+1 212 234 5678", "+12122345678", true ; "us international form")]
#[test_case("+44 20 7946 0958", "+442079460958", true ; "uk international")]
#[test_case("(055) 234-5678", "+10552345678", false ; "bad area code")]
#[test_case("12345", "12345", false ; "too short")]
#[test_case("+1 555 555 5555", "+15555555555", false ; "non geographic area code")]
#[test_case("(212) 911-4567", "+12129114567", false ; "service code exchange")]
#[test_case("(292) 234-5678", "+12922345678", false ; "reserved expansion area code")]
#[test_case("(372) 234-5678", "+13722345678", false ; "reserved 37x area code")]
#[test_case("+883 1234 5678 9", "+883 1234 5678 9", false ; "unassigned calling code")]
#[test_case("+44 20 79", "+44 20 79", false ; "national number too short")]
#[test_case("+49 30 1234567", "+49301234567", true ; "germany")]
fn test_phone_parse(raw: &str, number: &str, valid: bool) {
    let phone = PhoneNumber::parse(raw);
    assert_eq!(phone.number, number);
    assert_eq!(phone.is_valid, valid);
}

#[test_case("2122345678", Some("US") ; "north american")]
#[test_case("+442079460958", Some("GB") ; "united kingdom")]
#[test_case("+81 3 1234 5678", Some("JP") ; "japan")]
#[test_case("+883 1234 5678 9", None ; "unknown")]
fn test_phone_country_code(raw: &str, expected: Option<&str>) {
    assert_eq!(PhoneNumber::parse(raw).country_code.as_deref(), expected);
}

#[test]
fn test_phone_from_digits_ignores_spelling() {
    let from_plus = PhoneNumber::parse("+44 20 7946 0958");
    assert_eq!(PhoneNumber::from_digits("442079460958"), from_plus);
    assert_eq!(
        PhoneNumber::from_digits("12122345678"),
        PhoneNumber::parse("(212) 234-5678")
    );

    let unknown = PhoneNumber::from_digits("0000");
    assert_eq!(unknown.number, "0000");
    assert!(!unknown.is_valid);
}

// ============================================================================
// Dates
// ============================================================================

#[test_case("1985-03-14" ; "iso")]
#[test_case("03/14/1985" ; "us slashes")]
#[test_case("March 14, 1985" ; "long month")]
#[test_case("1985-03-14T00:00:00Z" ; "rfc3339")]
#[test_case("1985-03-14T08:30:00" ; "naive datetime")]
fn test_parse_dob(raw: &str) {
    assert_eq!(parse_dob(raw), NaiveDate::from_ymd_opt(1985, 3, 14));
}

#[test]
fn test_parse_dob_unrecognised() {
    assert_eq!(parse_dob("sometime in the eighties"), None);
    assert_eq!(parse_dob("  "), None);
}

// ============================================================================
// Payload decoding
// ============================================================================

#[test]
fn test_email_result_decoding() {
    let body = json!({
        "name": "Jane Doe",
        "dob": "1985-03-14",
        "addresses": [
            "123 main st, springfield, il 62704",
            {"street": "9 Pine Rd", "city": "Boise", "state": "ID", "zestimate": 412000}
        ],
        "numbers": ["(212) 234-5678"],
        "extra_info": {"occupation": "engineer"}
    })
    .to_string();

    let result = email_result("jane@example.com", &body).unwrap();

    assert_eq!(result.email, "jane@example.com");
    assert_eq!(result.name.as_deref(), Some("Jane Doe"));
    assert_eq!(result.dob, NaiveDate::from_ymd_opt(1985, 3, 14));
    assert_eq!(result.addresses.len(), 2);
    assert_eq!(
        result.addresses[0].street,
        "123 Main Street, Springfield, IL 62704"
    );
    assert_eq!(result.addresses[1].city.as_deref(), Some("Boise"));
    assert_eq!(result.addresses[1].zestimate, Some(412_000.0));
    assert_eq!(result.phone_numbers[0].number, "+12122345678");
    assert_eq!(
        result.extra_info.unwrap().get("occupation"),
        Some(&json!("engineer"))
    );
}

#[test]
fn test_email_result_minimal_payload() {
    let result = email_result("a@b.com", "{}").unwrap();
    assert_eq!(result.name, None);
    assert!(result.addresses.is_empty());
    assert!(result.phone_numbers.is_empty());
}

#[test]
fn test_email_result_null_collections() {
    let body = json!({"addresses": null, "numbers": null, "dob": null}).to_string();
    let result = email_result("a@b.com", &body).unwrap();
    assert!(result.addresses.is_empty());
    assert_eq!(result.dob, None);
}

#[test]
fn test_zestimate_string_value() {
    let body = json!({"addresses": [{"street": "1 A St", "zestimate": "$350,000"}]}).to_string();
    let result = email_result("a@b.com", &body).unwrap();
    assert_eq!(result.addresses[0].zestimate, Some(350_000.0));

    let body = json!({"addresses": [{"street": "1 A St", "zestimate": "lots"}]}).to_string();
    let err = email_result("a@b.com", &body).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_phone_result_accepts_phone_numbers_field() {
    let body = json!({"name": "Sam", "phone_numbers": ["+44 20 7946 0958"]}).to_string();
    let result = phone_result(PhoneNumber::parse("2122345678"), &body).unwrap();

    assert_eq!(result.phone.number, "+12122345678");
    assert_eq!(result.phone_numbers[0].number, "+442079460958");
}

#[test]
fn test_domain_result_decoding() {
    let body = json!({
        "results": [
            {"email": "a@acme.io", "name": "A", "phone_numbers": ["2122345678"]},
            {"email": "b@acme.io", "addresses": ["1 main st"]}
        ]
    })
    .to_string();

    let result = domain_result("acme.io", &body).unwrap();

    assert_eq!(result.domain, "acme.io");
    assert_eq!(result.total_results, 2);
    assert_eq!(result.results[0].phone_numbers.len(), 1);
    assert_eq!(result.results[1].addresses[0].street, "1 Main Street");
}

#[test]
fn test_domain_entry_without_email_is_decode_error() {
    let body = json!({"results": [{"name": "no email"}]}).to_string();
    let err = domain_result("acme.io", &body).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_error_field_is_api_error() {
    let err = email_result("a@b.com", r#"{"error": "No results found"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(err.to_string().contains("No results found"));
}

#[test]
fn test_malformed_payloads_are_decode_errors() {
    for body in ["not json", "[1, 2]", r#"{"addresses": 5}"#, r#"{"name": 42}"#] {
        let err = email_result("a@b.com", body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode, "body: {body}");
    }
}

#[test]
fn test_search_result_conversions() {
    let email = email_result("a@b.com", "{}").unwrap();
    let result = SearchResult::from(email.clone());

    assert_eq!(result.clone().into_email(), Some(email));
    assert_eq!(result.clone().into_phone(), None);
    assert_eq!(result.into_domain(), None);
}
