//! Phone numbers
//!
//! Numbers without a `+` are read as North American first. Anything else
//! must start with a country calling code from [`CALLING_CODES`] and have a
//! national number of a plausible length for that country.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calling code, primary region, and national number length bounds
const CALLING_CODES: &[(&str, &str, usize, usize)] = &[
    ("7", "RU", 10, 10),
    ("20", "EG", 8, 10),
    ("27", "ZA", 9, 9),
    ("30", "GR", 10, 10),
    ("31", "NL", 9, 9),
    ("32", "BE", 8, 9),
    ("33", "FR", 9, 9),
    ("34", "ES", 9, 9),
    ("36", "HU", 8, 9),
    ("39", "IT", 6, 11),
    ("40", "RO", 9, 9),
    ("41", "CH", 9, 9),
    ("43", "AT", 4, 13),
    ("44", "GB", 7, 10),
    ("45", "DK", 8, 8),
    ("46", "SE", 7, 10),
    ("47", "NO", 5, 8),
    ("48", "PL", 9, 9),
    ("49", "DE", 5, 13),
    ("51", "PE", 8, 9),
    ("52", "MX", 10, 10),
    ("54", "AR", 10, 11),
    ("55", "BR", 10, 11),
    ("56", "CL", 9, 9),
    ("57", "CO", 8, 10),
    ("60", "MY", 7, 10),
    ("61", "AU", 9, 9),
    ("62", "ID", 7, 12),
    ("63", "PH", 8, 10),
    ("64", "NZ", 8, 10),
    ("65", "SG", 8, 8),
    ("66", "TH", 8, 9),
    ("81", "JP", 9, 10),
    ("82", "KR", 8, 10),
    ("84", "VN", 9, 10),
    ("86", "CN", 10, 11),
    ("90", "TR", 10, 10),
    ("91", "IN", 10, 10),
    ("92", "PK", 9, 10),
    ("212", "MA", 9, 9),
    ("234", "NG", 8, 10),
    ("254", "KE", 9, 9),
    ("351", "PT", 9, 9),
    ("353", "IE", 7, 9),
    ("358", "FI", 5, 12),
    ("380", "UA", 9, 9),
    ("852", "HK", 8, 8),
    ("886", "TW", 8, 9),
    ("966", "SA", 9, 9),
    ("971", "AE", 8, 9),
    ("972", "IL", 8, 9),
];

/// A phone number, in E.164 form when it could be recognised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    /// ISO region of the calling code, when known
    pub country_code: Option<String>,
    pub is_valid: bool,
}

impl PhoneNumber {
    /// Parse a raw phone string, assuming North America when no `+` is given
    ///
    /// Strings that match no known numbering plan are kept verbatim and
    /// marked invalid.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

        let recognised = if trimmed.starts_with('+') {
            international(&digits)
        } else {
            national_or_international(&digits)
        };

        recognised.unwrap_or_else(|| Self::unrecognised(trimmed))
    }

    /// Interpret a digits-only number, as produced by
    /// [`normalize_phone`](crate::cache::normalize_phone)
    ///
    /// Depends on nothing but the digits, so every spelling of the same
    /// number yields the same value.
    pub fn from_digits(digits: &str) -> Self {
        national_or_international(digits).unwrap_or_else(|| Self::unrecognised(digits))
    }

    fn unrecognised(raw: &str) -> Self {
        Self {
            number: raw.to_string(),
            country_code: None,
            is_valid: false,
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.number)
    }
}

fn national_or_international(digits: &str) -> Option<PhoneNumber> {
    if digits.len() == 10 {
        nanp(digits)
    } else {
        international(digits)
    }
}

/// `digits` starts with a calling code
fn international(digits: &str) -> Option<PhoneNumber> {
    if digits.starts_with('0') || digits.len() > 15 {
        return None;
    }

    if let Some(national) = digits.strip_prefix('1') {
        return nanp(national);
    }

    let (code, region, min, max) = CALLING_CODES
        .iter()
        .find(|(code, ..)| digits.starts_with(code))?;

    let national_len = digits.len() - code.len();
    if !(*min..=*max).contains(&national_len) {
        return None;
    }

    Some(PhoneNumber {
        number: format!("+{digits}"),
        country_code: Some((*region).to_string()),
        is_valid: true,
    })
}

/// Ten-digit North American number without the leading `1`
fn nanp(national: &str) -> Option<PhoneNumber> {
    if national.len() != 10 {
        return None;
    }

    Some(PhoneNumber {
        number: format!("+1{national}"),
        country_code: Some("US".to_string()),
        is_valid: is_valid_nanp(national),
    })
}

/// Area code and exchange are `NXX` and not `N11` service codes. Area codes
/// also exclude the reserved `37X`, `96X` and `N9X` blocks and the
/// non-geographic `555`.
fn is_valid_nanp(national: &str) -> bool {
    let b = national.as_bytes();
    let (area, exchange) = (&b[0..3], &b[3..6]);

    let is_nxx = |code: &[u8]| code[0] >= b'2' && !(code[1] == b'1' && code[2] == b'1');
    if !is_nxx(area) || !is_nxx(exchange) {
        return false;
    }

    let reserved_area = area[1] == b'9'
        || area.starts_with(b"37")
        || area.starts_with(b"96")
        || area == b"555";
    !reserved_area
}
