//! Phone canonicalization to E.164.
//!
//! Formatting characters are stripped, a leading `+` (or `00` prefix) is
//! honored, extensions ("x89", "ext 12") are dropped, and the country
//! calling code is prefixed from the declared or inferred locale.

use dq_model::CountryCode;

/// Country calling codes recognized for locale inference, longest first
/// within each length so prefix matching is unambiguous. `+1` is mapped
/// to US (NANP).
const CALLING_CODES: &[(&str, &str)] = &[
    ("598", "UY"),
    ("595", "PY"),
    ("591", "BO"),
    ("51", "PE"),
    ("52", "MX"),
    ("54", "AR"),
    ("55", "BR"),
    ("56", "CL"),
    ("57", "CO"),
    ("58", "VE"),
    ("30", "GR"),
    ("31", "NL"),
    ("32", "BE"),
    ("33", "FR"),
    ("34", "ES"),
    ("39", "IT"),
    ("41", "CH"),
    ("43", "AT"),
    ("44", "GB"),
    ("45", "DK"),
    ("46", "SE"),
    ("47", "NO"),
    ("48", "PL"),
    ("49", "DE"),
    ("81", "JP"),
    ("86", "CN"),
    ("1", "US"),
    ("7", "RU"),
];

/// Calling code for a country, when the table knows it.
pub fn calling_code(country: &CountryCode) -> Option<&'static str> {
    CALLING_CODES
        .iter()
        .find(|(_, c)| *c == country.as_str())
        .map(|(code, _)| *code)
}

/// Country for the calling-code prefix of an international digit string
/// (digits only, no `+`). Longest prefix wins.
pub fn country_for_prefix(digits: &str) -> Option<(CountryCode, &'static str)> {
    let mut best: Option<(&str, &str)> = None;
    for (code, country) in CALLING_CODES {
        if digits.starts_with(code)
            && best.is_none_or(|(existing, _)| code.len() > existing.len())
        {
            best = Some((code, country));
        }
    }
    best.and_then(|(code, country)| CountryCode::new(country).ok().map(|c| (c, code)))
}

/// Result of phone cleanup, before locale resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPhone {
    /// Significant digits, extension dropped.
    pub digits: String,
    /// Whether the input declared itself international (`+` or `00`).
    pub international: bool,
}

/// Strip formatting and extensions from a raw phone string.
///
/// Digit collection stops at the first alphabetic character, which is how
/// extensions ("x89", "ext. 12") are written in practice.
pub fn clean_phone(raw: &str) -> CleanPhone {
    let trimmed = raw.trim();
    let mut digits = String::new();
    let mut international = false;
    for (pos, ch) in trimmed.chars().enumerate() {
        if ch == '+' && pos == 0 {
            international = true;
        } else if ch.is_ascii_digit() {
            digits.push(ch);
        } else if ch.is_alphabetic() {
            break;
        }
    }
    if !international && digits.starts_with("00") {
        digits.drain(..2);
        international = true;
    }
    CleanPhone {
        digits,
        international,
    }
}

/// Build the E.164 form for a national number under a known country.
/// Returns `None` when the table has no calling code for the country.
pub fn to_e164_national(digits: &str, country: &CountryCode) -> Option<String> {
    let code = calling_code(country)?;
    let mut national = digits;
    if code == "1" {
        // NANP: a leading 1 is the country code itself, not a trunk prefix.
        if national.len() == 11 && national.starts_with('1') {
            national = &national[1..];
        }
    } else {
        // Elsewhere a single leading 0 is the domestic trunk prefix.
        if let Some(stripped) = national.strip_prefix('0') {
            national = stripped;
        }
    }
    Some(format!("+{code}{national}"))
}
