//! Locale inference from structural cues, used only when the caller gave
//! no country hint.

use dq_model::CountryCode;

/// Argentine province tokens recognized inside street addresses.
const AR_PROVINCES: &[&str] = &[
    "buenos aires",
    "caba",
    "catamarca",
    "chaco",
    "chubut",
    "córdoba",
    "corrientes",
    "entre ríos",
    "formosa",
    "jujuy",
    "la pampa",
    "la rioja",
    "mendoza",
    "misiones",
    "neuquén",
    "río negro",
    "salta",
    "san juan",
    "san luis",
    "santa cruz",
    "santa fe",
    "santiago del estero",
    "tierra del fuego",
    "tucumán",
];

/// US state abbreviations accepted as standalone uppercase tokens.
const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Infer a country from an address line. Province names win over state
/// abbreviations; anything ambiguous stays `None`.
pub fn infer_address_country(address: &str) -> Option<CountryCode> {
    let lower = address.to_lowercase();
    if AR_PROVINCES.iter().any(|p| contains_token(&lower, p)) {
        return CountryCode::new("AR").ok();
    }
    for token in address.split([' ', ',']) {
        let token = token.trim_matches(['.', ',']);
        if token.len() == 2 && US_STATES.contains(&token) {
            return CountryCode::new("US").ok();
        }
    }
    None
}

/// True when `needle` occurs in `haystack` on token boundaries.
fn contains_token(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::infer_address_country;

    #[test]
    fn province_token_infers_argentina() {
        let country = infer_address_country("Av. Rivadavia 1234, Córdoba").unwrap();
        assert_eq!(country.as_str(), "AR");
    }

    #[test]
    fn state_abbreviation_infers_us() {
        let country = infer_address_country("12 Main St, Springfield, IL 62704").unwrap();
        assert_eq!(country.as_str(), "US");
    }

    #[test]
    fn lowercase_state_is_not_a_cue() {
        assert!(infer_address_country("12 main st, springfield, il").is_none());
    }

    #[test]
    fn no_cue_no_inference() {
        assert!(infer_address_country("Hauptstraße 5").is_none());
    }
}
