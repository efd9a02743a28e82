//! Personal and company name casing.

use dq_rules::TokenTable;

use crate::text::capitalize;

/// Title-case one whitespace-delimited name token. Hyphenated and
/// apostrophe-joined sub-parts are capitalized independently, so
/// "o'connor" becomes "O'Connor" and "maría-josé" becomes "María-José".
/// Particles stay lowercase regardless of position; generation acronyms
/// stay uppercase.
pub fn case_name_token(token: &str, tokens: &TokenTable) -> String {
    if tokens.is_particle(token) {
        return token.to_lowercase();
    }
    if tokens.is_acronym(token) {
        return token.to_uppercase();
    }
    let mut out = String::with_capacity(token.len());
    let mut part = String::new();
    for ch in token.chars() {
        if ch == '-' || ch == '\'' {
            out.push_str(&capitalize(&part));
            out.push(ch);
            part.clear();
        } else {
            part.push(ch);
        }
    }
    out.push_str(&capitalize(&part));
    out
}

/// Apply personal-name casing to a cleaned, whitespace-collapsed value.
pub fn case_personal_name(value: &str, tokens: &TokenTable) -> String {
    value
        .split(' ')
        .map(|token| case_name_token(token, tokens))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Company-name casing: title case, but tokens that are entirely
/// uppercase (existing acronyms such as "IBM") are left alone.
/// Ampersands pass through untouched.
pub fn case_company_name(value: &str, tokens: &TokenTable) -> String {
    value
        .split(' ')
        .map(|token| {
            if token == "&" {
                token.to_string()
            } else if token.len() > 1
                && token.chars().all(|ch| !ch.is_lowercase())
                && token.chars().any(char::is_alphabetic)
            {
                token.to_string()
            } else {
                case_name_token(token, tokens)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Detect and split a trailing legal-entity suffix from a cleaned company
/// name. Returns the remaining name and the canonical suffix form.
/// Checks the last token, then the last two tokens joined (covers
/// "S. A."-style spellings).
pub fn extract_legal_entity(value: &str, tokens: &TokenTable) -> (String, Option<String>) {
    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() < 2 {
        return (value.to_string(), None);
    }

    if let Some(canonical) = tokens.legal_suffix(parts[parts.len() - 1]) {
        let name = trim_name_tail(&parts[..parts.len() - 1]);
        if !name.is_empty() {
            return (name, Some(canonical.to_string()));
        }
    }
    if parts.len() >= 3 {
        let joined = format!("{} {}", parts[parts.len() - 2], parts[parts.len() - 1]);
        if let Some(canonical) = tokens.legal_suffix(&joined) {
            let name = trim_name_tail(&parts[..parts.len() - 2]);
            if !name.is_empty() {
                return (name, Some(canonical.to_string()));
            }
        }
    }
    (value.to_string(), None)
}

/// Re-join name tokens and drop a trailing comma/semicolon left behind by
/// suffix extraction ("Acme, Inc." -> "Acme").
fn trim_name_tail(parts: &[&str]) -> String {
    let joined = parts.join(" ");
    joined
        .trim_end_matches([',', ';'])
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TokenTable {
        TokenTable::builtin()
    }

    #[test]
    fn personal_name_casing() {
        let t = table();
        assert_eq!(
            case_personal_name("maría-josé lópez garcía", &t),
            "María-José López García"
        );
        assert_eq!(case_personal_name("o'connor", &t), "O'Connor");
        assert_eq!(case_personal_name("juan de la cruz", &t), "Juan de la Cruz");
        assert_eq!(case_personal_name("ludwig van beethoven", &t), "Ludwig van Beethoven");
    }

    #[test]
    fn particles_lowered_even_uppercased_input() {
        assert_eq!(
            case_personal_name("JUAN DE LA CRUZ", &table()),
            "Juan de la Cruz"
        );
    }

    #[test]
    fn generation_suffix_stays_uppercase() {
        assert_eq!(
            case_personal_name("john smith iii", &table()),
            "John Smith III"
        );
    }

    #[test]
    fn company_suffix_extraction() {
        let t = table();
        assert_eq!(
            extract_legal_entity("Acme Trading S.A.", &t),
            ("Acme Trading".to_string(), Some("S.A.".to_string()))
        );
        assert_eq!(
            extract_legal_entity("Acme, Inc.", &t),
            ("Acme".to_string(), Some("Inc.".to_string()))
        );
        assert_eq!(extract_legal_entity("Acme", &t), ("Acme".to_string(), None));
        // A name that is nothing but a suffix is left alone.
        assert_eq!(extract_legal_entity("S.A.", &t), ("S.A.".to_string(), None));
    }

    #[test]
    fn company_casing_preserves_acronyms_and_ampersand() {
        let t = table();
        assert_eq!(case_company_name("johnson & johnson", &t), "Johnson & Johnson");
        assert_eq!(case_company_name("IBM argentina", &t), "IBM Argentina");
    }
}
