//! Shared text cleanup: whitespace collapsing, per-kind allow-lists and
//! casing primitives. All pure functions.

use dq_model::FieldKind;

/// Trim and collapse internal whitespace runs to single spaces.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when `ch` is allowed in a cleaned value of this kind.
pub fn is_allowed(kind: FieldKind, ch: char) -> bool {
    match kind {
        FieldKind::PersonalName => ch.is_alphabetic() || matches!(ch, ' ' | '-' | '\''),
        FieldKind::CompanyName => {
            ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '\'' | '&' | '.' | ',')
        }
        FieldKind::NationalId => ch.is_ascii_digit() || ch == '-',
        FieldKind::Phone => ch.is_ascii_digit() || ch == '+',
        FieldKind::Email => {
            ch.is_ascii_alphanumeric() || matches!(ch, '@' | '.' | '_' | '%' | '+' | '-')
        }
        FieldKind::PostalCode => ch.is_ascii_alphanumeric() || ch == '-',
        FieldKind::StreetAddress => {
            ch.is_alphanumeric()
                || matches!(ch, ' ' | '-' | '\'' | '.' | ',' | '#' | '/' | '°' | 'º' | 'ª')
        }
    }
}

/// Drop characters outside the kind's allow-list.
pub fn strip_disallowed(kind: FieldKind, value: &str) -> String {
    value.chars().filter(|ch| is_allowed(kind, *ch)).collect()
}

/// Uppercase first character, lowercase the rest. Unicode-aware, so
/// "maría" becomes "María".
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.extend(chars.as_str().to_lowercase().chars());
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_variants() {
        assert_eq!(collapse_whitespace("  a \t b\n c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn strip_respects_kind() {
        assert_eq!(
            strip_disallowed(FieldKind::NationalId, "20.12345678.9"),
            "20123456789"
        );
        assert_eq!(
            strip_disallowed(FieldKind::PersonalName, "o'connor #1"),
            "o'connor "
        );
    }

    #[test]
    fn capitalize_handles_diacritics() {
        assert_eq!(capitalize("maría"), "María");
        assert_eq!(capitalize("LÓPEZ"), "López");
        assert_eq!(capitalize(""), "");
    }
}
