//! The validator: structural pattern, length bounds, assigned range and
//! check digit, judged in that order against the locale rule.
//!
//! Validators never mutate their input and never fail on malformed data;
//! every data problem is a [`ValidationOutcome`]. `Err` here means a
//! broken configuration (an unparseable rule pattern), nothing else.

use std::collections::HashMap;

use regex::Regex;

use dq_model::{FieldKind, NormalizedField, ValidationOutcome};
use dq_rules::{LocaleRule, RuleRegistry, RulesError};

use crate::checksum::{ChecksumResult, verify};
use crate::error::ValidateError;

/// A validator with every registered rule pattern compiled up front.
///
/// Build one at startup and share it; validation itself is pure and
/// lock-free.
#[derive(Debug)]
pub struct Validator {
    patterns: HashMap<String, Regex>,
}

impl Validator {
    /// Compile all patterns in the registry.
    pub fn new(registry: &RuleRegistry) -> Result<Self, ValidateError> {
        let mut patterns = HashMap::new();
        for rule in registry.iter() {
            if !patterns.contains_key(&rule.pattern) {
                let compiled = Regex::new(&rule.pattern).map_err(|source| {
                    ValidateError::BadPattern {
                        pattern: rule.pattern.clone(),
                        kind: rule.kind,
                        source,
                    }
                })?;
                patterns.insert(rule.pattern.clone(), compiled);
            }
        }
        Ok(Self { patterns })
    }

    /// Judge a normalized field against its locale rule.
    pub fn validate(&self, field: &NormalizedField, registry: &RuleRegistry) -> ValidationOutcome {
        let rule = match registry.lookup(field.kind, field.locale_used.country()) {
            Ok(rule) => rule,
            Err(RulesError::UnsupportedLocale { kind, locale }) => {
                return ValidationOutcome::unsupported(format!(
                    "no rule registered for {kind} in locale {locale}"
                ));
            }
            Err(other) => {
                return ValidationOutcome::unsupported(other.to_string());
            }
        };

        if !field.fully_normalized {
            return ValidationOutcome::ambiguous(
                "normalization was best-effort; locale could not be determined confidently",
            );
        }

        self.check_rule(field, rule)
    }

    fn check_rule(&self, field: &NormalizedField, rule: &LocaleRule) -> ValidationOutcome {
        let significant = significant_len(&field.value);
        if !rule.length_ok(significant) {
            return ValidationOutcome::invalid_format(format!(
                "length {significant} outside bounds {}..={}",
                rule.length_min.unwrap_or(0),
                rule.length_max.map_or_else(|| "*".to_string(), |max| max.to_string()),
            ));
        }

        match self.patterns.get(&rule.pattern) {
            Some(regex) if regex.is_match(&field.value) => {}
            Some(_) | None => {
                return ValidationOutcome::invalid_format(format!(
                    "value does not match pattern {}",
                    rule.pattern
                ));
            }
        }

        if let Some(range) = rule.assigned_range {
            match leading_number(&field.value) {
                Some(number) if range.contains(number) => {}
                _ => {
                    return ValidationOutcome::invalid_format(format!(
                        "out of assigned range {:05}-{:05}",
                        range.min, range.max
                    ));
                }
            }
        }

        if let Some(algorithm) = rule.checksum_algorithm {
            return match verify(algorithm, &field.value) {
                ChecksumResult::Ok => ValidationOutcome::Valid,
                ChecksumResult::Mismatch { expected, supplied } => {
                    ValidationOutcome::InvalidChecksum {
                        reason: format!(
                            "check digit mismatch: expected {expected}, supplied {supplied}"
                        ),
                        expected,
                        supplied,
                    }
                }
                ChecksumResult::Undefined => ValidationOutcome::invalid_format(format!(
                    "no valid check digit exists under {algorithm}"
                )),
            };
        }

        ValidationOutcome::Valid
    }
}

/// Count of significant (alphanumeric) characters.
fn significant_len(value: &str) -> usize {
    value.chars().filter(|ch| ch.is_alphanumeric()).count()
}

/// Numeric value of the leading digit run, for assigned-range checks.
fn leading_number(value: &str) -> Option<u32> {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{CountryCode, LocaleUsed};

    fn ar_field(value: &str) -> NormalizedField {
        NormalizedField::new(
            FieldKind::NationalId,
            value,
            LocaleUsed::Declared(CountryCode::new("AR").unwrap()),
        )
    }

    #[test]
    fn structural_mismatch_names_the_pattern() {
        let registry = RuleRegistry::builtin();
        let validator = Validator::new(&registry).unwrap();
        let outcome = validator.validate(&ar_field("30-2234567-89"), &registry);
        match outcome {
            ValidationOutcome::InvalidFormat { reason } => {
                assert!(reason.contains(r"^\d{2}-\d{8}-\d$"), "reason: {reason}");
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn best_effort_is_ambiguous_not_invalid() {
        let registry = RuleRegistry::builtin();
        let validator = Validator::new(&registry).unwrap();
        let field = NormalizedField::new(FieldKind::Phone, "2125551234", LocaleUsed::Generic)
            .best_effort();
        assert!(matches!(
            validator.validate(&field, &registry),
            ValidationOutcome::Ambiguous { .. }
        ));
    }

    #[test]
    fn leading_number_extraction() {
        assert_eq!(leading_number("00501"), Some(501));
        assert_eq!(leading_number("10001-1234"), Some(10001));
        assert_eq!(leading_number("B1636"), None);
    }
}
