//! End-to-end normalize-then-validate behavior.

use dq_model::{CountryCode, FieldKind, RawField, ValidationOutcome};
use dq_normalize::normalize;
use dq_rules::RuleRegistry;
use dq_validate::Validator;

fn run(kind: FieldKind, value: &str, country: Option<&str>) -> ValidationOutcome {
    let registry = RuleRegistry::builtin();
    let validator = Validator::new(&registry).expect("builtin patterns compile");
    let mut raw = RawField::new(kind, value);
    if let Some(code) = country {
        raw = raw.with_country(CountryCode::new(code).unwrap());
    }
    let normalized = normalize(&raw, &registry);
    validator.validate(&normalized, &registry)
}

#[test]
fn us_phone_valid() {
    assert_eq!(
        run(FieldKind::Phone, "(212) 555-1234", Some("US")),
        ValidationOutcome::Valid
    );
}

#[test]
fn cuit_with_correct_check_digit() {
    assert_eq!(
        run(FieldKind::NationalId, "30-22345678-9", Some("AR")),
        ValidationOutcome::Valid
    );
}

#[test]
fn cuit_with_transposed_check_digit() {
    match run(FieldKind::NationalId, "30-22345678-0", Some("AR")) {
        ValidationOutcome::InvalidChecksum {
            expected, supplied, ..
        } => {
            assert_eq!(expected, 9);
            assert_eq!(supplied, 0);
        }
        other => panic!("expected InvalidChecksum, got {other:?}"),
    }
}

#[test]
fn email_structurally_valid() {
    assert_eq!(
        run(FieldKind::Email, "User@GMAIL.com", None),
        ValidationOutcome::Valid
    );
}

#[test]
fn email_without_domain_dot_is_invalid() {
    assert!(matches!(
        run(FieldKind::Email, "user@localhost", None),
        ValidationOutcome::InvalidFormat { .. }
    ));
}

#[test]
fn zip_range_boundaries() {
    assert_eq!(
        run(FieldKind::PostalCode, "00501", Some("US")),
        ValidationOutcome::Valid
    );
    for zip in ["00000", "99999", "00500", "99951"] {
        match run(FieldKind::PostalCode, zip, Some("US")) {
            ValidationOutcome::InvalidFormat { reason } => {
                assert!(reason.contains("out of assigned range"), "zip {zip}: {reason}");
            }
            other => panic!("zip {zip}: expected InvalidFormat, got {other:?}"),
        }
    }
}

#[test]
fn unsupported_locale_is_not_invalid_data() {
    assert!(matches!(
        run(FieldKind::NationalId, "123-45-6789", Some("US")),
        ValidationOutcome::Unsupported { .. }
    ));
}

#[test]
fn hintless_national_phone_is_ambiguous() {
    assert!(matches!(
        run(FieldKind::Phone, "212 555 1234", None),
        ValidationOutcome::Ambiguous { .. }
    ));
}

#[test]
fn personal_name_valid_with_diacritics() {
    assert_eq!(
        run(FieldKind::PersonalName, "maría-josé LÓPEZ garcía", None),
        ValidationOutcome::Valid
    );
}
