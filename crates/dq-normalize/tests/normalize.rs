//! Normalization behavior across field kinds.

use dq_model::{CountryCode, FieldKind, LocaleUsed, RawField};
use dq_normalize::normalize;
use dq_rules::RuleRegistry;

fn registry() -> RuleRegistry {
    RuleRegistry::builtin()
}

fn ar() -> CountryCode {
    CountryCode::new("AR").unwrap()
}

fn us() -> CountryCode {
    CountryCode::new("US").unwrap()
}

#[test]
fn us_phone_to_e164() {
    let raw = RawField::new(FieldKind::Phone, "(212) 555-1234").with_country(us());
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "+12125551234");
    assert!(field.fully_normalized);
    assert_eq!(field.locale_used, LocaleUsed::Declared(us()));
}

#[test]
fn international_phone_infers_locale() {
    let raw = RawField::new(FieldKind::Phone, "+54 11 4321-7654");
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "+541143217654");
    assert_eq!(field.locale_used, LocaleUsed::Inferred(ar()));
}

#[test]
fn national_phone_without_hint_is_best_effort() {
    let raw = RawField::new(FieldKind::Phone, "212 555 1234");
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "2125551234");
    assert!(!field.fully_normalized);
    assert_eq!(field.locale_used, LocaleUsed::Generic);
}

#[test]
fn cuit_separator_variants_converge() {
    let reg = registry();
    for raw in ["20 12345678 9", "20-12345678-9", "20.12345678.9", "20123456789"] {
        let field = normalize(
            &RawField::new(FieldKind::NationalId, raw).with_country(ar()),
            &reg,
        );
        assert_eq!(field.value, "20-12345678-9", "input {raw:?}");
        assert!(field.fully_normalized);
    }
}

#[test]
fn personal_name_casing_with_particles() {
    let raw = RawField::new(FieldKind::PersonalName, "maría-josé LÓPEZ garcía");
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "María-José López García");
}

#[test]
fn company_name_extracts_legal_entity() {
    let raw = RawField::new(FieldKind::CompanyName, "acme trading s.a.");
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "Acme Trading");
    assert_eq!(field.legal_entity.as_deref(), Some("S.A."));
}

#[test]
fn email_lowercases() {
    let raw = RawField::new(FieldKind::Email, "User@GMAIL.com");
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "user@gmail.com");
    assert!(field.fully_normalized);
}

#[test]
fn zip_plus_four_keeps_hyphen() {
    let raw = RawField::new(FieldKind::PostalCode, "10001-1234").with_country(us());
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "10001-1234");
    assert!(field.fully_normalized);
}

#[test]
fn argentine_postal_code_uppercases() {
    let raw = RawField::new(FieldKind::PostalCode, "b1636fda").with_country(ar());
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "B1636FDA");
}

#[test]
fn address_infers_argentina_from_province() {
    let raw = RawField::new(FieldKind::StreetAddress, "av. rivadavia 1234, córdoba");
    let field = normalize(&raw, &registry());
    assert_eq!(field.locale_used, LocaleUsed::Inferred(ar()));
    assert_eq!(field.value, "Av. Rivadavia 1234, Córdoba");
}

#[test]
fn national_id_without_rule_is_best_effort() {
    let raw = RawField::new(FieldKind::NationalId, "123-45-6789").with_country(us());
    let field = normalize(&raw, &registry());
    assert!(!field.fully_normalized);
    assert_eq!(field.value, "123-45-6789");
}

#[test]
fn every_field_kind_has_a_normalization_path() {
    let reg = registry();
    for kind in FieldKind::ALL {
        let field = normalize(&RawField::new(kind, "Sample Value 1"), &reg);
        assert_eq!(field.kind, kind);
    }
}

#[test]
fn empty_input_is_best_effort() {
    let raw = RawField::new(FieldKind::PersonalName, "   ");
    let field = normalize(&raw, &registry());
    assert_eq!(field.value, "");
    assert!(!field.fully_normalized);
}
