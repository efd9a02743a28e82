//! The normalize entry point: one uniform cleanup ladder per field kind.
//!
//! Steps, in order: whitespace collapse, allow-list stripping, case
//! policy, canonical-template assembly from the matched locale rule.
//! Pure function of the input and the rule registry; idempotent for every
//! supported (kind, locale, value).

use dq_model::{FieldKind, LocaleUsed, NormalizedField, RawField};
use dq_rules::RuleRegistry;

use crate::infer::infer_address_country;
use crate::name::{case_company_name, case_personal_name, extract_legal_entity};
use crate::phone::{clean_phone, country_for_prefix, to_e164_national};
use crate::template::apply_template;
use crate::text::{collapse_whitespace, strip_disallowed};

/// Normalize one raw field into its canonical form.
pub fn normalize(raw: &RawField, registry: &RuleRegistry) -> NormalizedField {
    let cleaned = collapse_whitespace(&raw.value);
    match raw.kind {
        FieldKind::PersonalName => normalize_personal_name(raw, &cleaned, registry),
        FieldKind::CompanyName => normalize_company_name(raw, &cleaned, registry),
        FieldKind::Email => normalize_email(raw, &cleaned),
        FieldKind::Phone => normalize_phone(raw, &cleaned),
        FieldKind::NationalId | FieldKind::PostalCode => normalize_coded(raw, &cleaned, registry),
        FieldKind::StreetAddress => normalize_address(raw, &cleaned, registry),
    }
}

fn declared_or_generic(raw: &RawField) -> LocaleUsed {
    raw.country
        .clone()
        .map_or(LocaleUsed::Generic, LocaleUsed::Declared)
}

fn normalize_personal_name(
    raw: &RawField,
    cleaned: &str,
    registry: &RuleRegistry,
) -> NormalizedField {
    let stripped = collapse_whitespace(&strip_disallowed(raw.kind, cleaned));
    let value = case_personal_name(&stripped, registry.tokens());
    let field = NormalizedField::new(raw.kind, value, declared_or_generic(raw));
    if field.value.is_empty() {
        field.best_effort()
    } else {
        field
    }
}

fn normalize_company_name(
    raw: &RawField,
    cleaned: &str,
    registry: &RuleRegistry,
) -> NormalizedField {
    let stripped = collapse_whitespace(&strip_disallowed(raw.kind, cleaned));
    let (name, legal_entity) = extract_legal_entity(&stripped, registry.tokens());
    let value = case_company_name(&name, registry.tokens());
    let mut field = NormalizedField::new(raw.kind, value, declared_or_generic(raw));
    if let Some(suffix) = legal_entity {
        field = field.with_legal_entity(suffix);
    }
    if field.value.is_empty() {
        field.best_effort()
    } else {
        field
    }
}

fn normalize_email(raw: &RawField, cleaned: &str) -> NormalizedField {
    // Lowercasing the whole address is deliberate: mailbox-local case
    // sensitivity is theoretical, and one canonical form beats two.
    let value = strip_disallowed(raw.kind, &cleaned.to_lowercase());
    let field = NormalizedField::new(raw.kind, value, declared_or_generic(raw));
    if field.value.is_empty() {
        field.best_effort()
    } else {
        field
    }
}

fn normalize_phone(raw: &RawField, cleaned: &str) -> NormalizedField {
    let clean = clean_phone(cleaned);
    if clean.digits.is_empty() {
        return NormalizedField::new(raw.kind, "", declared_or_generic(raw)).best_effort();
    }

    if clean.international {
        let value = format!("+{}", clean.digits);
        let locale = match (&raw.country, country_for_prefix(&clean.digits)) {
            (Some(declared), _) => LocaleUsed::Declared(declared.clone()),
            (None, Some((inferred, _))) => LocaleUsed::Inferred(inferred),
            (None, None) => LocaleUsed::Generic,
        };
        return NormalizedField::new(raw.kind, value, locale);
    }

    match &raw.country {
        Some(declared) => match to_e164_national(&clean.digits, declared) {
            Some(value) => {
                NormalizedField::new(raw.kind, value, LocaleUsed::Declared(declared.clone()))
            }
            // Country hint without a known calling code: keep the digits,
            // flag for review.
            None => NormalizedField::new(
                raw.kind,
                clean.digits.clone(),
                LocaleUsed::Declared(declared.clone()),
            )
            .best_effort(),
        },
        // National number with no hint: no confident E.164 form exists.
        None => {
            NormalizedField::new(raw.kind, clean.digits.clone(), LocaleUsed::Generic).best_effort()
        }
    }
}

fn normalize_coded(raw: &RawField, cleaned: &str, registry: &RuleRegistry) -> NormalizedField {
    let stripped: String = strip_disallowed(raw.kind, cleaned)
        .chars()
        .flat_map(char::to_uppercase)
        .collect();
    let locale = declared_or_generic(raw);

    let Ok(rule) = registry.lookup(raw.kind, raw.country.as_ref()) else {
        // No rule for this locale: generic cleanup only.
        return NormalizedField::new(raw.kind, stripped, locale).best_effort();
    };

    if let Some(template) = &rule.canonical_template {
        let significant: String = stripped.chars().filter(|c| c.is_alphanumeric()).collect();
        if let Some(templated) = apply_template(template, &significant) {
            return NormalizedField::new(raw.kind, templated, locale);
        }
    }
    // Template absent or not applicable; the cleaned value is the
    // canonical candidate and validation judges it against the pattern.
    NormalizedField::new(raw.kind, stripped, locale)
}

fn normalize_address(raw: &RawField, cleaned: &str, registry: &RuleRegistry) -> NormalizedField {
    let stripped = collapse_whitespace(&strip_disallowed(raw.kind, cleaned));
    let value = case_company_name(&stripped, registry.tokens());
    let locale = match &raw.country {
        Some(declared) => LocaleUsed::Declared(declared.clone()),
        None => match infer_address_country(&stripped) {
            Some(inferred) => LocaleUsed::Inferred(inferred),
            None => LocaleUsed::Generic,
        },
    };
    let field = NormalizedField::new(raw.kind, value, locale);
    if field.value.is_empty() {
        field.best_effort()
    } else {
        field
    }
}
