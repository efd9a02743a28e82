//! Serialization surface of the report types.

use dq_model::{
    CountryCode, CustomerRecord, FieldKind, FieldReport, LocaleUsed, NormalizedField, RawField,
    RecordReport, ValidationOutcome,
};

#[test]
fn record_serializes_with_snake_case_kinds() {
    let record = CustomerRecord::new().with_field(
        RawField::new(FieldKind::Phone, "(212) 555-1234")
            .with_country(CountryCode::new("US").unwrap()),
    );
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["fields"]["phone"]["value"], "(212) 555-1234");
    assert_eq!(json["fields"]["phone"]["country"], "US");

    let round: CustomerRecord = serde_json::from_value(json).expect("deserialize record");
    assert_eq!(round, record);
}

#[test]
fn field_report_flattens_outcome() {
    let normalized = NormalizedField::new(
        FieldKind::NationalId,
        "30-12345678-9",
        LocaleUsed::Declared(CountryCode::new("AR").unwrap()),
    );
    let report = FieldReport::new(
        "30.12345678.9",
        &normalized,
        ValidationOutcome::InvalidChecksum {
            reason: "check digit mismatch".to_string(),
            expected: 9,
            supplied: 0,
        },
    )
    .with_confidence(0.9);

    let json = serde_json::to_value(&report).expect("serialize field report");
    assert_eq!(json["outcome"], "invalid_checksum");
    assert_eq!(json["expected"], 9);
    assert_eq!(json["supplied"], 0);
    assert_eq!(json["locale_used"]["source"], "declared");
    assert_eq!(json["locale_used"]["country"], "AR");
}

#[test]
fn report_failing_fields() {
    let valid = NormalizedField::new(FieldKind::Email, "a@b.com", LocaleUsed::Generic);
    let invalid = NormalizedField::new(FieldKind::PostalCode, "0", LocaleUsed::Generic);

    let mut report = RecordReport::default();
    report.fields.insert(
        FieldKind::Email,
        FieldReport::new("a@b.com", &valid, ValidationOutcome::Valid),
    );
    report.fields.insert(
        FieldKind::PostalCode,
        FieldReport::new(
            "0",
            &invalid,
            ValidationOutcome::invalid_format("too short"),
        ),
    );

    assert_eq!(report.failing_fields(), vec![FieldKind::PostalCode]);
    assert_eq!(report.valid_count(), 1);
}
