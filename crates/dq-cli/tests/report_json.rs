//! The JSON report surface is consumed by downstream tooling; pin its
//! exact shape.

use std::sync::Arc;

use dq_core::Pipeline;
use dq_model::{CountryCode, CustomerRecord, FieldKind, RawField, RecordSchema};
use dq_rules::RuleRegistry;

fn pipeline() -> Pipeline {
    Pipeline::new(Arc::new(RuleRegistry::builtin())).unwrap()
}

#[test]
fn valid_phone_report_shape() {
    let record = CustomerRecord::new().with_field(
        RawField::new(FieldKind::Phone, "(212) 555-1234")
            .with_country(CountryCode::new("US").unwrap()),
    );
    let schema = RecordSchema::new().require(FieldKind::Phone);

    let report = pipeline().process(&record, &schema);
    let json = serde_json::to_string(&report).unwrap();
    insta::assert_snapshot!(
        json,
        @r#"{"fields":{"phone":{"raw":"(212) 555-1234","normalized":"+12125551234","locale_used":{"source":"declared","country":"US"},"outcome":"valid","confidence":1.0}},"valid":true}"#
    );
}

#[test]
fn checksum_mismatch_report_shape() {
    let record = CustomerRecord::new().with_field(
        RawField::new(FieldKind::NationalId, "30-22345678-0")
            .with_country(CountryCode::new("AR").unwrap()),
    );
    let schema = RecordSchema::new().require(FieldKind::NationalId);

    let report = pipeline().process(&record, &schema);
    let json = serde_json::to_string(&report).unwrap();
    insta::assert_snapshot!(
        json,
        @r#"{"fields":{"national_id":{"raw":"30-22345678-0","normalized":"30-22345678-0","locale_used":{"source":"declared","country":"AR"},"outcome":"invalid_checksum","reason":"check digit mismatch: expected 9, supplied 0","expected":9,"supplied":0,"confidence":0.3}},"valid":false}"#
    );
}
