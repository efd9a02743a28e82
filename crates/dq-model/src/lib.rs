pub mod error;
pub mod field;
pub mod outcome;
pub mod record;

pub use error::{ModelError, Result};
pub use field::{CountryCode, FieldKind, LocaleUsed, NormalizedField, RawField};
pub use outcome::ValidationOutcome;
pub use record::{CustomerRecord, FieldReport, RecordReport, RecordSchema};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_round_trips_through_str() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn country_code_uppercases_and_rejects_junk() {
        assert_eq!(CountryCode::new("ar").unwrap().as_str(), "AR");
        assert!(CountryCode::new("ARG").is_err());
        assert!(CountryCode::new("1X").is_err());
        assert!(CountryCode::new("").is_err());
    }

    #[test]
    fn record_keeps_one_field_per_kind() {
        let record = CustomerRecord::new()
            .with_field(RawField::new(FieldKind::Email, "a@example.com"))
            .with_field(RawField::new(FieldKind::Email, "b@example.com"));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get(FieldKind::Email).unwrap().value, "b@example.com");
    }

    #[test]
    fn outcome_reasons() {
        assert!(ValidationOutcome::Valid.reason().is_none());
        let outcome = ValidationOutcome::invalid_format("does not match ^\\d{5}$");
        assert_eq!(outcome.reason(), Some("does not match ^\\d{5}$"));
        assert_eq!(outcome.label(), "invalid_format");
    }
}
