//! The record orchestrator.
//!
//! Every field travels Received -> Normalized -> Validated -> Reported;
//! no field skips a stage and no field's failure aborts the rest. The
//! registry is loaded once and shared read-only, so records may be
//! processed concurrently without locking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use dq_model::{
    CustomerRecord, FieldKind, FieldReport, LocaleUsed, NormalizedField, RecordReport,
    RecordSchema, ValidationOutcome,
};
use dq_normalize::normalize;
use dq_rules::RuleRegistry;
use dq_validate::{ValidateError, Validator};

use crate::collaborators::{AddressLookup, ContactVerifier};

/// The normalize/validate pipeline for whole customer records.
pub struct Pipeline {
    registry: Arc<RuleRegistry>,
    validator: Validator,
    address_lookup: Option<Arc<dyn AddressLookup>>,
    verifier: Option<Arc<dyn ContactVerifier>>,
}

impl Pipeline {
    /// Build a pipeline over a rule registry, compiling all patterns.
    pub fn new(registry: Arc<RuleRegistry>) -> Result<Self, ValidateError> {
        let validator = Validator::new(&registry)?;
        Ok(Self {
            registry,
            validator,
            address_lookup: None,
            verifier: None,
        })
    }

    /// Pipeline over the built-in rules.
    pub fn builtin() -> Result<Self, ValidateError> {
        Self::new(Arc::new(RuleRegistry::builtin()))
    }

    /// Inject an authoritative address database.
    #[must_use]
    pub fn with_address_lookup(mut self, lookup: Arc<dyn AddressLookup>) -> Self {
        self.address_lookup = Some(lookup);
        self
    }

    /// Inject a phone/email verification service.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn ContactVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Process one record into a report.
    ///
    /// Every field present in the input gets exactly one report entry;
    /// mandatory fields absent from the input are reported as missing.
    /// The record-level flag is computed only after every field's outcome
    /// is known.
    pub fn process(&self, record: &CustomerRecord, schema: &RecordSchema) -> RecordReport {
        let mut report = RecordReport::default();

        for raw in record.iter() {
            let normalized = normalize(raw, &self.registry);
            let outcome = self.validator.validate(&normalized, &self.registry);
            let outcome = self.confirm(&normalized, outcome);
            trace!(
                kind = %raw.kind,
                outcome = outcome.label(),
                "field processed"
            );
            let confidence = confidence_for(&normalized, &outcome);
            report.fields.insert(
                raw.kind,
                FieldReport::new(raw.value.clone(), &normalized, outcome)
                    .with_confidence(confidence),
            );
        }

        for kind in &schema.mandatory {
            if report.fields.contains_key(kind) {
                continue;
            }
            let placeholder = NormalizedField::new(*kind, "", LocaleUsed::Generic).best_effort();
            report.fields.insert(
                *kind,
                FieldReport::new(
                    "",
                    &placeholder,
                    ValidationOutcome::invalid_format("missing required field"),
                )
                .with_confidence(0.0),
            );
        }

        report.valid = schema.mandatory.iter().all(|kind| {
            report
                .fields
                .get(kind)
                .is_some_and(|field| field.outcome.is_valid())
        });
        debug!(
            fields = report.fields.len(),
            valid = report.valid,
            "record processed"
        );
        report
    }

    /// Process a batch, honoring a cancellation flag between records.
    /// Returns the reports produced before cancellation.
    pub fn process_batch(
        &self,
        records: &[CustomerRecord],
        schema: &RecordSchema,
        cancel: &AtomicBool,
    ) -> Vec<RecordReport> {
        let mut reports = Vec::with_capacity(records.len());
        for record in records {
            if cancel.load(Ordering::Relaxed) {
                debug!(processed = reports.len(), "batch cancelled");
                break;
            }
            reports.push(self.process(record, schema));
        }
        reports
    }

    /// Consult the injected collaborators for kinds they cover.
    ///
    /// Confirmation never upgrades a structural verdict; a miss or a
    /// collaborator failure downgrades `Valid` to `Ambiguous` so the
    /// field is flagged for review rather than silently trusted.
    fn confirm(&self, field: &NormalizedField, outcome: ValidationOutcome) -> ValidationOutcome {
        if !outcome.is_valid() {
            return outcome;
        }
        match field.kind {
            FieldKind::StreetAddress => {
                let Some(lookup) = &self.address_lookup else {
                    return outcome;
                };
                match lookup.lookup(field) {
                    Ok(found) if found.exists => outcome,
                    Ok(_) => ValidationOutcome::ambiguous(
                        "not found in authoritative address registry",
                    ),
                    Err(error) => {
                        debug!(%error, "address lookup unavailable");
                        ValidationOutcome::ambiguous("address verification unavailable")
                    }
                }
            }
            FieldKind::Phone | FieldKind::Email => {
                let Some(verifier) = &self.verifier else {
                    return outcome;
                };
                match verifier.verify(field) {
                    Ok(result) if result.verified => outcome,
                    Ok(_) => ValidationOutcome::ambiguous("verification service rejected value"),
                    Err(error) => {
                        debug!(%error, "verification service unavailable");
                        ValidationOutcome::ambiguous("verification service unavailable")
                    }
                }
            }
            _ => outcome,
        }
    }
}

/// Confidence in the canonical value: full for a valid declared locale,
/// slightly lower for inferred ones, low for anything flagged.
fn confidence_for(field: &NormalizedField, outcome: &ValidationOutcome) -> f64 {
    match outcome {
        ValidationOutcome::Valid => match field.locale_used {
            LocaleUsed::Declared(_) => 1.0,
            LocaleUsed::Inferred(_) => 0.9,
            LocaleUsed::Generic => 0.8,
        },
        ValidationOutcome::Ambiguous { .. } => 0.5,
        ValidationOutcome::InvalidChecksum { .. } => 0.3,
        ValidationOutcome::InvalidFormat { .. } | ValidationOutcome::Unsupported { .. } => 0.0,
    }
}
