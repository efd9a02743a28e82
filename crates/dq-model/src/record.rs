//! The unit of work (a customer record) and the per-record report.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, LocaleUsed, NormalizedField, RawField};
use crate::outcome::ValidationOutcome;

/// An ordered mapping from field kind to raw field; one field per kind.
///
/// Created by the caller, consumed once by the pipeline, discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub fields: BTreeMap<FieldKind, RawField>,
}

impl CustomerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, keyed by its kind. Replaces any previous field of
    /// the same kind.
    pub fn insert(&mut self, field: RawField) {
        self.fields.insert(field.kind, field);
    }

    #[must_use]
    pub fn with_field(mut self, field: RawField) -> Self {
        self.insert(field);
        self
    }

    pub fn get(&self, kind: FieldKind) -> Option<&RawField> {
        self.fields.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawField> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<RawField> for CustomerRecord {
    fn from_iter<I: IntoIterator<Item = RawField>>(iter: I) -> Self {
        let mut record = Self::new();
        for field in iter {
            record.insert(field);
        }
        record
    }
}

/// Caller-supplied schema: which field kinds are mandatory for a record
/// to count as valid. Nothing here is hardcoded in the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub mandatory: BTreeSet<FieldKind>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn require(mut self, kind: FieldKind) -> Self {
        self.mandatory.insert(kind);
        self
    }

    pub fn is_mandatory(&self, kind: FieldKind) -> bool {
        self.mandatory.contains(&kind)
    }
}

impl FromIterator<FieldKind> for RecordSchema {
    fn from_iter<I: IntoIterator<Item = FieldKind>>(iter: I) -> Self {
        Self {
            mandatory: iter.into_iter().collect(),
        }
    }
}

/// Per-field entry of a [`RecordReport`]: original value preserved next to
/// the canonical one, plus the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub raw: String,
    pub normalized: String,
    pub locale_used: LocaleUsed,
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
    /// Confidence in the canonical value, 0.0–1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<String>,
}

impl FieldReport {
    pub fn new(raw: impl Into<String>, normalized: &NormalizedField, outcome: ValidationOutcome) -> Self {
        Self {
            raw: raw.into(),
            normalized: normalized.value.clone(),
            locale_used: normalized.locale_used.clone(),
            outcome,
            confidence: None,
            legal_entity: normalized.legal_entity.clone(),
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Aggregate report for one record.
///
/// Invariant: every field present in the input record has exactly one
/// entry; mandatory fields absent from the input are reported too, never
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordReport {
    pub fields: BTreeMap<FieldKind, FieldReport>,
    /// True only if every mandatory field's outcome is `Valid`.
    pub valid: bool,
}

impl RecordReport {
    pub fn get(&self, kind: FieldKind) -> Option<&FieldReport> {
        self.fields.get(&kind)
    }

    /// Kinds whose outcome is anything other than `Valid`.
    pub fn failing_fields(&self) -> Vec<FieldKind> {
        self.fields
            .iter()
            .filter(|(_, report)| !report.outcome.is_valid())
            .map(|(kind, _)| *kind)
            .collect()
    }

    pub fn valid_count(&self) -> usize {
        self.fields
            .values()
            .filter(|report| report.outcome.is_valid())
            .count()
    }
}
