//! Validation verdicts.
//!
//! Malformed data is never an error in the Rust sense: every way a field
//! can fail is a variant here, so batch processing never aborts on one bad
//! value.

use serde::{Deserialize, Serialize};

/// Verdict attached to a normalized field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Structurally valid; checksum (when defined) verified.
    Valid,
    /// Value does not match the canonical pattern, length bounds, or
    /// assigned range for its locale.
    InvalidFormat { reason: String },
    /// Structurally plausible but the check digit does not verify.
    /// Usually a single-digit transcription error, so both digits are
    /// reported for targeted correction.
    InvalidChecksum {
        reason: String,
        expected: u8,
        supplied: u8,
    },
    /// No rule is registered for this (field kind, locale). Indicates a
    /// configuration gap, not bad data.
    Unsupported { reason: String },
    /// Normalization could not confidently determine a locale or had to
    /// guess; flagged for human review, never silently accepted.
    Ambiguous { reason: String },
}

impl ValidationOutcome {
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        ValidationOutcome::InvalidFormat {
            reason: reason.into(),
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        ValidationOutcome::Unsupported {
            reason: reason.into(),
        }
    }

    pub fn ambiguous(reason: impl Into<String>) -> Self {
        ValidationOutcome::Ambiguous {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Human-readable reason, when the verdict carries one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::InvalidFormat { reason }
            | ValidationOutcome::InvalidChecksum { reason, .. }
            | ValidationOutcome::Unsupported { reason }
            | ValidationOutcome::Ambiguous { reason } => Some(reason),
        }
    }

    /// Short label for summaries and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationOutcome::Valid => "valid",
            ValidationOutcome::InvalidFormat { .. } => "invalid_format",
            ValidationOutcome::InvalidChecksum { .. } => "invalid_checksum",
            ValidationOutcome::Unsupported { .. } => "unsupported",
            ValidationOutcome::Ambiguous { .. } => "ambiguous",
        }
    }
}
