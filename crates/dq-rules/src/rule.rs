//! Rule definitions. Rules are data: a rule carries patterns and bounds,
//! never behavior; normalizers and validators interpret them through one
//! shared code path per field kind.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dq_model::{CountryCode, FieldKind};

/// Identifier of a check-digit algorithm a rule may declare.
///
/// Selection is table-driven: adding a country algorithm means adding a
/// variant and its computation, not touching validator control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumAlgorithm {
    /// Argentine CUIT/CUIL mod-11 over the first ten digits.
    ArCuitMod11,
}

impl ChecksumAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::ArCuitMod11 => "ar_cuit_mod11",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ar_cuit_mod11" => Ok(ChecksumAlgorithm::ArCuitMod11),
            other => Err(format!("unknown checksum algorithm: {other:?}")),
        }
    }
}

/// Assigned numeric range for code-style fields, applied to the value's
/// leading digits (e.g. USPS ZIP assignment 00501-99950).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedRange {
    pub min: u32,
    pub max: u32,
}

impl AssignedRange {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Optional validity window for historical rule variants. Open bounds are
/// `None`; dates are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EffectiveRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// A single locale rule: structural and formatting facts for one
/// (field kind, country) pair. `country == None` marks a generic rule
/// applying to any locale.
///
/// Immutable once registered; shared by read-only reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleRule {
    pub kind: FieldKind,
    pub country: Option<CountryCode>,
    /// Canonical pattern the normalized value must match exactly.
    pub pattern: String,
    /// Template re-assembling stripped significant characters into the
    /// canonical form: `N` consumes a digit, `A` consumes a letter, any
    /// other character is emitted literally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Bounds on the count of significant characters after stripping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_min: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_max: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_range: Option<AssignedRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective: Option<EffectiveRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LocaleRule {
    pub fn new(kind: FieldKind, country: Option<CountryCode>, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            country,
            pattern: pattern.into(),
            canonical_template: None,
            checksum_algorithm: None,
            length_min: None,
            length_max: None,
            assigned_range: None,
            effective: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.canonical_template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_checksum(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.checksum_algorithm = Some(algorithm);
        self
    }

    #[must_use]
    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length_min = Some(min);
        self.length_max = Some(max);
        self
    }

    #[must_use]
    pub fn with_assigned_range(mut self, min: u32, max: u32) -> Self {
        self.assigned_range = Some(AssignedRange { min, max });
        self
    }

    #[must_use]
    pub fn with_effective(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.effective = Some(EffectiveRange { from, to });
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// True when this rule applies on `date` (undated rules always apply).
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.effective.is_none_or(|range| range.contains(date))
    }

    /// Length check over the significant-character count.
    pub fn length_ok(&self, significant: usize) -> bool {
        self.length_min.is_none_or(|min| significant >= min)
            && self.length_max.is_none_or(|max| significant <= max)
    }

    /// Locale label for diagnostics ("AR", or "*" for generic rules).
    pub fn locale_label(&self) -> &str {
        self.country.as_ref().map_or("*", CountryCode::as_str)
    }
}
