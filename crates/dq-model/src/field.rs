//! Field kinds and the raw/normalized value pair that flows through the
//! pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The kind of contact/identity field a value belongs to.
///
/// Serialized as the snake_case identifiers used on the input surface
/// (`personal_name`, `national_id`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A person's full name.
    PersonalName,
    /// An organization name, possibly carrying a legal-entity suffix.
    CompanyName,
    /// A national identifier (tax id, personal id number).
    NationalId,
    /// A telephone number.
    Phone,
    /// An email address.
    Email,
    /// A postal/ZIP code.
    PostalCode,
    /// A free-form street address line.
    StreetAddress,
}

impl FieldKind {
    /// All kinds, in report order.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::PersonalName,
        FieldKind::CompanyName,
        FieldKind::NationalId,
        FieldKind::Phone,
        FieldKind::Email,
        FieldKind::PostalCode,
        FieldKind::StreetAddress,
    ];

    /// Canonical identifier as it appears in rule files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::PersonalName => "personal_name",
            FieldKind::CompanyName => "company_name",
            FieldKind::NationalId => "national_id",
            FieldKind::Phone => "phone",
            FieldKind::Email => "email",
            FieldKind::PostalCode => "postal_code",
            FieldKind::StreetAddress => "street_address",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "personal_name" => Ok(FieldKind::PersonalName),
            "company_name" => Ok(FieldKind::CompanyName),
            "national_id" => Ok(FieldKind::NationalId),
            "phone" => Ok(FieldKind::Phone),
            "email" => Ok(FieldKind::Email),
            "postal_code" => Ok(FieldKind::PostalCode),
            "street_address" => Ok(FieldKind::StreetAddress),
            other => Err(ModelError::UnknownFieldKind(other.to_string())),
        }
    }
}

/// An ISO-3166-1 alpha-2 country code, stored uppercase.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ModelError::InvalidCountryCode(value));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A single raw input field, read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub kind: FieldKind,
    pub value: String,
    /// Declared country hint, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryCode>,
}

impl RawField {
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            country: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: CountryCode) -> Self {
        self.country = Some(country);
        self
    }
}

/// How the locale applied during normalization was determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "country", rename_all = "snake_case")]
pub enum LocaleUsed {
    /// Caller supplied the country hint.
    Declared(CountryCode),
    /// Country inferred from structural cues (calling code, province token).
    Inferred(CountryCode),
    /// No locale could be determined; a generic rule applied.
    Generic,
}

impl LocaleUsed {
    pub fn country(&self) -> Option<&CountryCode> {
        match self {
            LocaleUsed::Declared(c) | LocaleUsed::Inferred(c) => Some(c),
            LocaleUsed::Generic => None,
        }
    }
}

/// The canonical form of a field after normalization.
///
/// `fully_normalized == false` means normalization fell back to a
/// best-effort cleanup (no matching rule, or the canonical template could
/// not be applied); validators report such values as ambiguous rather
/// than judging them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedField {
    pub kind: FieldKind,
    pub value: String,
    pub locale_used: LocaleUsed,
    pub fully_normalized: bool,
    /// Legal-entity suffix extracted from a company name ("S.A.", "GmbH").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<String>,
}

impl NormalizedField {
    pub fn new(kind: FieldKind, value: impl Into<String>, locale_used: LocaleUsed) -> Self {
        Self {
            kind,
            value: value.into(),
            locale_used,
            fully_normalized: true,
            legal_entity: None,
        }
    }

    /// Mark this value as a best-effort cleanup rather than a full
    /// canonicalization.
    #[must_use]
    pub fn best_effort(mut self) -> Self {
        self.fully_normalized = false;
        self
    }

    #[must_use]
    pub fn with_legal_entity(mut self, suffix: impl Into<String>) -> Self {
        self.legal_entity = Some(suffix.into());
        self
    }
}
