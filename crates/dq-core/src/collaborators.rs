//! External collaborator seams.
//!
//! Authoritative registries (postal databases, carrier/MX lookups) live
//! outside the core. The pipeline calls them only when injected and
//! degrades to structural-only results when they are absent or failing;
//! their absence never blocks validation.

use dq_model::NormalizedField;

/// Error from an external collaborator. The pipeline treats any error as
/// "collaborator unavailable" and degrades the field to `Ambiguous`.
#[derive(Debug, thiserror::Error)]
#[error("collaborator failure: {message}")]
pub struct CollaboratorError {
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation from an authoritative address database.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressMatch {
    pub exists: bool,
    /// The registry's own canonical rendering, when it has one.
    pub canonical_form: Option<String>,
    /// (latitude, longitude) when the registry geocodes.
    pub geocode: Option<(f64, f64)>,
}

/// Authoritative postal/address database (USPS, Canada Post, ...).
pub trait AddressLookup: Send + Sync {
    fn lookup(&self, normalized: &NormalizedField) -> Result<AddressMatch, CollaboratorError>;
}

/// Confirmation from a phone/email verification service.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub verified: bool,
    /// Free-form provider metadata (carrier name, MX host, ...).
    pub metadata: Vec<(String, String)>,
}

/// Phone/email verification service (MX record checks, carrier lookups).
pub trait ContactVerifier: Send + Sync {
    fn verify(&self, normalized: &NormalizedField) -> Result<Verification, CollaboratorError>;
}
