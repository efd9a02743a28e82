use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid country code: {0:?} (expected ISO-3166-1 alpha-2)")]
    InvalidCountryCode(String),
    #[error("unknown field kind: {0:?}")]
    UnknownFieldKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
