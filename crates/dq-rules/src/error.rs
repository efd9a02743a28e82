#![deny(unsafe_code)]

use std::path::PathBuf;

use dq_model::FieldKind;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rule set {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML rule set: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid rule entry #{index}: {message}")]
    InvalidRule { index: usize, message: String },

    #[error("no rule registered for {kind} in locale {locale}")]
    UnsupportedLocale { kind: FieldKind, locale: String },
}

impl RulesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_rule(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            index,
            message: message.into(),
        }
    }
}
