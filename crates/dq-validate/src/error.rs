use dq_model::FieldKind;

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("rule pattern for {kind} does not compile: {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        kind: FieldKind,
        #[source]
        source: regex::Error,
    },
}
