use thiserror::Error;

use crate::utils::time::TimeParseError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` has malformed value {value:?}: {reason}")]
    FieldFormat {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("expected {expected} record, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl ModelError {
    pub(crate) fn format(field: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        ModelError::FieldFormat {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn time(field: &'static str, err: TimeParseError) -> Self {
        let value = err.input().to_string();
        ModelError::format(field, value, err)
    }
}
