//! Errors raised while extracting typed data out of a `Value`.
//!
//! Matching never fails. These errors only come from the accessor side of
//! the API, typically inside handlers that pull fields out of the subject.

use crate::value::ValueKind;

/// Failure to read a `Value` as a particular shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value was of a different kind than requested.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
    /// A record lookup named a key the record does not have.
    #[error("record has no field `{field}`")]
    MissingField { field: String },
}

impl ValueError {
    pub(crate) fn mismatch(expected: ValueKind, found: ValueKind) -> Self {
        ValueError::TypeMismatch { expected, found }
    }
}
