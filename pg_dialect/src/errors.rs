//! Error types for dialect encode/decode operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialectError {
    #[error("malformed array literal: {0}")]
    MalformedArray(String),

    #[error("malformed hstore value: {0}")]
    MalformedHstore(String),

    #[error("cannot decode {found} into {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl DialectError {
    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        DialectError::TypeMismatch { expected, found }
    }
}
