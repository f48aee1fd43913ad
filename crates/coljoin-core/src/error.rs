use thiserror::Error;

use crate::schema::DataType;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("key type mismatch: left is {left}, right is {right}")]
    TypeMismatch { left: DataType, right: DataType },

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(DataType),

    #[error("column {label} has {found} rows, expected {expected}")]
    SizeMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("label shape error: {0}")]
    LabelShape(String),

    #[error("label not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}
