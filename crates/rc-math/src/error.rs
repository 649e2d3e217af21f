//! Error types for the math model

use thiserror::Error;

/// Math model error type
#[derive(Error, Debug)]
pub enum MathError {
    /// Malformed or inconsistent configuration, caught at load time
    #[error("Config error: {0}")]
    Config(String),

    /// A lookup by identifier with no entry
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An index or draw outside its valid domain
    #[error("{what} out of range: {value} (limit {limit})")]
    OutOfRange {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MathError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn out_of_range(what: &'static str, value: u64, limit: u64) -> Self {
        Self::OutOfRange { what, value, limit }
    }
}

/// Result type alias
pub type MathResult<T> = Result<T, MathError>;
