//! Error types for the lending catalog

use std::io;

use thiserror::Error;

use crate::models::Shelf;

/// Legacy numeric status codes reported to front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    Range,
    Syntax,
    AlreadyOnLoan,
    AtCapacity,
}

impl ErrorCode {
    /// Import and issue failures share the same small code space.
    pub fn value(self) -> i8 {
        match self {
            ErrorCode::Success => 1,
            ErrorCode::Range | ErrorCode::AlreadyOnLoan => -1,
            ErrorCode::Syntax | ErrorCode::AtCapacity => -2,
        }
    }
}

/// Why an import was rejected
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("Range error on line {line}: declared count {value} cannot be held")]
    Range { line: usize, value: String },

    #[error("Read error: {0}")]
    Read(#[from] io::Error),
}

impl ImportError {
    pub(crate) fn syntax(line: usize, reason: impl Into<String>) -> Self {
        ImportError::Syntax {
            line,
            reason: reason.into(),
        }
    }

    /// Legacy numeric status for this outcome.
    ///
    /// Read errors have no code; they were raised rather than returned.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ImportError::Syntax { .. } => Some(ErrorCode::Syntax),
            ImportError::Range { .. } => Some(ErrorCode::Range),
            ImportError::Read(_) => None,
        }
    }

    /// Syntax and range errors are fixed by correcting the file; read
    /// errors need a different path or permissions.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ImportError::Read(_))
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("{kind} index {index} out of range (len {len})")]
    OutOfRange {
        kind: Shelf,
        index: usize,
        len: usize,
    },

    /// Book and user loan bookkeeping disagree; the catalog is corrupt.
    #[error("Loan bookkeeping desynchronized: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Only an invariant violation means the catalog can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::InvariantViolation(_))
    }
}

/// Result type alias for catalog operations
pub type AppResult<T> = Result<T, AppError>;
