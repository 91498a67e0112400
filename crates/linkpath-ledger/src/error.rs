use std::path::PathBuf;

use crate::record::Operator;

/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("operator `{0}` is not valid; must be one of: {valid}", valid = Operator::valid_names())]
    InvalidOperator(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow: {0}")]
    Overflow(String),

    #[error("ledger file {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("row index {index} out of range; ledger has {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("record fails validation: {0}")]
    Validation(String),

    #[error("corrupt ledger at line {line}: {reason}")]
    Corrupt { line: u64, reason: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
