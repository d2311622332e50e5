//! Error types for the formula engine.

use thiserror::Error;

/// Errors raised while parsing addresses, scanning formulas, or evaluating them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("column index out of range: {0}")]
    OutOfRange(usize),

    #[error("malformed cell address: {0:?}")]
    MalformedAddress(String),

    #[error("unexpected character {found:?} at offset {offset}")]
    MalformedToken { found: String, offset: usize },

    #[error("expected value but found an operator at offset {offset}")]
    UnexpectedOperator { offset: usize },

    #[error("expected operator but found a value at offset {offset}")]
    MissingOperator { offset: usize },

    #[error("cell {address} does not hold a number: {value:?}")]
    InvalidOperand { address: String, value: String },

    #[error("circular reference through {0}")]
    CircularReference(String),

    #[error("function escape used without a script host")]
    NoScriptHost,

    #[error("script error: {0}")]
    Script(String),

    #[error("error in custom functions: {0}")]
    ScriptCompile(String),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
