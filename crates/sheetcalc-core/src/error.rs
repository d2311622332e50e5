//! Error types for sheetcalc core.

use thiserror::Error;

use sheetcalc_engine::FormulaError;

/// Errors that can occur while editing or reading a document
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error("No functions file loaded")]
    NoFunctionsLoaded,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, SheetError>;
