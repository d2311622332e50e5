//! sheetcalc-core - UI-agnostic document model.

pub mod document;
pub mod error;

pub use document::{Cells, Document, ERROR_PLACEHOLDER, UndoAction, UndoEntry};
pub use error::{Result, SheetError};

pub use sheetcalc_engine::engine::Coordinate;
