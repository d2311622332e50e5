//! sheetcalc_engine - formula engine + Rhai script escapes.

pub mod engine;
pub mod error;
pub mod script;

pub use error::{FormulaError, Result};
pub use script::{RhaiHost, ScriptHost};
