//! Formula engine API.
//!
//! - [`Coordinate`], [`column_name`], [`parse_address`] - cell address codec
//! - [`Tokenizer`], [`Token`] - single-pass formula scanner
//! - [`evaluate`], [`Resolver`] - left-to-right formula reduction
//! - [`format_number`], [`format_dynamic`] - value formatting

mod cell_ref;
mod eval;
mod format;
mod token;

pub use cell_ref::{Coordinate, MAX_COLUMNS, column_index, column_name, parse_address};
pub use eval::{Resolver, display_value, evaluate, formula_body};
pub use format::{format_dynamic, format_number};
pub use token::{Token, TokenKind, TokenValue, Tokenizer};
