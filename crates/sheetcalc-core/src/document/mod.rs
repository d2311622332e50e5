//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod resolve;
mod state;
mod view;

pub use state::{Cells, Document, UndoAction, UndoEntry};
pub use view::ERROR_PLACEHOLDER;
