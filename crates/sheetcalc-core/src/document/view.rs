//! Read-only views for UI layers.
//!
//! A UI binds to rows as plain ordered sequences of displayed strings indexed
//! by column; it never sees per-column named fields.

use log::debug;

use super::Document;
use sheetcalc_engine::engine::{Coordinate, MAX_COLUMNS};

/// Shown in place of a value whose formula failed.
pub const ERROR_PLACEHOLDER: &str = "#ERR!";

impl Document {
    /// Displayed value of a cell, with any evaluation error shown as [`ERROR_PLACEHOLDER`].
    pub fn cell_display(&self, coord: &Coordinate) -> String {
        self.value_at(coord).unwrap_or_else(|e| {
            debug!("{coord}: {e}");
            ERROR_PLACEHOLDER.to_string()
        })
    }

    /// Displayed values for the first `columns` columns of a row (capped at `ZZ`).
    pub fn row_values(&self, row: usize, columns: usize) -> Vec<String> {
        (0..columns.min(MAX_COLUMNS))
            .filter_map(|col| Coordinate::from_indices(row, col).ok())
            .map(|coord| self.cell_display(&coord))
            .collect()
    }

    /// Rows and columns spanned from `A1` to the furthest populated cell.
    /// Returns `None` for an empty document.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let mut extent: Option<(usize, usize)> = None;
        for entry in self.cells.iter() {
            let coord = entry.key();
            let Ok(col) = coord.column_index() else {
                continue;
            };
            let (rows, cols) = extent.unwrap_or((0, 0));
            extent = Some((rows.max(coord.row + 1), cols.max(col + 1)));
        }
        extent
    }
}
