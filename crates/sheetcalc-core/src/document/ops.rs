use log::debug;

use super::resolve::SheetResolver;
use super::{Document, UndoAction, UndoEntry};
use crate::error::{Result, SheetError};
use sheetcalc_engine::engine::{Coordinate, formula_body, parse_address};

impl Document {
    /// Store raw text without touching history.
    fn apply_text(&mut self, coord: &Coordinate, text: Option<String>) {
        match text {
            Some(text) => {
                self.cells.insert(coord.clone(), text);
            }
            None => {
                self.cells.remove(coord);
            }
        }
    }

    fn change_for(&self, coord: Coordinate, text: &str) -> UndoAction {
        let text = text.trim();
        UndoAction {
            old_text: self.cells.get(&coord).map(|r| r.value().clone()),
            new_text: (!text.is_empty()).then(|| text.to_string()),
            coord,
        }
    }

    fn push_undo(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
        if self.undo_stack.len() > super::state::MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    /// Set a cell's raw text. Surrounding whitespace is trimmed; empty text clears the cell.
    ///
    /// Text starting with `=` or `@` is a formula and is evaluated when read.
    pub fn set_cell(&mut self, address: &str, text: &str) -> Result<()> {
        let coord = parse_address(address)?;
        let action = self.change_for(coord, text);
        debug!("set {} = {:?}", action.coord, action.new_text);

        self.apply_text(&action.coord, action.new_text.clone());
        self.push_undo(UndoEntry::Single(action));
        Ok(())
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, address: &str) -> Result<()> {
        self.set_cell(address, "")
    }

    /// Write a row left to right starting at column A, as one undo entry.
    ///
    /// Nothing is written if any column falls outside `A..ZZ`.
    pub fn set_row(&mut self, row: usize, values: &[&str]) -> Result<()> {
        let mut actions = Vec::with_capacity(values.len());
        for (col, text) in values.iter().enumerate() {
            let coord = Coordinate::from_indices(row, col)?;
            let action = self.change_for(coord, text);
            if action.old_text != action.new_text {
                actions.push(action);
            }
        }
        if actions.is_empty() {
            return Ok(());
        }

        for action in &actions {
            self.apply_text(&action.coord, action.new_text.clone());
        }
        self.push_undo(UndoEntry::Batch(actions));
        Ok(())
    }

    /// Displayed value of a cell: literals verbatim, formulas evaluated, unset cells empty.
    pub fn get_cell(&self, address: &str) -> Result<String> {
        let coord = parse_address(address)?;
        self.value_at(&coord)
    }

    /// Evaluate a formula against the document without storing it.
    ///
    /// A leading `=` or `@` marker is stripped first, as for stored cells.
    pub fn evaluate(&self, formula: &str) -> Result<String> {
        let formula = formula_body(formula).unwrap_or(formula);
        Ok(SheetResolver::new(self).evaluate(formula)?)
    }

    pub(crate) fn value_at(&self, coord: &Coordinate) -> Result<String> {
        Ok(SheetResolver::new(self).value_at(coord)?)
    }

    /// Raw stored text of a cell, formulas included.
    pub fn get_expression(&self, address: &str) -> Result<String> {
        let coord = parse_address(address)?;
        Ok(self
            .cells
            .get(&coord)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    pub fn undo(&mut self) -> Result<()> {
        let entry = self.undo_stack.pop().ok_or(SheetError::NothingToUndo)?;
        let actions = match &entry {
            UndoEntry::Single(action) => std::slice::from_ref(action),
            UndoEntry::Batch(actions) => actions.as_slice(),
        };
        for action in actions {
            self.apply_text(&action.coord, action.old_text.clone());
        }
        self.redo_stack.push(entry);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let entry = self.redo_stack.pop().ok_or(SheetError::NothingToRedo)?;
        let actions = match &entry {
            UndoEntry::Single(action) => std::slice::from_ref(action),
            UndoEntry::Batch(actions) => actions.as_slice(),
        };
        for action in actions {
            self.apply_text(&action.coord, action.new_text.clone());
        }
        self.undo_stack.push(entry);
        Ok(())
    }
}
