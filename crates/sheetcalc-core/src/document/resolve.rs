//! Recursive cell resolution with a circular reference guard.
//!
//! Resolving a formula cell evaluates it, which may resolve further cells.
//! Coordinates on the current resolution path are tracked so that a cell
//! reached again through its own references fails instead of recursing
//! forever (e.g. A1 references B1, B1 references A1).

use log::debug;
use std::collections::HashSet;

use sheetcalc_engine::ScriptHost;
use sheetcalc_engine::engine::{Coordinate, Resolver, evaluate, formula_body, parse_address};
use sheetcalc_engine::{FormulaError, Result};

use super::Document;

pub(crate) struct SheetResolver<'a> {
    doc: &'a Document,
    visiting: HashSet<Coordinate>,
}

impl<'a> SheetResolver<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        SheetResolver {
            doc,
            visiting: HashSet::new(),
        }
    }

    /// Displayed value of the cell at `coord`.
    pub(crate) fn value_at(&mut self, coord: &Coordinate) -> Result<String> {
        let doc = self.doc;
        let Some(raw) = doc.cells.get(coord).map(|entry| entry.value().clone()) else {
            return Ok(String::new());
        };
        let Some(formula) = formula_body(&raw) else {
            return Ok(raw);
        };

        if !self.visiting.insert(coord.clone()) {
            return Err(FormulaError::CircularReference(coord.to_string()));
        }

        debug!("evaluating {coord}: {formula:?}");
        let result = self.evaluate(formula);
        self.visiting.remove(coord);
        result
    }

    /// Evaluate a formula body against the document.
    pub(crate) fn evaluate(&mut self, formula: &str) -> Result<String> {
        let doc = self.doc;
        let host: &dyn ScriptHost = &doc.host;
        evaluate(formula, self, Some(host))
    }
}

impl Resolver for SheetResolver<'_> {
    fn resolve(&mut self, address: &str) -> Result<String> {
        let coord = parse_address(address)?;
        self.value_at(&coord)
    }
}
