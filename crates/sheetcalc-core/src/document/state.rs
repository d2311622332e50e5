use dashmap::DashMap;
use sheetcalc_engine::RhaiHost;
use sheetcalc_engine::engine::Coordinate;
use std::path::PathBuf;

/// Maximum number of undo entries to keep
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// Sparse cell storage: trimmed raw text per address.
pub type Cells = DashMap<Coordinate, String>;

/// Represents an undoable change to a single cell
#[derive(Clone, Debug, PartialEq)]
pub struct UndoAction {
    pub coord: Coordinate,
    pub old_text: Option<String>,
    pub new_text: Option<String>,
}

/// Represents an undo entry (single action or a whole row write)
#[derive(Clone, Debug, PartialEq)]
pub enum UndoEntry {
    Single(UndoAction),
    Batch(Vec<UndoAction>),
}

/// UI-agnostic document state for the spreadsheet.
pub struct Document {
    /// Raw cell text keyed by coordinate
    pub cells: Cells,
    /// Script host for `@` escapes, owned for the life of the document
    pub(crate) host: RhaiHost,
    /// Paths to custom Rhai functions files
    pub functions_files: Vec<PathBuf>,
    /// Cached custom functions script content (concatenated from all files)
    pub custom_functions: Option<String>,
    /// Undo stack
    pub undo_stack: Vec<UndoEntry>,
    /// Redo stack
    pub redo_stack: Vec<UndoEntry>,
}

impl Document {
    /// Create an empty document with a fresh script host.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Document {
            cells: DashMap::new(),
            host: RhaiHost::new(),
            functions_files: Vec::new(),
            custom_functions: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
