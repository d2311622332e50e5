use log::{debug, warn};

use super::Document;
use crate::error::{Result, SheetError};
use sheetcalc_engine::RhaiHost;
use std::path::{Path, PathBuf};

const MAX_FUNCTION_FILE_BYTES: u64 = 1_048_576; // 1 MiB

fn read_functions_file(path: &Path) -> Result<String> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_FUNCTION_FILE_BYTES {
        return Err(SheetError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "{} is {} bytes; functions files are capped at {} bytes",
                path.display(),
                meta.len(),
                MAX_FUNCTION_FILE_BYTES
            ),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

impl Document {
    /// Load custom Rhai functions from a file (appends to existing functions).
    ///
    /// The script host is rebuilt, so variables bound by earlier escapes are
    /// discarded. On failure the document keeps its current host.
    /// Returns the canonical path loaded.
    pub fn load_functions(&mut self, path: &Path) -> Result<PathBuf> {
        let path_buf = std::fs::canonicalize(path)?;
        if self.functions_files.contains(&path_buf) {
            // Already loaded: keep current compiled state unchanged.
            return Ok(path_buf);
        }
        let content = read_functions_file(&path_buf)?;

        let new_custom_functions = match &self.custom_functions {
            Some(existing) => format!("{}\n\n{}", existing, content),
            None => content,
        };

        // Compile in a new host first so failures don't mutate state.
        let host = RhaiHost::with_functions(Some(new_custom_functions.as_str())).inspect_err(|e| {
            warn!("{}: {e}", path_buf.display());
        })?;

        debug!("loaded functions from {}", path_buf.display());
        self.functions_files.push(path_buf.clone());
        self.custom_functions = Some(new_custom_functions);
        self.host = host;
        Ok(path_buf)
    }

    /// Reload all custom functions from the loaded files.
    /// Returns the number of files reloaded.
    pub fn reload_functions(&mut self) -> Result<usize> {
        if self.functions_files.is_empty() {
            return Err(SheetError::NoFunctionsLoaded);
        }

        let mut merged = String::new();
        for (idx, path) in self.functions_files.iter().enumerate() {
            let content = read_functions_file(path)?;
            if idx > 0 {
                merged.push_str("\n\n");
            }
            merged.push_str(&content);
        }

        let host = RhaiHost::with_functions(Some(merged.as_str()))?;
        self.custom_functions = Some(merged);
        self.host = host;
        Ok(self.functions_files.len())
    }
}
