//! Markdown rendering of the populated sheet region.

use sheetcalc_core::Document;
use sheetcalc_engine::engine::column_name;

/// Render every cell from `A1` to the furthest populated cell as a markdown table.
pub fn render_markdown(doc: &Document) -> String {
    let Some((rows, cols)) = doc.bounds() else {
        return "*Empty spreadsheet*\n".to_string();
    };

    let mut out = String::from("|   |");
    for col in 0..cols {
        let name = column_name(col).unwrap_or_default();
        out.push_str(&format!(" {} |", name));
    }
    out.push_str("\n|---|");
    out.push_str(&"---|".repeat(cols));
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("| {} |", row + 1)); // 1-based row numbers
        for value in doc.row_values(row, cols) {
            out.push_str(&format!(" {} |", escape_markdown(&value)));
        }
        out.push('\n');
    }
    out
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document() {
        assert_eq!(render_markdown(&Document::new()), "*Empty spreadsheet*\n");
    }

    #[test]
    fn test_table_layout() {
        let mut doc = Document::new();
        doc.set_cell("A1", "2").unwrap();
        doc.set_cell("B2", "=A1 * 2").unwrap();
        doc.set_cell("A2", "a|b").unwrap();

        let expected = "\
|   | A | B |
|---|---|---|
| 1 | 2 |  |
| 2 | a\\|b | 4 |
";
        assert_eq!(render_markdown(&doc), expected);
    }
}
