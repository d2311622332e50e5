//! Cell address parsing and column naming.
//!
//! Columns use the bijective base-26 letters of traditional spreadsheets,
//! limited to one or two letters (`A` through `ZZ`, indices `0..702`). Rows
//! are written 1-based and stored 0-based.
//!
//! # Examples
//!
//! ```
//! use sheetcalc_engine::engine::{column_name, parse_address};
//!
//! assert_eq!(column_name(27).unwrap(), "AB");
//! let coord = parse_address("AB3").unwrap();
//! assert_eq!(coord.row, 2);
//! assert_eq!(coord.column, "AB");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{FormulaError, Result};

/// Number of addressable columns (`A`..`ZZ`).
pub const MAX_COLUMNS: usize = 702;

const LETTERS: usize = 26;

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<letters>[A-Z]{1,2})(?<numbers>[0-9]+)$").expect("address pattern is valid")
});

/// A parsed cell address: zero-based row plus the column's letter name.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Coordinate {
    pub row: usize,
    pub column: String,
}

impl Coordinate {
    /// Build a coordinate from zero-based row and column indices.
    pub fn from_indices(row: usize, col: usize) -> Result<Coordinate> {
        Ok(Coordinate {
            row,
            column: column_name(col)?,
        })
    }

    /// Zero-based index of this coordinate's column.
    pub fn column_index(&self) -> Result<usize> {
        column_index(&self.column)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        parse_address(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row + 1)
    }
}

/// Convert a zero-based column index to its letter name (0 -> A, 26 -> AA, 701 -> ZZ).
pub fn column_name(index: usize) -> Result<String> {
    if index < LETTERS {
        Ok(letter(index).to_string())
    } else if index < MAX_COLUMNS {
        // The leading letter has no zero digit, hence the offset by one.
        let msd = letter(index / LETTERS - 1);
        let lsd = letter(index % LETTERS);
        Ok([msd, lsd].iter().collect())
    } else {
        Err(FormulaError::OutOfRange(index))
    }
}

/// Inverse of [`column_name`].
pub fn column_index(name: &str) -> Result<usize> {
    let malformed = || FormulaError::MalformedAddress(name.to_string());
    let digit = |b: u8| {
        if b.is_ascii_uppercase() {
            Ok((b - b'A') as usize)
        } else {
            Err(malformed())
        }
    };

    match name.as_bytes() {
        [lsd] => digit(*lsd),
        [msd, lsd] => Ok((digit(*msd)? + 1) * LETTERS + digit(*lsd)?),
        _ => Err(malformed()),
    }
}

/// Parse an address such as `A1` or `AA12` into a [`Coordinate`].
///
/// The column is one or two uppercase letters and the row a positive decimal
/// number. The column is not checked against [`MAX_COLUMNS`]; every two-letter
/// name is already in range.
pub fn parse_address(text: &str) -> Result<Coordinate> {
    let malformed = || FormulaError::MalformedAddress(text.to_string());
    let caps = ADDRESS_RE.captures(text).ok_or_else(malformed)?;

    let row = caps["numbers"]
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(malformed)?;

    Ok(Coordinate {
        row,
        column: caps["letters"].to_string(),
    })
}

fn letter(offset: usize) -> char {
    (b'A' + offset as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_column_name_worked_values() {
        assert_eq!(column_name(0).unwrap(), "A");
        assert_eq!(column_name(25).unwrap(), "Z");
        assert_eq!(column_name(26).unwrap(), "AA");
        assert_eq!(column_name(51).unwrap(), "AZ");
        assert_eq!(column_name(52).unwrap(), "BA");
        assert_eq!(column_name(701).unwrap(), "ZZ");
    }

    #[test]
    fn test_column_name_out_of_range() {
        assert_eq!(column_name(702), Err(FormulaError::OutOfRange(702)));
        assert_eq!(
            column_name(usize::MAX),
            Err(FormulaError::OutOfRange(usize::MAX))
        );
    }

    #[test]
    fn test_column_index_rejects_bad_names() {
        assert!(column_index("").is_err());
        assert!(column_index("AAA").is_err());
        assert!(column_index("a").is_err());
        assert!(column_index("A1").is_err());
    }

    #[test]
    fn test_parse_address_worked_values() {
        let a1 = parse_address("A1").unwrap();
        assert_eq!((a1.row, a1.column.as_str()), (0, "A"));

        let a99 = parse_address("A99").unwrap();
        assert_eq!((a99.row, a99.column.as_str()), (98, "A"));

        let aa1 = parse_address("AA1").unwrap();
        assert_eq!((aa1.row, aa1.column.as_str()), (0, "AA"));

        let zz1 = parse_address("ZZ1").unwrap();
        assert_eq!((zz1.row, zz1.column.as_str()), (0, "ZZ"));
    }

    #[test]
    fn test_parse_address_invalid_inputs() {
        for bad in ["", "A", "1", "1A", "AB", "A0", "ABC1", "a1", "A 1", "A+1", "A1B", "AA"] {
            assert!(
                matches!(parse_address(bad), Err(FormulaError::MalformedAddress(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_address_row_overflow() {
        let huge = format!("A{}", "9".repeat(40));
        assert!(parse_address(&huge).is_err());
    }

    #[test]
    fn test_coordinate_display() {
        let coord = parse_address("BC42").unwrap();
        assert_eq!(coord.to_string(), "BC42");
        assert_eq!(Coordinate::from_indices(0, 27).unwrap().to_string(), "AB1");
    }

    proptest! {
        #[test]
        fn column_name_round_trips(index in 0usize..MAX_COLUMNS) {
            let name = column_name(index).unwrap();
            prop_assert!(!name.is_empty() && name.len() <= 2);
            prop_assert_eq!(column_index(&name).unwrap(), index);

            let coord = parse_address(&format!("{name}1")).unwrap();
            prop_assert_eq!(coord.row, 0);
            prop_assert_eq!(coord.column, name);
        }

        #[test]
        fn parse_address_keeps_row(row in 1usize..1_000_000, index in 0usize..MAX_COLUMNS) {
            let name = column_name(index).unwrap();
            let coord = parse_address(&format!("{name}{row}")).unwrap();
            prop_assert_eq!(coord.row, row - 1);
            prop_assert_eq!(coord.column_index().unwrap(), index);
        }
    }
}
