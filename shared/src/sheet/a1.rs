//! A1 notation: column letters and typed ranges

use std::fmt;

/// Column letter(s) for a zero-based index: 0 → `A`, 25 → `Z`, 26 → `AA`, 83 → `CF`
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Zero-based index for column letters (case-insensitive)
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        n = n * 26 + (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
    }
    Some(n - 1)
}

/// A rectangular range inside one worksheet.
///
/// Whole columns render as `A:CF`; a row span renders as `A7:CF7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRange {
    pub first_column: usize,
    pub last_column: usize,
    /// Inclusive 1-based row span; `None` means whole columns
    pub rows: Option<(u64, u64)>,
}

impl SheetRange {
    /// Whole columns `first..=last`
    pub fn columns(first_column: usize, last_column: usize) -> Self {
        Self {
            first_column,
            last_column,
            rows: None,
        }
    }

    /// A single whole column
    pub fn column(index: usize) -> Self {
        Self::columns(index, index)
    }

    /// Columns `first..=last` of one 1-based sheet row
    pub fn row(first_column: usize, last_column: usize, row: u64) -> Self {
        Self {
            first_column,
            last_column,
            rows: Some((row, row)),
        }
    }

    /// Number of columns covered
    pub fn width(&self) -> usize {
        self.last_column.saturating_sub(self.first_column) + 1
    }

    /// Render with the worksheet prefix, quoting the sheet name: `'Walk-In'!A:CF`
    pub fn qualified(&self, sheet_name: &str) -> String {
        format!("'{}'!{}", sheet_name.replace('\'', "''"), self)
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = column_letter(self.first_column);
        let last = column_letter(self.last_column);
        match self.rows {
            None => write!(f, "{}:{}", first, last),
            Some((start, end)) => write!(f, "{}{}:{}{}", first, start, last, end),
        }
    }
}

/// Sheet row number from an updated-range string such as `'Walk-In'!A8:CF8`.
///
/// Reads the trailing digits of the range text.
pub fn trailing_row_number(updated_range: &str) -> Option<u64> {
    let digits: String = updated_range
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(5), "F");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(45), "AT");
        assert_eq!(column_letter(83), "CF");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("cf"), Some(83));
        assert_eq!(column_index("AU"), Some(46));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(SheetRange::columns(0, 83).to_string(), "A:CF");
        assert_eq!(SheetRange::column(5).to_string(), "F:F");
        assert_eq!(SheetRange::row(0, 83, 7).to_string(), "A7:CF7");
        assert_eq!(SheetRange::columns(0, 83).width(), 84);
    }

    #[test]
    fn test_qualified_quotes_sheet_name() {
        let range = SheetRange::column(0);
        assert_eq!(range.qualified("Walk-In"), "'Walk-In'!A:A");
        assert_eq!(range.qualified("Bob's"), "'Bob''s'!A:A");
    }

    #[test]
    fn test_trailing_row_number() {
        assert_eq!(trailing_row_number("'Walk-In'!A8:CF8"), Some(8));
        assert_eq!(trailing_row_number("Walk-In!A120:CF120"), Some(120));
        assert_eq!(trailing_row_number("Walk-In!A:CF"), None);
    }
}
