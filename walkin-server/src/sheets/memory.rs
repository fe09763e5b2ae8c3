//! In-process worksheet

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use shared::sheet::SheetRange;

pub use shared::sheet::columns::standard_headers;
use tokio::sync::RwLock;

use super::{SheetBackend, SheetError, SpreadsheetInfo};

/// Worksheet held in memory: row 1 is the header row.
///
/// Reads trim trailing empty cells and rows the way the Sheets API does.
/// [`MemorySheet::set_offline`] makes every call fail, to exercise error paths.
pub struct MemorySheet {
    sheet_name: String,
    grid: RwLock<Vec<Vec<String>>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl MemorySheet {
    /// Empty worksheet (no header row)
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self::with_rows(sheet_name, Vec::new())
    }

    /// Worksheet with the standard header row
    pub fn with_standard_headers(sheet_name: impl Into<String>) -> Self {
        Self::with_rows(sheet_name, vec![standard_headers()])
    }

    pub fn with_rows(sheet_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            grid: RwLock::new(rows),
            offline: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Snapshot of the whole grid
    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.grid.read().await.clone()
    }

    /// Number of successful append/update calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), SheetError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SheetError::Unavailable(format!(
                "worksheet '{}' is offline",
                self.sheet_name
            )));
        }
        Ok(())
    }
}

fn trim_trailing_empty(mut cells: Vec<String>) -> Vec<String> {
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn slice_columns(row: &[String], range: &SheetRange) -> Vec<String> {
    if range.first_column >= row.len() {
        return Vec::new();
    }
    let end = range.last_column.min(row.len() - 1);
    trim_trailing_empty(row[range.first_column..=end].to_vec())
}

#[async_trait]
impl SheetBackend for MemorySheet {
    async fn read_range(&self, range: SheetRange) -> Result<Vec<Vec<String>>, SheetError> {
        self.check_online()?;
        let grid = self.grid.read().await;
        let (skip, take) = match range.rows {
            None => (0, grid.len()),
            Some((start, end)) => {
                let start = start.saturating_sub(1) as usize;
                (start, (end as usize).saturating_sub(start))
            }
        };
        let mut values: Vec<Vec<String>> = grid
            .iter()
            .skip(skip)
            .take(take)
            .map(|row| slice_columns(row, &range))
            .collect();
        while values.last().is_some_and(|r| r.is_empty()) {
            values.pop();
        }
        Ok(values)
    }

    async fn append_row(&self, range: SheetRange, row: Vec<String>) -> Result<String, SheetError> {
        self.check_online()?;
        let mut grid = self.grid.write().await;
        let mut stored = vec![String::new(); range.first_column];
        stored.extend(row.into_iter().take(range.width()));
        grid.push(stored);
        let row_number = grid.len() as u64;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(SheetRange::row(range.first_column, range.last_column, row_number)
            .qualified(&self.sheet_name))
    }

    async fn update_row(&self, range: SheetRange, row: Vec<String>) -> Result<(), SheetError> {
        self.check_online()?;
        let Some((row_number, _)) = range.rows else {
            return Err(SheetError::InvalidResponse(format!(
                "update needs a row range, got {}",
                range
            )));
        };
        let index = row_number.saturating_sub(1) as usize;
        let mut grid = self.grid.write().await;
        if grid.len() <= index {
            grid.resize(index + 1, Vec::new());
        }
        let target = &mut grid[index];
        if target.len() <= range.last_column {
            target.resize(range.last_column + 1, String::new());
        }
        for (offset, value) in row.into_iter().take(range.width()).enumerate() {
            target[range.first_column + offset] = value;
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn spreadsheet_info(&self) -> Result<SpreadsheetInfo, SheetError> {
        self.check_online()?;
        Ok(SpreadsheetInfo {
            title: "In-memory walk-in sheet".to_string(),
            sheet_titles: vec![self.sheet_name.clone()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_append_returns_qualified_row_range() {
        let sheet = MemorySheet::with_rows("Walk-In", vec![cells(&["h1", "h2"])]);
        let updated = sheet
            .append_row(SheetRange::columns(0, 83), cells(&["1", "x"]))
            .await
            .unwrap();
        assert_eq!(updated, "'Walk-In'!A2:CF2");
        assert_eq!(sheet.write_count(), 1);
    }

    #[tokio::test]
    async fn test_read_single_column_trims_trailing() {
        let sheet = MemorySheet::with_rows(
            "Walk-In",
            vec![
                cells(&["No.", "", "", "", "", "No."]),
                cells(&["1", "", "", "", "", "1"]),
                cells(&["", "", "", "", "", "7"]),
                cells(&["", ""]),
            ],
        );
        let col_a = sheet.read_range(SheetRange::column(0)).await.unwrap();
        assert_eq!(col_a, vec![cells(&["No."]), cells(&["1"])]);
        let col_f = sheet.read_range(SheetRange::column(5)).await.unwrap();
        assert_eq!(col_f, vec![cells(&["No."]), cells(&["1"]), cells(&["7"])]);
    }

    #[tokio::test]
    async fn test_update_row_overwrites_span() {
        let sheet = MemorySheet::with_rows("Walk-In", vec![cells(&["h"]), cells(&["a", "b"])]);
        sheet
            .update_row(SheetRange::row(0, 2, 2), cells(&["x", "y", "z"]))
            .await
            .unwrap();
        assert_eq!(sheet.rows().await[1], cells(&["x", "y", "z"]));
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let sheet = MemorySheet::new("Walk-In");
        sheet.set_offline(true);
        assert!(matches!(
            sheet.read_range(SheetRange::column(0)).await,
            Err(SheetError::Unavailable(_))
        ));
        assert!(sheet.spreadsheet_info().await.is_err());
        assert!(
            sheet
                .append_row(SheetRange::columns(0, 83), Vec::new())
                .await
                .is_err()
        );
    }
}
