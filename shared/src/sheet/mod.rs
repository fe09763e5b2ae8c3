//! Worksheet layout: A1 ranges, the positional column table, header names
//! and the header-keyed row type.

pub mod a1;
pub mod columns;
pub mod headers;
mod row;

pub use a1::{SheetRange, column_index, column_letter, trailing_row_number};
pub use row::SheetRow;
