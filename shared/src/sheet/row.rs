//! Header-keyed sheet row

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One data row keyed by header text.
///
/// Entries keep column order. Serialized as a JSON object; deserialization is
/// tolerant: numbers and booleans become strings, nulls are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    entries: Vec<(String, String)>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip a header row with a data row.
    ///
    /// Empty header cells are skipped, a repeated header keeps its first
    /// position, and cells past the end of a short row are absent.
    pub fn from_cells(headers: &[String], cells: &[String]) -> Self {
        let mut row = Self::new();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            if header.is_empty() || row.contains(header) {
                continue;
            }
            row.entries.push((header.clone(), cell.clone()));
        }
        row
    }

    /// Set a value, replacing in place if the header already exists
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(h, _)| *h == header) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((header, value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, header: &str) -> bool {
        self.entries.iter().any(|(h, _)| h == header)
    }

    /// First non-blank value across a chain of header variants
    pub fn first_non_blank(&self, headers: &[&str]) -> Option<&str> {
        headers
            .iter()
            .filter_map(|h| self.get(h))
            .find(|v| !v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SheetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (header, value) in &self.entries {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SheetRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = SheetRow;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of header -> cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SheetRow, A::Error> {
                let mut row = SheetRow::new();
                while let Some((header, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    let text = match value {
                        serde_json::Value::Null => continue,
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    if !row.contains(&header) {
                        row.entries.push((header, text));
                    }
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}
