//! Record list: newest first, name/phone search and incremental paging

use shared::sheet::SheetRow;
use shared::sheet::headers::{self as h, AI_SUMMARY, RUNNING_NUMBER};
use shared::util::{digits_only, leading_int};

pub const INITIAL_VISIBLE: usize = 30;
pub const LOAD_STEP: usize = 20;

/// Running number of a listed row; 0 when no candidate column parses
pub fn running_number(row: &SheetRow) -> i64 {
    RUNNING_NUMBER
        .iter()
        .filter_map(|header| row.get(header))
        .find(|v| !v.trim().is_empty())
        .and_then(leading_int)
        .unwrap_or(0)
}

/// AI1..=AI4 values, matching headers with whitespace removed and upper-cased
pub fn ai_summary(row: &SheetRow) -> [Option<String>; 4] {
    AI_SUMMARY.map(|wanted| {
        row.iter()
            .find(|(header, _)| {
                let normalized: String = header
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_uppercase();
                normalized == wanted
            })
            .map(|(_, value)| value.to_string())
    })
}

/// Name substring (case-insensitive) or, when the query has digits, phone
/// digit substring
pub fn matches_query(row: &SheetRow, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    let name = row
        .first_non_blank(h::FULL_NAME)
        .unwrap_or_default()
        .to_lowercase();
    if name.contains(&q) {
        return true;
    }
    let q_digits = digits_only(&q);
    if q_digits.is_empty() {
        return false;
    }
    let phone = digits_only(row.first_non_blank(h::PHONE_NUMBER).unwrap_or_default());
    phone.contains(&q_digits)
}

/// Rows sorted by running number, searched and paged
#[derive(Debug, Clone, Default)]
pub struct RecordList {
    rows: Vec<SheetRow>,
    query: String,
    visible: usize,
}

impl RecordList {
    pub fn new(mut rows: Vec<SheetRow>) -> Self {
        // stable: equal numbers keep sheet order
        rows.sort_by_key(|row| std::cmp::Reverse(running_number(row)));
        Self {
            rows,
            query: String::new(),
            visible: INITIAL_VISIBLE,
        }
    }

    /// Change the search query; paging restarts
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.visible = INITIAL_VISIBLE;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn load_more(&mut self) {
        self.visible += LOAD_STEP;
    }

    pub fn filtered(&self) -> Vec<&SheetRow> {
        self.rows
            .iter()
            .filter(|row| matches_query(row, &self.query))
            .collect()
    }

    /// The page currently shown
    pub fn visible(&self) -> Vec<&SheetRow> {
        let mut rows = self.filtered();
        rows.truncate(self.visible);
        rows
    }

    /// Whether `load_more` would show more rows
    pub fn has_more(&self) -> bool {
        self.filtered().len() > self.visible
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> SheetRow {
        let mut row = SheetRow::new();
        for (k, v) in pairs {
            row.insert(*k, *v);
        }
        row
    }

    fn numbered(n: usize) -> SheetRow {
        row(&[
            ("No.", n.to_string().as_str()),
            ("ชื่อ นามสกุล", format!("Customer {n}").as_str()),
            ("หมายเลขโทรศัพท์", format!("081-000-{n:04}").as_str()),
        ])
    }

    #[test]
    fn test_running_number_fallbacks() {
        assert_eq!(running_number(&row(&[("No.", "12")])), 12);
        assert_eq!(running_number(&row(&[("No.", ""), ("RowId", "7")])), 7);
        assert_eq!(running_number(&row(&[("No", "x")])), 0);
        assert_eq!(running_number(&SheetRow::new()), 0);
    }

    #[test]
    fn test_sorted_newest_first() {
        let list = RecordList::new(vec![numbered(2), numbered(10), numbered(5)]);
        let order: Vec<i64> = list.visible().into_iter().map(running_number).collect();
        assert_eq!(order, vec![10, 5, 2]);
    }

    #[test]
    fn test_search_by_name_or_phone_digits() {
        let list_rows = vec![numbered(1), numbered(2), numbered(31)];
        let mut list = RecordList::new(list_rows);

        list.set_query("customer 3");
        assert_eq!(list.filtered().len(), 1);

        list.set_query("0031");
        assert_eq!(list.filtered().len(), 1);

        list.set_query("081 000");
        assert_eq!(list.filtered().len(), 3);

        list.set_query("nobody");
        assert!(list.filtered().is_empty());
    }

    #[test]
    fn test_paging_resets_on_query() {
        let mut list = RecordList::new((1..=75).map(numbered).collect());
        assert_eq!(list.visible().len(), 30);
        assert!(list.has_more());
        list.load_more();
        assert_eq!(list.visible().len(), 50);
        list.load_more();
        list.load_more();
        assert_eq!(list.visible().len(), 75);
        assert!(!list.has_more());

        list.set_query("Customer");
        assert_eq!(list.visible().len(), 30);
        assert_eq!(list.total(), 75);
    }

    #[test]
    fn test_ai_summary_normalizes_headers() {
        let r = row(&[("ai 1", "first"), ("AI2", "second"), (" Ai4 ", "fourth")]);
        assert_eq!(
            ai_summary(&r),
            [
                Some("first".to_string()),
                Some("second".to_string()),
                None,
                Some("fourth".to_string())
            ]
        );
    }
}
