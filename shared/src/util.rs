/// Canonical phone form used for duplicate detection.
///
/// Strips `-`, whitespace, `(` and `)`, then rewrites a leading `0` to the
/// Thai country code `66`, so `"081-234-5678"` and `"66812345678"` compare equal.
pub fn normalize_phone(phone: &str) -> String {
    let stripped: String = phone
        .chars()
        .filter(|c| !(*c == '-' || *c == '(' || *c == ')' || c.is_whitespace()))
        .collect();
    match stripped.strip_prefix('0') {
        Some(rest) => format!("66{}", rest),
        None => stripped,
    }
}

/// Remove `-` and whitespace (the separators accepted by phone validation)
pub fn strip_phone_separators(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// Keep ASCII digits only
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Leading-integer parse of a cell value.
///
/// Leading whitespace and an optional sign are accepted, then digits are read
/// until the first non-digit: `"12abc"` is 12, `"abc"` and `""` are `None`.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Join list values the way they are stored in a single cell
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Split a stored cell back into trimmed, non-empty items
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_matches_local_and_international() {
        assert_eq!(normalize_phone("081-234-5678"), "66812345678");
        assert_eq!(normalize_phone("66812345678"), "66812345678");
        assert_eq!(normalize_phone("(081) 234 5678"), "66812345678");
    }

    #[test]
    fn test_normalize_phone_only_rewrites_first_zero() {
        assert_eq!(normalize_phone("0012"), "66012");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_strip_phone_separators() {
        assert_eq!(strip_phone_separators("081-234 5678"), "0812345678");
        assert_eq!(strip_phone_separators("(081)"), "(081)");
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("42"), Some(42));
        assert_eq!(leading_int("  7 "), Some(7));
        assert_eq!(leading_int("12abc"), Some(12));
        assert_eq!(leading_int("-3"), Some(-3));
        assert_eq!(leading_int("No."), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn test_list_join_and_split() {
        let items = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let cell = join_list(&items);
        assert_eq!(cell, "A, B, C");
        assert_eq!(split_list(&cell), items);
        assert_eq!(split_list(" A ,, ,B"), vec!["A", "B"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("08-12 x"), "0812");
    }
}
