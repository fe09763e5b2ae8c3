//! Input validation helpers shared by the API and the form wizard

use crate::util::strip_phone_separators;

/// Full name length bounds (characters)
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;

/// Accepted age range when the age is numeric
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 80;

/// Value is absent or whitespace only
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// 9 or 10 ASCII digits once `-` and whitespace are removed
pub fn is_valid_phone(phone: &str) -> bool {
    let stripped = strip_phone_separators(phone);
    (9..=10).contains(&stripped.len()) && stripped.chars().all(|c| c.is_ascii_digit())
}

/// 9 or 10 ASCII digits exactly, no separators
pub fn is_plain_phone(phone: &str) -> bool {
    (9..=10).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a `.` with
/// something on both sides somewhere in the domain
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("081-234-5678"));
        assert!(is_valid_phone("02 123 4567"));
        assert!(!is_valid_phone("12345678"));
        assert!(!is_valid_phone("081234567890"));
        assert!(!is_valid_phone("(081)2345678"));
    }

    #[test]
    fn test_is_plain_phone() {
        assert!(is_plain_phone("0812345678"));
        assert!(!is_plain_phone("081-234-5678"));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("somchai@example.co.th"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("somchai@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@@example.com"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("  ".into())));
        assert!(!is_blank(&Some("x".into())));
    }
}
