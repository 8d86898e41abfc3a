//! Shared ISBN detection and query rewriting.
//!
//! Two catalogs (Google Books, Open Library) understand an `isbn:` scoped
//! query. Both must recognize ISBN-shaped input identically, so the
//! predicate lives here once instead of being copied into each adapter.
//!
//! Accepted shapes: an optional `ISBN:` / `ISBN-10:` / `ISBN-13:` prefix,
//! then either 10 characters (digits, `X` check digit allowed last) or 13
//! digits starting with 978/979, with optional hyphen or space separators.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static RE_ISBN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ISBN(?:-1[03])?:?\s*").unwrap());

/// Whether `query` looks like a bare ISBN (10 or 13 digits, optional
/// separators, optional `ISBN:` prefix).
pub fn is_isbn_like(query: &str) -> bool {
    let rest = RE_ISBN_PREFIX.replace(query.trim(), "");

    let mut digits = String::with_capacity(13);
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'x' | 'X' => digits.push('X'),
            '-' | ' ' => continue,
            _ => return false,
        }
    }

    match digits.len() {
        10 => {
            // Check digit may be X; the first nine must be digits.
            digits[..9].chars().all(|c| c.is_ascii_digit())
        }
        13 => {
            digits.chars().all(|c| c.is_ascii_digit())
                && (digits.starts_with("978") || digits.starts_with("979"))
        }
        _ => false,
    }
}

/// Rewrite an ISBN-shaped query into the `isbn:` scoped form the catalogs
/// expect. Non-ISBN queries pass through unchanged.
pub fn rewrite_isbn_query(query: &str) -> Cow<'_, str> {
    if is_isbn_like(query) {
        Cow::Owned(format!("isbn:{query}"))
    } else {
        Cow::Borrowed(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_isbn13_with_hyphens() {
        assert!(is_isbn_like("978-85-359-0277-5"));
        assert!(is_isbn_like("9788535902775"));
    }

    #[test]
    fn detects_isbn10_with_check_digit() {
        assert!(is_isbn_like("8535902775"));
        assert!(is_isbn_like("043942089X"));
        assert!(is_isbn_like("0-439-42089-X"));
    }

    #[test]
    fn accepts_prefixed_forms() {
        assert!(is_isbn_like("ISBN: 978-85-359-0277-5"));
        assert!(is_isbn_like("ISBN-13: 9788535902775"));
        assert!(is_isbn_like("ISBN-10:8535902775"));
    }

    #[test]
    fn rejects_titles_and_partial_numbers() {
        assert!(!is_isbn_like("Dom Casmurro"));
        assert!(!is_isbn_like("1984"));
        assert!(!is_isbn_like("12345"));
        // 13 digits but not a Bookland prefix.
        assert!(!is_isbn_like("1234567890123"));
        // X anywhere but the ISBN-10 check position.
        assert!(!is_isbn_like("84X5902775"));
    }

    #[test]
    fn rewrite_scopes_isbn_queries_only() {
        assert_eq!(
            rewrite_isbn_query("978-85-359-0277-5"),
            "isbn:978-85-359-0277-5"
        );
        assert_eq!(rewrite_isbn_query("Dom Casmurro"), "Dom Casmurro");
    }
}
