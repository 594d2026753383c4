//! Content cleaning ahead of pattern matching

use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip HTML tags, turn `&nbsp;` into spaces, collapse whitespace and trim
pub fn clean_content(content: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(content, " ");
    let spaced = without_tags.replace("&nbsp;", " ");
    WHITESPACE_REGEX.replace_all(&spaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_entities() {
        let html = "<table><tr><td>Vehicle&nbsp;Make</td>\r\n<td>Chevrolet</td></tr></table>";
        assert_eq!(clean_content(html), "Vehicle Make Chevrolet");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_content("  a \t\n b  "), "a b");
    }

    #[test]
    fn test_empty() {
        assert_eq!(clean_content(""), "");
        assert_eq!(clean_content("<br/>"), "");
    }
}
