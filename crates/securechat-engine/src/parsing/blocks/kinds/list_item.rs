use std::sync::OnceLock;

use regex::Regex;

/// Leading whitespace, a marker, exactly one whitespace delimiter, then the
/// rest of the line up to (not including) any line terminator.
fn list_item_regex() -> &'static Regex {
    static LIST_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
    LIST_ITEM_REGEX.get_or_init(|| {
        Regex::new(r"^(\s*)(-|\*|[0-9]+\.)\s([^\r\n\u{2028}\u{2029}]*)")
            .expect("Invalid list item regex")
    })
}

/// The marker that opened a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    Dash,
    Star,
    /// `N.`; the digits are kept as written.
    Ordered(String),
}

impl ListMarker {
    fn parse(marker: &str) -> Self {
        match marker {
            "-" => Self::Dash,
            "*" => Self::Star,
            ordered => Self::Ordered(ordered.trim_end_matches('.').to_string()),
        }
    }
}

/// One line of a list run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Count of leading whitespace characters before the marker.
    pub indent: usize,
    pub marker: ListMarker,
    /// Text after the marker and its single delimiting whitespace.
    pub content: String,
}

impl ListItem {
    pub fn new(indent: usize, content: impl Into<String>) -> Self {
        Self {
            indent,
            marker: ListMarker::Dash,
            content: content.into(),
        }
    }

    /// Parses `line` as a list item, or `None` when it does not match.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = list_item_regex().captures(line)?;
        Some(Self {
            indent: caps[1].chars().count(),
            marker: ListMarker::parse(&caps[2]),
            content: caps[3].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- a", 0, ListMarker::Dash, "a")]
    #[case("* a", 0, ListMarker::Star, "a")]
    #[case("1. first", 0, ListMarker::Ordered("1".into()), "first")]
    #[case("42. answer", 0, ListMarker::Ordered("42".into()), "answer")]
    #[case("    - nested", 4, ListMarker::Dash, "nested")]
    #[case("\t- tabbed", 1, ListMarker::Dash, "tabbed")]
    #[case("-  two spaces", 0, ListMarker::Dash, " two spaces")]
    #[case("- ", 0, ListMarker::Dash, "")]
    #[case("- windows\r", 0, ListMarker::Dash, "windows")]
    fn parses_list_items(
        #[case] line: &str,
        #[case] indent: usize,
        #[case] marker: ListMarker,
        #[case] content: &str,
    ) {
        let item = ListItem::parse(line).unwrap();
        assert_eq!(item.indent, indent);
        assert_eq!(item.marker, marker);
        assert_eq!(item.content, content);
    }

    #[rstest]
    #[case("-a")]
    #[case("**bold**")]
    #[case("1.no space")]
    #[case("a. letter")]
    #[case("text - not a list")]
    #[case("-")]
    #[case("")]
    fn rejects_non_list_lines(#[case] line: &str) {
        assert!(ListItem::parse(line).is_none());
    }

    #[test]
    fn indent_counts_characters_not_bytes() {
        // U+3000 is a single whitespace character encoded in three bytes
        let item = ListItem::parse("\u{3000}- wide").unwrap();
        assert_eq!(item.indent, 1);
    }
}
