//! Document title heuristic.
//!
//! Starts from the `<title>` element and cuts off site names around the
//! separators `| - \ / > »` or a `": "`. Titles that end up too short or too
//! long are replaced by the first `<h1>`, and a cleaned title that lost too
//! much falls back to the original text.

use crate::dom::{self, NodeRef};
use crate::patterns::{
    TITLE_ANY_SEPARATOR, TITLE_HIERARCHY_SEPARATOR, TITLE_REMOVE_FINAL_PART, TITLE_REMOVE_FIRST_PART,
    TITLE_SEPARATOR,
};
use crate::word_counter::WordCounter;

/// Cleaned-up title of the page under `root`, empty when there is none.
#[must_use]
pub fn document_title(root: &NodeRef, counter: &dyn WordCounter) -> String {
    let original = if root.has_name("title") {
        Some(*root)
    } else {
        dom::first_element_by_tag_name(root, "title")
    }
    .map(|title| dom::inner_text(&title))
    .unwrap_or_default();

    let mut current = original.clone();
    let mut had_hierarchical_separators = false;

    if TITLE_SEPARATOR.is_match(&current) {
        had_hierarchical_separators = TITLE_HIERARCHY_SEPARATOR.is_match(&current);
        current = TITLE_REMOVE_FINAL_PART.replace_all(&original, "$1").into_owned();
        if counter.count(&current) < 3 {
            current = TITLE_REMOVE_FIRST_PART.replace_all(&original, "$1").into_owned();
        }
    } else if current.contains(": ") {
        // A heading repeating the whole title means the colon is part of it.
        let trimmed = current.trim();
        let is_heading = dom::elements_by_tag_name(root, "h1")
            .into_iter()
            .chain(dom::elements_by_tag_name(root, "h2"))
            .any(|heading| dom::text_content(&heading).trim() == trimmed);

        if !is_heading {
            let first_colon = original.find(':').unwrap_or_default();
            let last_colon = original.rfind(':').unwrap_or_default();
            current = original[last_colon + 1..].to_string();
            if counter.count(&current) < 3 {
                current = original[first_colon + 1..].to_string();
            } else if counter.count(&original[..first_colon]) > 5 {
                current.clone_from(&original);
            }
        }
    } else {
        let chars = current.chars().count();
        if !(15..=150).contains(&chars) {
            if let Some(h1) = dom::first_element_by_tag_name(root, "h1") {
                current = dom::inner_text(&h1);
            }
        }
    }

    let current = current.split_whitespace().collect::<Vec<_>>().join(" ");

    // Four words or fewer: keep the cut only when it dropped exactly one
    // hierarchical part.
    let words = counter.count(&current);
    let original_words = counter.count(&TITLE_ANY_SEPARATOR.replace_all(&original, ""));
    if words <= 4
        && !original.is_empty()
        && (!had_hierarchical_separators || words + 1 != original_words)
    {
        return original;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_counter::WordCounterKind;

    fn title_of(html: &str) -> String {
        let doc = dom::parse(html);
        let root = doc.select("html").nodes()[0];
        document_title(&root, &WordCounterKind::Fast)
    }

    #[test]
    fn test_no_title() {
        assert_eq!(title_of("<html><body><p>text</p></body></html>"), "");
    }

    #[test]
    fn test_plain_title_kept() {
        assert_eq!(
            title_of("<title>A plain title without separators</title>"),
            "A plain title without separators"
        );
    }

    #[test]
    fn test_site_name_removed_after_bar() {
        assert_eq!(
            title_of("<title>How to write a great test | Site Name</title>"),
            "How to write a great test"
        );
    }

    #[test]
    fn test_short_remainder_reverts_to_original() {
        assert_eq!(
            title_of("<title>Short title here | Site Name</title>"),
            "Short title here | Site Name"
        );
    }

    #[test]
    fn test_hierarchy_removes_first_part() {
        assert_eq!(
            title_of("<title>Site » News » Some nice long story</title>"),
            "News » Some nice long story"
        );
    }

    #[test]
    fn test_colon_title_takes_last_part() {
        assert_eq!(
            title_of("<title>Breaking: The big story of today</title>"),
            "The big story of today"
        );
    }

    #[test]
    fn test_colon_title_matching_heading_kept() {
        let html = "<title>Rust Weekly: all the news that fits</title><h1>Rust Weekly: all the news that fits</h1>";
        assert_eq!(title_of(html), "Rust Weekly: all the news that fits");
    }

    #[test]
    fn test_colon_after_many_words_keeps_original() {
        let title = "One two three four five six: seven eight nine";
        assert_eq!(title_of(&format!("<title>{title}</title>")), title);
    }

    #[test]
    fn test_short_title_replaced_by_h1() {
        let html = "<title>Hi</title><body><h1>A much longer heading for the page</h1></body>";
        assert_eq!(title_of(html), "A much longer heading for the page");
    }

    #[test]
    fn test_missing_title_uses_h1() {
        let html = "<body><h1>Heading only page</h1></body>";
        assert_eq!(title_of(html), "Heading only page");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            title_of("<title>  Spaced    out   title for the test  </title>"),
            "Spaced out title for the test"
        );
    }
}
