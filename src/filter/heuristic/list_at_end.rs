use crate::label::Label;
use crate::webdoc::TextDocument;

use crate::filter::TextBlockFilter;

/// Marks link-free list items nested below the main content as content.
///
/// The run ends at the first block that is neither very likely content
/// nor such a list item.
pub struct ListAtEnd;

impl TextBlockFilter for ListAtEnd {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changes = false;
        let mut tag_level = None;

        for block in &mut doc.text_blocks {
            if block.is_content() && block.has_label(Label::VeryLikelyContent) {
                tag_level = Some(block.tag_level);
                continue;
            }

            if tag_level.is_some_and(|level| block.tag_level > level)
                && block.has_label(Label::MightBeContent)
                && block.has_label(Label::Li)
                && block.link_density == 0.0
            {
                block.set_is_content(true);
                changes = true;
                continue;
            }

            tag_level = None;
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::filter::heuristic::KeepLargestBlock;
    use crate::filter::test_support::{content_flags, mark_content, text_document};

    const BODY: &str = "A large block of article text with plenty of words in it";

    #[test]
    fn test_list_after_main_content() {
        let html = format!(
            r#"<div><p>{BODY}</p><ol><li>short</li><li>item</li></ol></div><ul><li>x</li></ul>"#
        );
        let dom = dom::parse(&html);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0]);
        KeepLargestBlock::new(false).process(&mut doc);

        assert!(ListAtEnd.process(&mut doc));
        assert_eq!(content_flags(&doc), vec![true, true, true, false]);
    }

    #[test]
    fn test_linked_items_break_the_run() {
        let html = format!(
            r#"<div><p>{BODY}</p><ol><li><a href="/a">linked</a></li><li>item</li></ol></div>"#
        );
        let dom = dom::parse(&html);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0]);
        KeepLargestBlock::new(false).process(&mut doc);

        assert!(!ListAtEnd.process(&mut doc));
        assert_eq!(content_flags(&doc), vec![true, false, false]);
    }

    #[test]
    fn test_list_at_same_level_is_not_content() {
        let html = format!("<p>{BODY}</p><li>item</li>");
        let dom = dom::parse(&html);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0]);
        KeepLargestBlock::new(false).process(&mut doc);

        assert!(!ListAtEnd.process(&mut doc));
    }
}
