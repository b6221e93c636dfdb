//! Keeping the largest block and the blocks around it.

use tracing::trace;

use crate::dom::{self, NodeRef};
use crate::label::Label;
use crate::webdoc::{TextBlock, TextDocument};

use crate::filter::TextBlockFilter;

/// Keeps only the content block with the most words as content.
///
/// The winner is labelled [`Label::VeryLikelyContent`], every other block
/// [`Label::MightBeContent`]. With `expand_to_siblings`, blocks whose text
/// elements are DOM siblings of the winner's (transitively) become content
/// again.
pub struct KeepLargestBlock {
    expand_to_siblings: bool,
}

/// Parent element of an optional node.
fn parent_of<'a>(node: Option<NodeRef<'a>>) -> Option<NodeRef<'a>> {
    node.and_then(|n| dom::parent_element(&n))
}

/// Whether two elements share their parent element.
fn is_sibling(a: Option<NodeRef>, b: Option<NodeRef>) -> bool {
    let parent = |n: Option<NodeRef>| parent_of(n).map(|p| p.id);
    let (a, b) = (parent(a), parent(b));
    a.is_some() && a == b
}

impl KeepLargestBlock {
    #[must_use]
    pub fn new(expand_to_siblings: bool) -> Self {
        Self { expand_to_siblings }
    }

    fn expand_to_earlier_blocks(blocks: &mut [TextBlock], largest: usize) {
        let mut first = parent_of(blocks[largest].first_non_whitespace_text_node());
        for candidate in blocks[..largest].iter_mut().rev() {
            let last = parent_of(candidate.last_non_whitespace_text_node());
            if is_sibling(first, last) {
                candidate.set_is_content(true);
                candidate.add_label(Label::SiblingOfMainContent);
                first = parent_of(candidate.first_non_whitespace_text_node());
            }
        }
    }

    fn expand_to_later_blocks(blocks: &mut [TextBlock], largest: usize) {
        let mut last = parent_of(blocks[largest].last_non_whitespace_text_node());
        for candidate in &mut blocks[largest + 1..] {
            let first = parent_of(candidate.first_non_whitespace_text_node());
            if is_sibling(last, first) {
                candidate.set_is_content(true);
                candidate.add_label(Label::SiblingOfMainContent);
                last = parent_of(candidate.last_non_whitespace_text_node());
            }
        }
    }
}

impl TextBlockFilter for KeepLargestBlock {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        if blocks.len() < 2 {
            return false;
        }

        let mut largest: Option<(usize, usize)> = None;
        for (i, block) in blocks.iter().enumerate() {
            if block.is_content() && largest.is_none_or(|(_, words)| block.num_words > words) {
                largest = Some((i, block.num_words));
            }
        }

        for (i, block) in blocks.iter_mut().enumerate() {
            if largest.is_some_and(|(index, _)| index == i) {
                block.set_is_content(true);
                block.add_label(Label::VeryLikelyContent);
            } else {
                block.set_is_content(false);
                block.add_label(Label::MightBeContent);
            }
        }

        if let Some((index, num_words)) = largest {
            trace!(index, num_words, "largest block");
            if self.expand_to_siblings {
                Self::expand_to_earlier_blocks(blocks, index);
                Self::expand_to_later_blocks(blocks, index);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::filter::test_support::{content_flags, mark_content, text_document};

    const PAGE: &str = "<div><p>one two</p><p>one two three four</p><p>one two three</p></div>\
                        <div><p>far away words here and more</p></div>";

    #[test]
    fn test_keeps_largest_content_block() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0, 1, 2]);

        assert!(KeepLargestBlock::new(false).process(&mut doc));
        assert_eq!(content_flags(&doc), vec![false, true, false, false]);
        assert!(doc.text_blocks[1].has_label(Label::VeryLikelyContent));
        assert!(doc.text_blocks[0].has_label(Label::MightBeContent));
        assert!(doc.text_blocks[3].has_label(Label::MightBeContent));
    }

    #[test]
    fn test_ties_go_to_first_block() {
        let dom = dom::parse("<p>a b c</p><p>d e f</p>");
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0, 1]);

        KeepLargestBlock::new(false).process(&mut doc);
        assert_eq!(content_flags(&doc), vec![true, false]);
    }

    #[test]
    fn test_expands_to_siblings() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[1]);

        KeepLargestBlock::new(true).process(&mut doc);
        assert_eq!(content_flags(&doc), vec![true, true, true, false]);
        assert!(doc.text_blocks[0].has_label(Label::SiblingOfMainContent));
        assert!(doc.text_blocks[2].has_label(Label::SiblingOfMainContent));
        assert!(!doc.text_blocks[3].has_label(Label::SiblingOfMainContent));
    }

    #[test]
    fn test_without_content_everything_might_be_content() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);

        assert!(KeepLargestBlock::new(true).process(&mut doc));
        assert!(content_flags(&doc).iter().all(|c| !c));
        assert!(doc.text_blocks.iter().all(|b| b.has_label(Label::MightBeContent)));
    }
}
