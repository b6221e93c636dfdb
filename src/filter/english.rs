//! Rules tuned on English pages.

use crate::label::Label;
use crate::patterns::TERMINATING_BLOCK;
use crate::webdoc::{TextBlock, TextDocument};

use super::TextBlockFilter;

/// Labels blocks that usually end an article ("post a comment", "reader
/// views", ...) as strictly not content.
pub struct TerminatingBlocksFinder;

impl TerminatingBlocksFinder {
    fn is_terminating(block: &TextBlock) -> bool {
        if block.num_words > 14 {
            return false;
        }

        let text = block.text.trim();
        if text.chars().count() >= 8 {
            TERMINATING_BLOCK.is_match(text)
        } else if block.link_density == 1.0 {
            text == "Comment"
        } else {
            text == "Shares"
        }
    }
}

impl TextBlockFilter for TerminatingBlocksFinder {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changes = false;
        for block in &mut doc.text_blocks {
            if Self::is_terminating(block) {
                block.add_label(Label::StrictlyNotContent);
                changes = true;
            }
        }
        changes
    }
}

/// Classifies blocks from their word count and link density and those of
/// their neighbours.
///
/// The decision tree comes from "Boilerplate Detection using Shallow Text
/// Features" (Kohlschütter et al., WSDM 2010).
pub struct NumWordsRulesClassifier;

impl NumWordsRulesClassifier {
    fn classify(prev: Option<&TextBlock>, current: &TextBlock, next: Option<&TextBlock>) -> bool {
        if current.link_density > 0.333_333 {
            return false;
        }

        if prev.is_none_or(|p| p.link_density <= 0.555_556) {
            if current.num_words <= 16 {
                match next {
                    Some(next) if next.num_words > 15 => true,
                    _ => prev.is_some_and(|p| p.num_words > 4),
                }
            } else {
                true
            }
        } else if current.num_words <= 40 {
            next.is_some_and(|n| n.num_words > 17)
        } else {
            true
        }
    }
}

impl TextBlockFilter for NumWordsRulesClassifier {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        let mut changes = false;

        for i in 0..blocks.len() {
            let is_content = Self::classify(
                i.checked_sub(1).map(|p| &blocks[p]),
                &blocks[i],
                blocks.get(i + 1),
            );
            changes |= blocks[i].set_is_content(is_content);
        }
        changes
    }
}
