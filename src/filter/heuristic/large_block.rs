//! Promoting large blocks near the main content's tag level.

use crate::label::Label;
use crate::webdoc::TextDocument;

use crate::filter::TextBlockFilter;

/// Blocks with at least this many words are large.
const MIN_LARGE_BLOCK_WORDS: usize = 100;

/// Tag level of the first very-likely-content block.
fn main_tag_level(doc: &TextDocument) -> Option<i32> {
    doc.text_blocks
        .iter()
        .find(|b| b.is_content() && b.has_label(Label::VeryLikelyContent))
        .map(|b| b.tag_level)
}

/// Marks large blocks at the main content's tag level as content.
pub struct LargeBlockSameTagLevelToContent;

impl TextBlockFilter for LargeBlockSameTagLevelToContent {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let Some(tag_level) = main_tag_level(doc) else {
            return false;
        };

        let mut changes = false;
        for block in &mut doc.text_blocks {
            if !block.is_content() && block.num_words >= MIN_LARGE_BLOCK_WORDS && block.tag_level == tag_level {
                block.set_is_content(true);
                changes = true;
            }
        }
        changes
    }
}

/// Marks large blocks within one tag level of the main content as content.
pub struct LargeBlockAroundTagLevelToContent;

impl TextBlockFilter for LargeBlockAroundTagLevelToContent {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let Some(tag_level) = main_tag_level(doc) else {
            return false;
        };

        let mut changes = false;
        for block in &mut doc.text_blocks {
            if !block.is_content()
                && block.num_words >= MIN_LARGE_BLOCK_WORDS
                && (block.tag_level - tag_level).abs() <= 1
            {
                block.set_is_content(true);
                changes = true;
            }
        }
        changes
    }
}
