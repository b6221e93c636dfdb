//! Fusing headings into the block they introduce.

use crate::label::Label;
use crate::webdoc::TextDocument;

use crate::filter::TextBlockFilter;

/// Merges a heading into the following block when that block is content,
/// and demotes a content heading followed by boilerplate.
///
/// A heading that was not content itself leaves a
/// [`Label::BoilerplateHeadingFused`] mark on the merged block. Titles and
/// strictly-not-content blocks are never fused.
pub struct HeadingFusion;

impl TextBlockFilter for HeadingFusion {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        if blocks.len() < 2 {
            return false;
        }

        let mut changes = false;
        let mut i = 1;
        while i < blocks.len() {
            let (prev, current) = (&blocks[i - 1], &blocks[i]);
            let barrier = |l| prev.has_label(l) || current.has_label(l);
            if !prev.has_label(Label::Heading)
                || barrier(Label::StrictlyNotContent)
                || barrier(Label::Title)
            {
                i += 1;
                continue;
            }

            if current.is_content() {
                let heading_was_content = prev.is_content();
                let current = blocks.remove(i);
                let merged = &mut blocks[i - 1];
                merged.merge_next(current);
                merged.remove_label(Label::Heading);
                if !heading_was_content {
                    merged.add_label(Label::BoilerplateHeadingFused);
                }
                changes = true;
                // The merged block is no longer a heading; move on.
                continue;
            }

            if prev.is_content() {
                blocks[i - 1].set_is_content(false);
                changes = true;
            }
            i += 1;
        }

        changes
    }
}
