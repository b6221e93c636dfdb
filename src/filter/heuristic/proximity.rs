//! Fusing content blocks that are close to each other.

use crate::label::Label;
use crate::webdoc::{TextBlock, TextDocument};

use crate::filter::TextBlockFilter;

/// Merges adjacent content blocks separated by at most one removed block.
///
/// A block refused for its labels or tag level does not become the new
/// merge target; the next close enough block is tried against the same one.
///
/// Before boilerplate removal (`post_filtering == false`) blocks carrying a
/// fused boilerplate heading are left alone; afterwards only blocks at the
/// same tag level are merged. Title and strictly-not-content blocks only
/// merge with their own kind.
pub struct BlockProximityFusion {
    post_filtering: bool,
}

impl BlockProximityFusion {
    #[must_use]
    pub fn new(post_filtering: bool) -> Self {
        Self { post_filtering }
    }

    /// At most one block between the end of `prev` and the start of `block`.
    fn within_distance(prev: &TextBlock, block: &TextBlock) -> bool {
        match (prev.offset_blocks_end(), block.offset_blocks_start()) {
            (Some(end), Some(start)) => start as i64 - end as i64 - 1 <= 1,
            _ => false,
        }
    }

    fn can_fuse(&self, prev: &TextBlock, block: &TextBlock) -> bool {
        let ok = if self.post_filtering {
            prev.tag_level == block.tag_level
        } else {
            !block.has_label(Label::BoilerplateHeadingFused)
        };
        let parity = |l| prev.has_label(l) == block.has_label(l);
        let li_break =
            !prev.is_content() && prev.has_label(Label::Li) && !block.has_label(Label::Li);
        ok && parity(Label::StrictlyNotContent) && parity(Label::Title) && !li_break
    }
}

impl TextBlockFilter for BlockProximityFusion {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        if blocks.len() < 2 {
            return false;
        }

        let mut changes = false;
        let mut prev = 0;
        let mut i = 1;
        while i < blocks.len() {
            let (prev_block, block) = (&blocks[prev], &blocks[i]);
            if !prev_block.is_content()
                || !block.is_content()
                || !Self::within_distance(prev_block, block)
            {
                prev = i;
                i += 1;
                continue;
            }

            if self.can_fuse(prev_block, block) {
                let block = blocks.remove(i);
                blocks[prev].merge_next(block);
                changes = true;
            } else {
                // `prev` stays the merge target.
                i += 1;
            }
        }

        changes
    }
}
