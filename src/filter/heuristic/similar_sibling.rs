//! Expanding content to blocks that sit next to content in the DOM.

use crate::dom::{self, NodeRef};
use crate::label::Label;
use crate::webdoc::{TextBlock, TextDocument};

use crate::filter::TextBlockFilter;

/// Marks non-content blocks as content when their canonical node is a
/// sibling of a nearby content block's canonical node.
///
/// A block's canonical node is the highest ancestor of its first text node
/// that contains neither neighbouring block. Title and heading blocks close
/// the search window unless crossing them is allowed.
#[derive(Debug, Clone, Default)]
pub struct SimilarSiblingContent {
    pub allow_cross_titles: bool,
    pub allow_cross_headings: bool,
    /// Accept siblings with a different tag name.
    pub allow_mixed_tags: bool,
    /// Blocks denser in links than this are never expanded to.
    pub max_link_density: f64,
    pub max_block_distance: usize,
}

impl SimilarSiblingContent {
    fn allow_expand_from(block: &TextBlock) -> bool {
        block.is_content()
            && !block.has_label(Label::StrictlyNotContent)
            && !block.has_label(Label::Title)
    }

    fn allow_expand_to(&self, block: &TextBlock) -> bool {
        block.link_density <= self.max_link_density
            && !block.is_content()
            && !block.has_label(Label::StrictlyNotContent)
            && !block.has_label(Label::Title)
    }

    fn is_similar(&self, reps: &[Option<NodeRef>], i: usize, j: usize) -> bool {
        let (Some(left), Some(right)) = (reps[i], reps[j]) else {
            return false;
        };
        if !self.allow_mixed_tags && !same_tag(&left, &right) {
            return false;
        }
        match (left.parent(), right.parent()) {
            (Some(l), Some(r)) => l.id == r.id,
            _ => false,
        }
    }
}

fn same_tag(left: &NodeRef, right: &NodeRef) -> bool {
    match (left.is_element(), right.is_element()) {
        (true, true) => dom::tag_name(left) == dom::tag_name(right),
        (false, false) => left.is_text() == right.is_text(),
        _ => false,
    }
}

fn canonical_reps<'a>(blocks: &[TextBlock<'a>]) -> Vec<Option<NodeRef<'a>>> {
    (0..blocks.len())
        .map(|i| {
            let prev = i.checked_sub(1).and_then(|p| blocks[p].last_non_whitespace_text_node());
            let next = blocks.get(i + 1).and_then(TextBlock::first_non_whitespace_text_node);
            let mut current = blocks[i].first_non_whitespace_text_node()?;

            while let Some(parent) = current.parent() {
                let holds = |n: Option<NodeRef>| n.is_some_and(|n| dom::contains(&parent, &n));
                if holds(prev) || holds(next) {
                    break;
                }
                current = parent;
            }
            Some(current)
        })
        .collect()
}

impl TextBlockFilter for SimilarSiblingContent {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        if blocks.len() < 2 {
            return false;
        }

        let reps = canonical_reps(blocks);

        // Windows over block indexes: content sources and non-content targets.
        let mut good = Vec::with_capacity(blocks.len());
        let mut bad = Vec::with_capacity(blocks.len());
        let mut good_begin = 0;
        let mut bad_begin = 0;

        let mut changes = false;
        for i in 0..blocks.len() {
            let block = &blocks[i];
            if (!self.allow_cross_titles && block.has_label(Label::Title))
                || (!self.allow_cross_headings && block.has_label(Label::Heading))
            {
                good_begin = good.len();
                bad_begin = bad.len();
                continue;
            }

            if Self::allow_expand_from(block) {
                good.push(i);

                let mut j = bad_begin;
                while j < bad.len() {
                    let b = bad[j];
                    if i - b > self.max_block_distance {
                        if j == bad_begin {
                            bad_begin += 1;
                        }
                    } else if self.is_similar(&reps, i, b) {
                        changes = true;
                        blocks[b].set_is_content(true);
                        bad[j] = bad[bad_begin];
                        bad_begin += 1;
                    }
                    j += 1;
                }
            } else if self.allow_expand_to(block) {
                let mut expanded = false;

                let mut j = good_begin;
                while j < good.len() {
                    let g = good[j];
                    if i - g > self.max_block_distance {
                        if j == good_begin {
                            good_begin += 1;
                        }
                    } else if self.is_similar(&reps, i, g) {
                        changes = true;
                        blocks[i].set_is_content(true);
                        good[j] = good[good_begin];
                        good_begin += 1;
                        expanded = true;
                        break;
                    }
                    j += 1;
                }

                if expanded {
                    good.push(i);
                } else {
                    bad.push(i);
                }
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::filter::test_support::{content_flags, mark_content, text_document};

    fn expansion(max_block_distance: usize) -> SimilarSiblingContent {
        SimilarSiblingContent {
            max_block_distance,
            ..SimilarSiblingContent::default()
        }
    }

    #[test]
    fn test_simple_expansion() {
        let dom = dom::parse("<div><div>text</div><div>text</div></div>");
        let mut doc = text_document(&dom);
        assert_eq!(doc.text_blocks.len(), 2);
        mark_content(&mut doc, &[0]);

        assert!(expansion(3).process(&mut doc));
        assert_eq!(content_flags(&doc), vec![true, true]);
    }

    #[test]
    fn test_requires_same_tag() {
        let dom = dom::parse("<div><div>text</div><p>text</p></div>");
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0]);

        assert!(!expansion(3).process(&mut doc));
        assert_eq!(content_flags(&doc), vec![true, false]);

        let mixed = SimilarSiblingContent {
            allow_mixed_tags: true,
            ..expansion(3)
        };
        assert!(mixed.process(&mut doc));
        assert_eq!(content_flags(&doc), vec![true, true]);
    }

    #[test]
    fn test_does_not_cross_titles() {
        let dom = dom::parse("<div><div>text</div><p>title</p><div>text</div></div>");
        let mut doc = text_document(&dom);
        doc.text_blocks[1].add_label(Label::Title);
        mark_content(&mut doc, &[2]);

        expansion(3).process(&mut doc);
        assert!(!doc.text_blocks[0].is_content());

        let crossing = SimilarSiblingContent {
            allow_cross_titles: true,
            ..expansion(3)
        };
        crossing.process(&mut doc);
        assert!(doc.text_blocks[0].is_content());
    }

    #[test]
    fn test_does_not_cross_headings() {
        let dom = dom::parse("<div><div>text</div><p>heading</p><div>text</div></div>");
        let mut doc = text_document(&dom);
        doc.text_blocks[1].add_label(Label::Heading);
        mark_content(&mut doc, &[2]);

        expansion(3).process(&mut doc);
        assert!(!doc.text_blocks[0].is_content());

        let crossing = SimilarSiblingContent {
            allow_cross_headings: true,
            ..expansion(3)
        };
        crossing.process(&mut doc);
        assert!(doc.text_blocks[0].is_content());
    }

    #[test]
    fn test_max_distance() {
        let dom = dom::parse("<div><div>text</div><p>text</p><div>text</div></div>");
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0]);

        expansion(1).process(&mut doc);
        assert_eq!(content_flags(&doc), vec![true, false, false]);

        expansion(2).process(&mut doc);
        assert_eq!(content_flags(&doc), vec![true, false, true]);
    }

    #[test]
    fn test_link_density_limit() {
        let dom = dom::parse(r#"<div><div>text</div><div><a href="/x">text</a></div></div>"#);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0]);

        assert!(!expansion(3).process(&mut doc));
        let dense = SimilarSiblingContent {
            max_link_density: 1.0,
            ..expansion(3)
        };
        assert!(dense.process(&mut doc));
    }

    #[test]
    fn test_canonical_reps_stop_below_shared_parent() {
        let dom = dom::parse("<div id=outer><div id=a><span>one</span></div><div id=b>two</div></div>");
        let doc = text_document(&dom);
        let reps = canonical_reps(&doc.text_blocks);
        let ids: Vec<String> = reps.iter().flatten().map(dom::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
