//! Label driven filters.

use tracing::trace;

use crate::label::Label;
use crate::webdoc::TextDocument;

use super::TextBlockFilter;

/// Demotes content blocks carrying any of the given labels.
pub struct LabelToBoilerplate {
    labels: Vec<Label>,
}

impl LabelToBoilerplate {
    #[must_use]
    pub fn new(labels: &[Label]) -> Self {
        Self {
            labels: labels.to_vec(),
        }
    }
}

impl TextBlockFilter for LabelToBoilerplate {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changes = false;
        for block in &mut doc.text_blocks {
            if block.is_content() && self.labels.iter().any(|&l| block.has_label(l)) {
                block.set_is_content(false);
                changes = true;
            }
        }
        changes
    }
}

/// Removes every block that is not content.
///
/// Blocks carrying `label_to_keep` survive even when they are boilerplate.
pub struct BoilerplateBlock {
    label_to_keep: Option<Label>,
}

impl BoilerplateBlock {
    #[must_use]
    pub fn new(label_to_keep: Option<Label>) -> Self {
        Self { label_to_keep }
    }
}

impl TextBlockFilter for BoilerplateBlock {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let before = doc.text_blocks.len();
        doc.text_blocks.retain(|block| {
            block.is_content() || self.label_to_keep.is_some_and(|l| block.has_label(l))
        });

        let removed = before - doc.text_blocks.len();
        trace!(removed, "boilerplate blocks removed");
        removed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::filter::test_support::{content_flags, mark_content, text_document};

    const PAGE: &str = "<h1>The title</h1><p>First paragraph here</p><p>Second one</p><p>Third one</p>";

    #[test]
    fn test_label_to_boilerplate_only_touches_content() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[1, 2]);
        doc.text_blocks[1].add_label(Label::StrictlyNotContent);
        doc.text_blocks[3].add_label(Label::StrictlyNotContent);

        let filter = LabelToBoilerplate::new(&[Label::StrictlyNotContent]);
        assert!(filter.process(&mut doc));
        assert_eq!(content_flags(&doc), vec![false, false, true, false]);
        assert!(!filter.process(&mut doc));
    }

    #[test]
    fn test_boilerplate_block_removes_non_content() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[2]);

        assert!(BoilerplateBlock::new(None).process(&mut doc));
        assert_eq!(doc.text_blocks.len(), 1);
        assert_eq!(doc.text_blocks[0].text, "Second one");
    }

    #[test]
    fn test_boilerplate_block_keeps_label() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[1]);
        doc.text_blocks[0].add_label(Label::Title);

        assert!(BoilerplateBlock::new(Some(Label::Title)).process(&mut doc));
        let texts: Vec<&str> = doc.text_blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["The title", "First paragraph here"]);
    }

    #[test]
    fn test_boilerplate_block_keeps_only_the_given_label() {
        let labelled = |label_to_keep: Option<Label>| {
            let dom = dom::parse(PAGE);
            let mut doc = text_document(&dom);
            mark_content(&mut doc, &[3]);
            doc.text_blocks[0].add_label(Label::Title);
            doc.text_blocks[1].add_label(Label::Heading);
            BoilerplateBlock::new(label_to_keep).process(&mut doc);
            let kept: Vec<(String, bool)> = doc
                .text_blocks
                .iter()
                .map(|b| (b.text.clone(), b.is_content()))
                .collect();
            kept
        };

        assert_eq!(
            labelled(Some(Label::Title)),
            vec![("The title".to_string(), false), ("Third one".to_string(), true)]
        );
        assert_eq!(labelled(None), vec![("Third one".to_string(), true)]);
    }

    #[test]
    fn test_boilerplate_block_is_idempotent() {
        let dom = dom::parse(PAGE);
        let mut doc = text_document(&dom);
        mark_content(&mut doc, &[0, 3]);

        let filter = BoilerplateBlock::new(Some(Label::Title));
        filter.process(&mut doc);
        let once: Vec<String> = doc.text_blocks.iter().map(|b| b.text.clone()).collect();
        assert!(!filter.process(&mut doc));
        let twice: Vec<String> = doc.text_blocks.iter().map(|b| b.text.clone()).collect();
        assert_eq!(once, twice);
    }
}
