use crate::label::Label;
use crate::webdoc::TextDocument;

use crate::filter::TextBlockFilter;

/// Marks the possible-content blocks between the last title before the
/// content and the first content block as content.
pub struct ExpandTitleToContent;

impl TextBlockFilter for ExpandTitleToContent {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut title = None;
        let mut content_start = None;
        for (i, block) in doc.text_blocks.iter().enumerate() {
            if content_start.is_some() {
                break;
            }
            if block.has_label(Label::Title) {
                title = Some(i);
            }
            if block.is_content() {
                content_start = Some(i);
            }
        }

        let (Some(title), Some(content_start)) = (title, content_start) else {
            return false;
        };
        if content_start <= title {
            return false;
        }

        let mut changes = false;
        for block in &mut doc.text_blocks[title..content_start] {
            if block.has_label(Label::MightBeContent) {
                changes |= block.set_is_content(true);
            }
        }
        changes
    }
}
