use crate::webdoc::{Document, Element};

use crate::filter::DocumentFilter;

/// Promotes non-text elements that follow content text to content, up to
/// the next text element.
pub struct RelevantElements;

impl DocumentFilter for RelevantElements {
    fn process(&self, doc: &mut Document) -> bool {
        let mut changes = false;
        let mut in_content = false;

        for element in &mut doc.elements {
            if element.is_content() {
                in_content = true;
            } else if matches!(element, Element::Text(_)) {
                in_content = false;
            } else if in_content {
                element.set_is_content(true);
                changes = true;
            }
        }
        changes
    }
}
