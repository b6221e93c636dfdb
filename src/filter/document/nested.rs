use crate::webdoc::{Document, Element, TagType};

use crate::filter::DocumentFilter;

/// Keeps the markup of nested structures (lists, quotes, preformatted
/// blocks) around content.
///
/// A start/end tag pair is content when anything inside it is content, or
/// when it encloses the innermost pair already retained this way. That keeps
/// every list level leading down to a content item without retaining
/// unrelated sibling lists.
pub struct NestedElementRetainer;

impl DocumentFilter for NestedElementRetainer {
    fn process(&self, doc: &mut Document) -> bool {
        let elements = &mut doc.elements;
        let mut changes = false;
        let mut is_content = false;
        // Depth below which every enclosing pair is retained.
        let mut stack_mark: Option<usize> = None;
        let mut stack: Vec<usize> = Vec::new();

        for i in 0..elements.len() {
            let tag_type = match &elements[i] {
                Element::Tag(tag) => tag.tag_type,
                other => {
                    is_content = is_content || other.is_content();
                    continue;
                }
            };

            match tag_type {
                TagType::Start => {
                    changes |= elements[i].is_content() != is_content;
                    elements[i].set_is_content(is_content);
                    stack.push(i);
                    is_content = false;
                }
                TagType::End => {
                    let Some(start) = stack.pop() else {
                        continue;
                    };

                    is_content = is_content || stack_mark.is_some_and(|mark| mark >= stack.len());
                    if is_content {
                        stack_mark = stack.len().checked_sub(1);
                    }

                    let was_content = elements[start].is_content();
                    for index in [start, i] {
                        changes |= elements[index].is_content() != is_content;
                        elements[index].set_is_content(is_content);
                    }
                    is_content = was_content;
                }
            }
        }

        debug_assert!(stack.is_empty(), "unbalanced tag markers");
        changes
    }
}
