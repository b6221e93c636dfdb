//! Content classification filters.
//!
//! Block filters inspect and rewrite the block list of a [`TextDocument`] in
//! place; document filters then adjust the flat element list. Both run as a
//! fixed sequence and the returned flag only reports whether anything changed.

pub mod document;
pub mod english;
pub mod heuristic;
pub mod simple;

use crate::webdoc::{Document, TextDocument};

/// A single pass over the text blocks of a page.
pub trait TextBlockFilter {
    /// Processes `doc`, returning whether any block changed.
    fn process(&self, doc: &mut TextDocument) -> bool;
}

/// A pass over the element list, run once block decisions are applied.
pub trait DocumentFilter {
    /// Processes `doc`, returning whether any element changed.
    fn process(&self, doc: &mut Document) -> bool;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::converter::DomConverter;
    use crate::dom;
    use crate::webdoc::{Document, TextDocument};
    use crate::word_counter::WordCounterKind;

    /// Element list of a parsed page.
    pub fn web_document(dom: &dom::Document) -> Document<'_> {
        let Some(root) = dom.select("html").nodes().first().copied() else {
            panic!("no root element");
        };
        DomConverter::new(None).convert(root, Box::new(WordCounterKind::Fast))
    }

    /// Blocks of a parsed page, none of them content yet.
    pub fn text_document(dom: &dom::Document) -> TextDocument<'_> {
        web_document(dom).create_text_document()
    }

    /// Content flags of every block, in order.
    pub fn content_flags(doc: &TextDocument) -> Vec<bool> {
        doc.text_blocks.iter().map(|b| b.is_content()).collect()
    }

    /// Marks the blocks at `indexes` as content.
    pub fn mark_content(doc: &mut TextDocument, indexes: &[usize]) {
        for &i in indexes {
            doc.text_blocks[i].set_is_content(true);
        }
    }
}
