//! Builds a [`Document`] from converter callbacks.

use url::Url;

use crate::dom::NodeRef;
use crate::word_counter::WordCounter;

use super::{Document, Element, ElementAction, Table, Tag, TextBuilder};

/// Receiver of the converter's walk over the page.
pub trait DocumentBuilder<'a> {
    /// An element was skipped; whatever follows starts a new block.
    fn skip_node(&mut self, element: NodeRef<'a>);
    fn start_node(&mut self, element: NodeRef<'a>);
    fn end_node(&mut self);
    fn add_text_node(&mut self, text_node: NodeRef<'a>);
    fn add_line_break(&mut self, br: NodeRef<'a>);
    fn add_data_table(&mut self, table: NodeRef<'a>);
    fn add_tag(&mut self, tag: Tag);
    fn add_embed(&mut self, embed: Element<'a>);
}

/// The standard [`DocumentBuilder`].
pub struct WebDocumentBuilder<'a> {
    tag_level: i32,
    next_text_index: usize,
    group_number: usize,
    flush: bool,
    document: Document<'a>,
    text_builder: TextBuilder<'a>,
    action_stack: Vec<ElementAction>,
    page_url: Option<Url>,
}

impl<'a> WebDocumentBuilder<'a> {
    #[must_use]
    pub fn new(counter: Box<dyn WordCounter>, page_url: Option<Url>) -> Self {
        Self {
            tag_level: 0,
            next_text_index: 0,
            group_number: 0,
            flush: false,
            document: Document::default(),
            text_builder: TextBuilder::new(counter),
            action_stack: Vec::new(),
            page_url,
        }
    }

    /// Flushes pending text and returns the document.
    #[must_use]
    pub fn build(mut self) -> Document<'a> {
        self.flush_block(self.group_number);
        self.document
    }

    fn flush_block(&mut self, group: usize) {
        let Some(mut text) = self
            .text_builder
            .build(self.next_text_index, self.page_url.as_ref())
        else {
            return;
        };
        text.group_number = group;
        self.next_text_index += 1;
        for action in &self.action_stack {
            text.labels.extend(action.labels);
        }
        self.document.elements.push(Element::Text(text));
    }

    fn flush_if_pending(&mut self) {
        if self.flush {
            self.flush_block(self.group_number);
            self.group_number += 1;
            self.flush = false;
        }
    }
}

impl<'a> DocumentBuilder<'a> for WebDocumentBuilder<'a> {
    fn skip_node(&mut self, _element: NodeRef<'a>) {
        self.flush = true;
    }

    fn start_node(&mut self, element: NodeRef<'a>) {
        let action = ElementAction::for_element(&element);
        if action.changes_tag_level {
            self.tag_level += 1;
        }
        if action.is_anchor {
            self.text_builder.enter_anchor();
        }
        self.flush |= action.flush;
        self.action_stack.push(action);
    }

    fn end_node(&mut self) {
        let Some(action) = self.action_stack.last().copied() else {
            return;
        };

        if action.changes_tag_level {
            self.tag_level -= 1;
        }
        if self.flush || action.flush {
            self.flush_block(self.group_number);
            self.group_number += 1;
        }
        if action.is_anchor {
            self.text_builder.exit_anchor();
        }
        self.action_stack.pop();
    }

    fn add_text_node(&mut self, text_node: NodeRef<'a>) {
        self.flush_if_pending();
        self.text_builder.add_text_node(text_node, self.tag_level);
    }

    fn add_line_break(&mut self, br: NodeRef<'a>) {
        self.flush_if_pending();
        self.text_builder.add_line_break(br);
    }

    fn add_data_table(&mut self, table: NodeRef<'a>) {
        self.flush_block(self.group_number);
        self.document
            .elements
            .push(Element::Table(Table::new(table, self.page_url.clone())));
    }

    fn add_tag(&mut self, tag: Tag) {
        self.flush_block(self.group_number);
        self.document.elements.push(Element::Tag(tag));
    }

    fn add_embed(&mut self, embed: Element<'a>) {
        self.flush_block(self.group_number);
        self.document.elements.push(embed);
    }
}
