//! Accumulates runs of text nodes into `Text` elements.

use url::Url;

use crate::dom::{self, NodeRef};
use crate::word_counter::WordCounter;

use super::Text;

/// Buffer for the text between two flush points.
pub struct TextBuilder<'a> {
    buffer: String,
    num_words: usize,
    num_anchor_words: usize,
    tag_level: Option<i32>,
    in_anchor: bool,
    nodes: Vec<NodeRef<'a>>,
    first_word_node: Option<usize>,
    last_word_node: usize,
    counter: Box<dyn WordCounter>,
}

impl<'a> TextBuilder<'a> {
    #[must_use]
    pub fn new(counter: Box<dyn WordCounter>) -> Self {
        Self {
            buffer: String::new(),
            num_words: 0,
            num_anchor_words: 0,
            tag_level: None,
            in_anchor: false,
            nodes: Vec::new(),
            first_word_node: None,
            last_word_node: 0,
            counter,
        }
    }

    /// Appends a text node. Whitespace-only nodes are kept for output but carry no words.
    pub fn add_text_node(&mut self, node: NodeRef<'a>, tag_level: i32) {
        if !node.is_text() {
            return;
        }
        let text = dom::text_content(&node);
        if text.is_empty() {
            return;
        }

        self.buffer.push_str(&text);
        self.nodes.push(node);
        if text.chars().all(char::is_whitespace) {
            return;
        }

        let words = self.counter.count(&text);
        self.num_words += words;
        if self.in_anchor {
            self.num_anchor_words += words;
        }

        self.last_word_node = self.nodes.len() - 1;
        if self.first_word_node.is_none() {
            self.first_word_node = Some(self.last_word_node);
        }
        if self.tag_level.is_none() {
            self.tag_level = Some(tag_level);
        }
    }

    pub fn add_line_break(&mut self, node: NodeRef<'a>) {
        self.buffer.push('\n');
        self.nodes.push(node);
    }

    pub fn enter_anchor(&mut self) {
        self.in_anchor = true;
        self.buffer.push(' ');
    }

    pub fn exit_anchor(&mut self) {
        self.in_anchor = false;
        self.buffer.push(' ');
    }

    /// Builds a `Text` from everything added since the last build.
    ///
    /// Returns `None` when nothing was added, or when only whitespace was
    /// added (the run is then discarded).
    pub fn build(&mut self, offset_block: usize, page_url: Option<&Url>) -> Option<Text<'a>> {
        if self.nodes.is_empty() {
            return None;
        }
        let Some(first_word_node) = self.first_word_node else {
            self.reset();
            return None;
        };

        let text = Text::new(
            std::mem::take(&mut self.buffer),
            std::mem::take(&mut self.nodes),
            first_word_node,
            self.last_word_node,
            self.num_words,
            self.num_anchor_words,
            self.tag_level.unwrap_or(-1),
            offset_block,
            page_url.cloned(),
        );
        self.reset();
        Some(text)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.nodes.clear();
        self.num_words = 0;
        self.num_anchor_words = 0;
        self.first_word_node = None;
        self.last_word_node = 0;
        self.tag_level = None;
    }
}
