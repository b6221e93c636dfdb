//! Text blocks: the unit of content classification.

use crate::dom::NodeRef;
use crate::label::{Label, LabelSet};

use super::{Document, Element, Text};

/// Where a block's text lives in the [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct TextRef<'a> {
    pub element_index: usize,
    pub offset_block: usize,
    pub first_word_node: NodeRef<'a>,
    pub last_word_node: NodeRef<'a>,
}

impl<'a> TextRef<'a> {
    fn new(element_index: usize, text: &Text<'a>) -> Self {
        Self {
            element_index,
            offset_block: text.offset_block,
            first_word_node: text.first_non_whitespace_text_node(),
            last_word_node: text.last_non_whitespace_text_node(),
        }
    }
}

/// One or more consecutive texts, classified as a whole.
#[derive(Debug, Clone)]
pub struct TextBlock<'a> {
    pub texts: Vec<TextRef<'a>>,
    pub text: String,
    pub labels: LabelSet,
    pub num_words: usize,
    pub num_words_in_anchor: usize,
    /// Linked words over words, 0 for a block without words.
    pub link_density: f64,
    pub tag_level: i32,
    is_content: bool,
}

impl<'a> TextBlock<'a> {
    /// Builds a block from texts, taking their labels.
    pub(crate) fn new(texts: Vec<(usize, &mut Text<'a>)>) -> Self {
        let mut block = Self {
            texts: Vec::with_capacity(texts.len()),
            text: String::new(),
            labels: LabelSet::new(),
            num_words: 0,
            num_words_in_anchor: 0,
            link_density: 0.0,
            tag_level: -1,
            is_content: false,
        };

        for (index, text) in texts {
            block.text.push_str(&text.text);
            block.num_words += text.num_words;
            block.num_words_in_anchor += text.num_linked_words;
            block.labels.extend(text.take_labels());
            if block.tag_level == -1 {
                block.tag_level = text.tag_level;
            }
            block.texts.push(TextRef::new(index, text));
        }

        block.link_density = block.calc_link_density();
        block
    }

    #[must_use]
    pub fn is_content(&self) -> bool {
        self.is_content
    }

    /// Returns whether the flag changed.
    pub fn set_is_content(&mut self, is_content: bool) -> bool {
        if self.is_content == is_content {
            return false;
        }
        self.is_content = is_content;
        true
    }

    #[must_use]
    pub fn has_label(&self, label: Label) -> bool {
        self.labels.contains(label)
    }

    pub fn add_label(&mut self, label: Label) {
        self.labels.insert(label);
    }

    pub fn remove_label(&mut self, label: Label) {
        self.labels.remove(label);
    }

    /// Appends `other` to this block.
    pub fn merge_next(&mut self, other: TextBlock<'a>) {
        self.text.push('\n');
        self.text.push_str(&other.text);
        self.num_words += other.num_words;
        self.num_words_in_anchor += other.num_words_in_anchor;
        self.link_density = self.calc_link_density();
        self.is_content |= other.is_content;
        self.texts.extend(other.texts);
        self.labels.extend(other.labels);
        self.tag_level = self.tag_level.min(other.tag_level);
    }

    /// Offset of the first text, `None` for an empty block.
    #[must_use]
    pub fn offset_blocks_start(&self) -> Option<usize> {
        self.texts.first().map(|t| t.offset_block)
    }

    /// Offset of the last text, `None` for an empty block.
    #[must_use]
    pub fn offset_blocks_end(&self) -> Option<usize> {
        self.texts.last().map(|t| t.offset_block)
    }

    #[must_use]
    pub fn first_non_whitespace_text_node(&self) -> Option<NodeRef<'a>> {
        self.texts.first().map(|t| t.first_word_node)
    }

    #[must_use]
    pub fn last_non_whitespace_text_node(&self) -> Option<NodeRef<'a>> {
        self.texts.last().map(|t| t.last_word_node)
    }

    /// Marks the block's texts as content. Titles keep their label so they are
    /// left out of the output.
    pub fn apply_to_model(&self, document: &mut Document<'a>) {
        if !self.is_content {
            return;
        }
        for text_ref in &self.texts {
            if let Some(Element::Text(text)) = document.elements.get_mut(text_ref.element_index) {
                text.set_is_content(true);
                if self.has_label(Label::Title) {
                    text.labels.insert(Label::Title);
                }
            }
        }
    }

    fn calc_link_density(&self) -> f64 {
        if self.num_words == 0 {
            return 0.0;
        }
        self.num_words_in_anchor as f64 / self.num_words as f64
    }

    /// One-line summary followed by the text.
    #[must_use]
    pub fn debug_string(&self) -> String {
        let offset = |o: Option<usize>| o.map_or(-1, |o| o as i64);
        let mut labels: Vec<&str> = self.labels.iter().map(Label::as_str).collect();
        labels.sort_unstable();

        format!(
            "[{}/{};tl={};nw={};ld={:.3};]\t{},{}\n{}",
            offset(self.offset_blocks_start()),
            offset(self.offset_blocks_end()),
            self.tag_level,
            self.num_words,
            self.link_density,
            if self.is_content { "CONTENT" } else { "boilerplate" },
            labels.join(","),
            self.text
        )
    }
}

/// The blocks of a page, in document order.
#[derive(Debug, Clone, Default)]
pub struct TextDocument<'a> {
    pub text_blocks: Vec<TextBlock<'a>>,
}

impl<'a> TextDocument<'a> {
    #[must_use]
    pub fn new(text_blocks: Vec<TextBlock<'a>>) -> Self {
        Self { text_blocks }
    }

    pub fn apply_to_model(&self, document: &mut Document<'a>) {
        for block in &self.text_blocks {
            block.apply_to_model(document);
        }
    }

    /// Words in content blocks.
    #[must_use]
    pub fn count_words_in_content(&self) -> usize {
        self.text_blocks
            .iter()
            .filter(|b| b.is_content())
            .map(|b| b.num_words)
            .sum()
    }

    #[must_use]
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        for block in &self.text_blocks {
            out.push_str(&block.debug_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::DomConverter;
    use crate::dom;
    use crate::word_counter::WordCounterKind;

    const THREE_WORDS: &str = "I love statistics";

    fn convert(dom: &dom::Document) -> Document<'_> {
        let root = dom.select("html").nodes().first().copied();
        match root {
            Some(root) => DomConverter::new(None).convert(root, Box::new(WordCounterKind::Fast)),
            None => panic!("no root"),
        }
    }

    #[test]
    fn test_blocks_follow_groups() {
        let html = format!("<div>{THREE_WORDS}</div><div>{THREE_WORDS} <b>too</b></div>");
        let dom = dom::parse(&html);
        let mut doc = convert(&dom);
        let text_doc = doc.create_text_document();

        assert_eq!(text_doc.text_blocks.len(), 2);
        assert_eq!(text_doc.text_blocks[0].num_words, 3);
        assert_eq!(text_doc.text_blocks[1].num_words, 4);
        assert_eq!(text_doc.text_blocks[0].offset_blocks_start(), Some(0));
        assert_eq!(text_doc.text_blocks[1].offset_blocks_end(), Some(1));
    }

    #[test]
    fn test_count_words_in_content() {
        let html = format!("<p>{THREE_WORDS}</p><p>{THREE_WORDS}</p><p>{THREE_WORDS}</p>");
        let dom = dom::parse(&html);
        let mut doc = convert(&dom);
        let mut text_doc = doc.create_text_document();
        assert_eq!(text_doc.count_words_in_content(), 0);

        text_doc.text_blocks[0].set_is_content(true);
        text_doc.text_blocks[2].set_is_content(true);
        assert_eq!(text_doc.count_words_in_content(), 6);
    }

    #[test]
    fn test_merge_next() {
        let html = r#"<p>one two</p><p><a href="/x">three four</a></p>"#;
        let dom = dom::parse(html);
        let mut doc = convert(&dom);
        let mut text_doc = doc.create_text_document();
        let second = text_doc.text_blocks.remove(1);
        let first = &mut text_doc.text_blocks[0];
        assert!(second.link_density > 0.99);

        first.set_is_content(true);
        first.merge_next(second);
        assert_eq!(first.num_words, 4);
        assert_eq!(first.num_words_in_anchor, 2);
        assert!((first.link_density - 0.5).abs() < f64::EPSILON);
        assert!(first.is_content());
        assert!(first.text.starts_with("one two\n"));
        assert_eq!(first.offset_blocks_start(), Some(0));
        assert_eq!(first.offset_blocks_end(), Some(1));
    }

    #[test]
    fn test_set_is_content_reports_change() {
        let dom = dom::parse("<p>a b c</p>");
        let mut doc = convert(&dom);
        let mut text_doc = doc.create_text_document();
        let block = &mut text_doc.text_blocks[0];
        assert!(block.set_is_content(true));
        assert!(!block.set_is_content(true));
        assert!(block.set_is_content(false));
    }

    #[test]
    fn test_apply_to_model_marks_texts() {
        let dom = dom::parse("<h1>Title here</h1><p>Body text here</p>");
        let mut doc = convert(&dom);
        let mut text_doc = doc.create_text_document();
        for block in &mut text_doc.text_blocks {
            block.set_is_content(true);
        }
        text_doc.text_blocks[0].add_label(Label::Title);
        text_doc.apply_to_model(&mut doc);

        let output = doc.generate_output(false);
        assert!(!output.contains("Title here"));
        assert!(output.contains("Body text here"));
    }

    #[test]
    fn test_debug_string() {
        let dom = dom::parse("<h2>Some heading</h2>");
        let mut doc = convert(&dom);
        let text_doc = doc.create_text_document();
        let debug = text_doc.debug_string();
        assert!(debug.starts_with("[0/0;tl="));
        assert!(debug.contains("nw=2;ld=0.000;]\tboilerplate,H2,HEADING\nSome heading"));
    }
}
