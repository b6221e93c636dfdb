//! One distillation run over a parsed page.

use std::time::Instant;

use tracing::debug;
use url::Url;

use crate::converter::DomConverter;
use crate::dom::{self, NodeRef};
use crate::filter::document::{LeadImageFinder, NestedElementRetainer, RelevantElements};
use crate::filter::DocumentFilter;
use crate::markup::{MarkupAccessor, MarkupParser};
use crate::result::{MarkupInfo, TimingInfo};
use crate::title::document_title;
use crate::webdoc::Document;
use crate::word_counter::{select_word_counter, WordCounterKind};
use crate::Options;

use super::ArticleExtractor;

/// Extracts the article of a page: title, markup metadata and content.
///
/// Markup is parsed, the word counter selected and the candidate titles
/// computed up front; [`ContentExtractor::extract_content`] then builds the
/// web document, classifies it and renders the output.
pub struct ContentExtractor<'a> {
    root: NodeRef<'a>,
    page_url: Option<Url>,
    counter: WordCounterKind,
    markup: MarkupParser,
    candidate_titles: Vec<String>,
    image_urls: Vec<String>,
    timing: TimingInfo,
}

impl<'a> ContentExtractor<'a> {
    /// Prepares a run over the `<html>` element of the tree containing
    /// `root`, or over `root` itself when there is none.
    #[must_use]
    pub fn new(root: NodeRef<'a>, options: &Options) -> Self {
        let root = if root.has_name("html") {
            root
        } else {
            dom::first_element_by_tag_name(&root, "html").unwrap_or(root)
        };

        let mut timing = TimingInfo::default();
        let start = Instant::now();
        let markup = MarkupParser::new(&root, &mut timing);
        timing.markup_parsing_time = start.elapsed();

        let counter = options
            .word_counter
            .unwrap_or_else(|| select_word_counter(&dom::text_content(&root)));

        let mut candidate_titles = Vec::new();
        if let Some(title) = markup.title() {
            candidate_titles.push(title.to_string());
        }
        candidate_titles.push(document_title(&root, &counter));
        debug!(?counter, titles = ?candidate_titles, "content extractor ready");

        Self {
            root,
            page_url: options.original_url.clone(),
            counter,
            markup,
            candidate_titles,
            image_urls: Vec::new(),
            timing,
        }
    }

    /// Markup title if present, else the document title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.candidate_titles.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn candidate_titles(&self) -> &[String] {
        &self.candidate_titles
    }

    #[must_use]
    pub fn markup_info(&self) -> MarkupInfo {
        self.markup.markup_info()
    }

    #[must_use]
    pub fn word_counter(&self) -> WordCounterKind {
        self.counter
    }

    /// `dir` of the root element, else of `<body>`, else `"auto"`.
    #[must_use]
    pub fn text_direction(&self) -> String {
        let body = dom::first_element_by_tag_name(&self.root, "body");
        [Some(self.root), body]
            .into_iter()
            .flatten()
            .map(|node| dom::attribute_or_empty(&node, "dir"))
            .find(|dir| !dir.is_empty())
            .unwrap_or_else(|| "auto".to_string())
    }

    /// Runs the pipeline and returns the output with its content word count.
    pub fn extract_content(&mut self, text_only: bool) -> (String, usize) {
        let start = Instant::now();
        let converter = DomConverter::new(self.page_url.clone());
        let mut document = converter.convert(self.root, Box::new(self.counter));
        self.timing.document_construction_time = start.elapsed();

        let start = Instant::now();
        let word_count = self.process_document(&mut document);
        RelevantElements.process(&mut document);
        LeadImageFinder.process(&mut document);
        NestedElementRetainer.process(&mut document);
        self.timing.article_processing_time = start.elapsed();

        let start = Instant::now();
        let output = document.generate_output(text_only);
        self.timing.formatting_time = start.elapsed();

        self.image_urls = document.image_urls();
        debug!(
            elements = document.elements.len(),
            word_count,
            images = self.image_urls.len(),
            "content extracted"
        );
        (output, word_count)
    }

    fn process_document(&self, document: &mut Document<'a>) -> usize {
        let mut text_document = document.create_text_document();
        ArticleExtractor::new(&self.counter, &self.candidate_titles).extract(&mut text_document);
        let word_count = text_document.count_words_in_content();
        text_document.apply_to_model(document);
        word_count
    }

    /// Image URLs of the last extraction.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    #[must_use]
    pub fn timing(&self) -> &TimingInfo {
        &self.timing
    }

    pub fn timing_mut(&mut self) -> &mut TimingInfo {
        &mut self.timing
    }
}
