//! DOM to web document conversion.
//!
//! A depth-first walk over the parsed page. Each visited node is either
//! handed to the document builder (text, line breaks, element start/end),
//! replaced by an embed, or skipped together with its subtree.

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::dom::{self, NodeRef};
use crate::embed::{default_extractors, EmbedExtractor};
use crate::table::{self, TableType};
use crate::webdoc::{
    can_be_nested, Document, DocumentBuilder, Element, Tag, TagType, Video, WebDocumentBuilder,
};
use crate::word_counter::WordCounter;

/// Converts a subtree of the page into a web [`Document`].
pub struct DomConverter {
    extractors: Vec<Box<dyn EmbedExtractor>>,
    embed_tag_names: HashSet<&'static str>,
    page_url: Option<Url>,
}

impl DomConverter {
    #[must_use]
    pub fn new(page_url: Option<Url>) -> Self {
        let extractors = default_extractors(page_url.as_ref());
        let embed_tag_names = extractors
            .iter()
            .flat_map(|e| e.relevant_tag_names().iter().copied())
            .collect();
        Self {
            extractors,
            embed_tag_names,
            page_url,
        }
    }

    /// Walks `root` with a fresh [`WebDocumentBuilder`] and returns the document.
    #[must_use]
    pub fn convert<'a>(&self, root: NodeRef<'a>, counter: Box<dyn WordCounter>) -> Document<'a> {
        let mut builder = WebDocumentBuilder::new(counter, self.page_url.clone());
        self.walk(root, &mut builder);
        builder.build()
    }

    /// Walks `root`, feeding any builder.
    pub fn walk<'a, B: DocumentBuilder<'a>>(&self, root: NodeRef<'a>, builder: &mut B) {
        if !self.visit(root, builder) {
            return;
        }
        let mut child = root.first_child();
        while let Some(node) = child {
            self.walk(node, builder);
            child = node.next_sibling();
        }
        Self::exit(root, builder);
    }

    /// Returns whether the children should be walked (and `exit` called).
    fn visit<'a, B: DocumentBuilder<'a>>(&self, node: NodeRef<'a>, builder: &mut B) -> bool {
        if node.is_text() {
            builder.add_text_node(node);
            return false;
        }
        if node.is_element() {
            return self.visit_element(node, builder);
        }
        false
    }

    fn exit<'a, B: DocumentBuilder<'a>>(node: NodeRef<'a>, builder: &mut B) {
        if node.is_element() {
            let tag = dom::tag_name(&node);
            if can_be_nested(&tag) {
                builder.add_tag(Tag::new(&tag, TagType::End));
            }
            builder.end_node();
        }
    }

    fn visit_element<'a, B: DocumentBuilder<'a>>(&self, node: NodeRef<'a>, builder: &mut B) -> bool {
        // Only markup-level visibility is known here; stylesheets are never computed.
        if !dom::is_probably_visible(&node) {
            return false;
        }

        let tag = dom::tag_name(&node);
        if self.embed_tag_names.contains(tag.as_str()) {
            for extractor in &self.extractors {
                if let Some(embed) = extractor.extract(node) {
                    builder.add_embed(embed);
                    return false;
                }
            }
        }

        let class_name = dom::class_name(&node);
        if class_name == "sharing"
            || class_name == "socialArea"
            || dom::attribute_or_empty(&node, "data-component") == "share"
        {
            return false;
        }

        if can_be_nested(&tag) {
            builder.add_tag(Tag::new(&tag, TagType::Start));
        }

        match tag.as_str() {
            // Mediawiki "edit section" links; red links lack the section parameter.
            "a" if dom::attribute_or_empty(&node, "href").contains("action=edit&section=") => {
                return false;
            }
            "span" if class_name == "mw-editsection" => return false,
            "br" => {
                builder.add_line_break(node);
                return false;
            }
            "table" => {
                let (table_type, reason) = table::classify(&node);
                debug!(
                    %table_type,
                    %reason,
                    id = %dom::id(&node),
                    class = %class_name,
                    parent = %dom::parent_element(&node).map(|p| dom::tag_name(&p)).unwrap_or_default(),
                    "table"
                );
                if table_type == TableType::Data {
                    builder.add_data_table(node);
                    return false;
                }
            }
            "video" => {
                builder.add_embed(Element::Video(Video::new(node, self.page_url.clone())));
                return false;
            }
            // Skipped, but they still break the surrounding text.
            "option" | "object" | "embed" | "applet" => {
                builder.skip_node(node);
                return false;
            }
            "head" | "style" | "script" | "link" | "noscript" | "iframe" | "svg" => return false,
            _ => {}
        }

        builder.start_node(node);
        true
    }
}
