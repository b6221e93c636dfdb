//! Web document elements.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use url::Url;

use crate::dom::{self, NodeRef};
use crate::output::{
    all_srcset_urls, clone_and_process_tree, make_all_src_attributes_absolute, process_for_output,
    strip_attributes, OutputElement, OutputNode,
};
use crate::url_utils::create_absolute_url;

use super::Text;

/// One entry of the flat web document.
#[derive(Debug, Clone)]
pub enum Element<'a> {
    Text(Text<'a>),
    Tag(Tag),
    Image(Image<'a>),
    Figure(Figure<'a>),
    Video(Video<'a>),
    Embed(Embed<'a>),
    Table(Table<'a>),
}

impl Element<'_> {
    #[must_use]
    pub fn is_content(&self) -> bool {
        match self {
            Element::Text(e) => e.is_content(),
            Element::Tag(e) => e.is_content,
            Element::Image(e) => e.is_content,
            Element::Figure(e) => e.image.is_content,
            Element::Video(e) => e.is_content,
            Element::Embed(e) => e.is_content,
            Element::Table(e) => e.is_content,
        }
    }

    pub fn set_is_content(&mut self, is_content: bool) {
        match self {
            Element::Text(e) => e.set_is_content(is_content),
            Element::Tag(e) => e.is_content = is_content,
            Element::Image(e) => e.is_content = is_content,
            Element::Figure(e) => e.image.is_content = is_content,
            Element::Video(e) => e.is_content = is_content,
            Element::Embed(e) => e.is_content = is_content,
            Element::Table(e) => e.is_content = is_content,
        }
    }

    #[must_use]
    pub fn element_type(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Tag(_) => "tag",
            Element::Image(_) => "image",
            Element::Figure(_) => "figure",
            Element::Video(_) => "video",
            Element::Embed(_) => "embed",
            Element::Table(_) => "table",
        }
    }

    /// HTML (or plain text when `text_only`) for this element.
    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        match self {
            Element::Text(e) => e.generate_output(text_only),
            Element::Tag(e) => e.generate_output(text_only),
            Element::Image(e) => e.generate_output(text_only),
            Element::Figure(e) => e.generate_output(text_only),
            Element::Video(e) => e.generate_output(text_only),
            Element::Embed(e) => e.generate_output(text_only),
            Element::Table(e) => e.generate_output(text_only),
        }
    }

    #[must_use]
    pub fn debug_string(&self) -> String {
        match self {
            Element::Text(e) => e.debug_string(),
            Element::Tag(e) => format!(
                "ELEMENT \"tag\": name={:?}, type={:?}, is_content={}",
                e.name, e.tag_type, e.is_content
            ),
            Element::Image(e) => format!(
                "ELEMENT \"image\": html={:?}, is_content={}",
                e.source.outer_html(),
                e.is_content
            ),
            Element::Figure(e) => format!(
                "ELEMENT \"figure\": html={:?}, caption={:?}, is_content={}",
                e.image.source.outer_html(),
                e.caption.inner_text(),
                e.image.is_content
            ),
            Element::Video(e) => format!(
                "ELEMENT \"video\": src={:?}, is_content={}",
                dom::attribute_or_empty(&e.node, "src"),
                e.is_content
            ),
            Element::Embed(e) => format!(
                "ELEMENT \"embed\": type={:?} id={:?}, is_content={}",
                e.embed_type, e.id, e.is_content
            ),
            Element::Table(e) => format!(
                "ELEMENT \"table\": html={:?}, is_content={}",
                e.node.html().to_string(),
                e.is_content
            ),
        }
    }
}

// === Tag ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    Start,
    End,
}

/// Start or end marker of an element that may nest across block boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub tag_type: TagType,
    pub is_content: bool,
}

impl Tag {
    #[must_use]
    pub fn new(name: &str, tag_type: TagType) -> Self {
        Self {
            name: name.to_string(),
            tag_type,
            is_content: false,
        }
    }

    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        if text_only {
            return String::new();
        }
        match self.tag_type {
            TagType::Start => format!("<{}>", self.name),
            TagType::End => format!("</{}>", self.name),
        }
    }
}

// === Image ===

/// An image. `source` is the unsanitized clone produced by the extractor;
/// the sanitized version is computed once, on first use.
#[derive(Debug, Clone)]
pub struct Image<'a> {
    /// Node in the parsed document the image was found at.
    pub node: NodeRef<'a>,
    pub source: OutputElement,
    pub page_url: Option<Url>,
    pub is_content: bool,
    processed: OnceCell<OutputElement>,
}

impl<'a> Image<'a> {
    #[must_use]
    pub fn new(node: NodeRef<'a>, source: OutputElement, page_url: Option<Url>) -> Self {
        Self {
            node,
            source,
            page_url,
            is_content: false,
            processed: OnceCell::new(),
        }
    }

    /// The sanitized clone, built on first call.
    pub fn processed(&self) -> &OutputElement {
        self.processed.get_or_init(|| {
            let mut cloned = self.source.clone();
            if let Some(img) = cloned.first_element_mut("img") {
                if let Some(src) = img.attr("src").filter(|s| !s.is_empty()) {
                    let absolute = create_absolute_url(src, self.page_url.as_ref());
                    img.set_attr("src", &absolute);
                }
            }
            process_for_output(&mut cloned, self.page_url.as_ref());
            cloned
        })
    }

    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        if text_only {
            return String::new();
        }
        self.processed().outer_html()
    }

    /// `src` of the image followed by every `srcset` URL.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        let processed = self.processed();
        let mut urls = Vec::new();
        if let Some(src) = processed.attr("src").filter(|s| !s.is_empty()) {
            urls.push(src.to_string());
        }
        urls.extend(all_srcset_urls(processed));
        urls
    }
}

// === Figure ===

/// An image with its caption.
#[derive(Debug, Clone)]
pub struct Figure<'a> {
    pub image: Image<'a>,
    /// `figcaption` element, either cloned or synthesized from caption text.
    pub caption: OutputElement,
}

impl Figure<'_> {
    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        let mut caption = self.caption.clone();
        process_for_output(&mut caption, self.image.page_url.as_ref());
        if text_only {
            return caption.inner_text();
        }

        let mut figure = OutputElement::new("figure");
        figure.push(OutputNode::Element(self.image.processed().clone()));
        if !self.caption.inner_html().is_empty() {
            figure.push(OutputNode::Element(caption));
        }
        strip_attributes(&mut figure);
        figure.outer_html()
    }

    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.image.urls()
    }
}

// === Video ===

#[derive(Debug, Clone)]
pub struct Video<'a> {
    pub node: NodeRef<'a>,
    pub page_url: Option<Url>,
    pub is_content: bool,
}

impl<'a> Video<'a> {
    #[must_use]
    pub fn new(node: NodeRef<'a>, page_url: Option<Url>) -> Self {
        Self {
            node,
            page_url,
            is_content: false,
        }
    }

    /// The `<video>` with only its `source` and `track` children.
    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        if text_only {
            return String::new();
        }
        let Some(mut video) = OutputNode::shallow_clone(&self.node).and_then(OutputNode::into_element)
        else {
            return String::new();
        };
        for child in self.node.element_children() {
            if child.has_name("source") || child.has_name("track") {
                if let Some(clone) = OutputNode::shallow_clone(&child) {
                    video.push(clone);
                }
            }
        }

        if let Some(poster) = video.attr("poster").filter(|p| !p.is_empty()) {
            let absolute = create_absolute_url(poster, self.page_url.as_ref());
            video.set_attr("poster", &absolute);
        }
        strip_attributes(&mut video);
        make_all_src_attributes_absolute(&mut video, self.page_url.as_ref());
        video.outer_html()
    }
}

// === Embed ===

/// A recognized third-party embed, rendered as a placeholder.
#[derive(Debug, Clone)]
pub struct Embed<'a> {
    pub node: NodeRef<'a>,
    /// Embed family, e.g. `twitter`, `vimeo`, `youtube`.
    pub embed_type: String,
    pub id: String,
    pub params: BTreeMap<String, String>,
    pub is_content: bool,
}

impl<'a> Embed<'a> {
    #[must_use]
    pub fn new(node: NodeRef<'a>, embed_type: &str, id: String, params: BTreeMap<String, String>) -> Self {
        Self {
            node,
            embed_type: embed_type.to_string(),
            id,
            params,
            is_content: false,
        }
    }

    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        if text_only {
            return String::new();
        }
        let mut placeholder = OutputElement::new("div");
        placeholder.set_attr("class", "embed-placeholder");
        placeholder.set_attr("data-type", &self.embed_type);
        placeholder.set_attr("data-id", &self.id);
        placeholder.outer_html()
    }
}

// === Table ===

/// A data table, output as a whole.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    pub node: NodeRef<'a>,
    pub page_url: Option<Url>,
    pub is_content: bool,
    processed: OnceCell<Option<OutputElement>>,
}

impl<'a> Table<'a> {
    #[must_use]
    pub fn new(node: NodeRef<'a>, page_url: Option<Url>) -> Self {
        Self {
            node,
            page_url,
            is_content: false,
            processed: OnceCell::new(),
        }
    }

    /// The sanitized clone, built on first call.
    pub fn processed(&self) -> Option<&OutputElement> {
        self.processed
            .get_or_init(|| clone_and_process_tree(&self.node, self.page_url.as_ref()))
            .as_ref()
    }

    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        match self.processed() {
            Some(table) if text_only => table.inner_text(),
            Some(table) => table.outer_html(),
            None => String::new(),
        }
    }

    /// `src` and `srcset` URLs of every `img` and `source` in the table.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        let Some(table) = self.processed() else {
            return Vec::new();
        };
        let mut urls = Vec::new();
        for e in table.elements() {
            if e.name != "img" && e.name != "source" {
                continue;
            }
            if let Some(src) = e.attr("src").filter(|s| !s.is_empty()) {
                urls.push(src.to_string());
            }
            urls.extend(all_srcset_urls(e));
        }
        urls
    }
}
