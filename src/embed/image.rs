//! Images, pictures, figures and lazy-loaded image placeholders.
//!
//! Lazy-loading sites keep the real URL in a `data-*` attribute (or in a
//! `<noscript>` copy of the image). The extracted clone gets those promoted
//! to `src`/`srcset`; the parsed page is left as it is.

use tracing::trace;
use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::output::{OutputElement, OutputNode};
use crate::patterns::{BASE64_DATA_URL, LAZY_IMAGE_SRC, LAZY_IMAGE_SRCSET};
use crate::webdoc::{Element, Figure, Image};

use super::EmbedExtractor;

const LAZY_IMAGE_SRC_ATTRS: &[&str] = &["data-src", "data-original", "datasrc", "data-url"];

const LAZY_IMAGE_SRCSET_ATTRS: &[&str] = &["data-srcset", "datasrcset"];

/// Base64 payloads shorter than this (about 100 bytes decoded) are placeholders.
const MIN_BASE64_LENGTH: usize = 133;

pub struct ImageExtractor {
    page_url: Option<Url>,
}

impl ImageExtractor {
    #[must_use]
    pub fn new(page_url: Option<Url>) -> Self {
        Self { page_url }
    }

    fn extract_figure<'a>(&self, figure: NodeRef<'a>) -> Option<Element<'a>> {
        let (anchor, mut image) = find_real_figure_image(figure)?;
        if image.name == "picture" {
            process_picture(&mut image);
        }

        let caption = match dom::first_element_by_tag_name(&figure, "figcaption") {
            None => create_fig_caption(&dom::inner_text(&figure)),
            Some(caption) => {
                // Credits and similar non-caption content usually come with links;
                // only then is the caption's markup kept.
                let has_links = caption
                    .descendants_it()
                    .any(|n| n.has_name("a") && n.has_attr("href"));
                if has_links {
                    OutputNode::deep_clone(&caption)
                        .and_then(OutputNode::into_element)
                        .unwrap_or_else(|| OutputElement::new("figcaption"))
                } else {
                    create_fig_caption(&dom::inner_text(&caption))
                }
            }
        };

        replace_lazy_attrs(&mut image);
        Some(Element::Figure(Figure {
            image: Image::new(anchor, image, self.page_url.clone()),
            caption,
        }))
    }
}

impl EmbedExtractor for ImageExtractor {
    fn relevant_tag_names(&self) -> &'static [&'static str] {
        &["img", "picture", "figure", "span"]
    }

    fn extract<'a>(&self, node: NodeRef<'a>) -> Option<Element<'a>> {
        let tag = dom::tag_name(&node);
        match tag.as_str() {
            "figure" => self.extract_figure(node),
            "span" => {
                // Wikipedia's lazy-loaded images.
                if !dom::class_name(&node).contains("lazy-image-placeholder") {
                    return None;
                }
                let mut img = OutputElement::new("img");
                img.set_attr("src", &dom::attribute_or_empty(&node, "data-src"));
                img.set_attr("srcset", &dom::attribute_or_empty(&node, "data-srcset"));
                Some(Element::Image(Image::new(node, img, self.page_url.clone())))
            }
            "img" | "picture" => {
                let mut image = OutputNode::deep_clone(&node)?.into_element()?;
                if tag == "picture" {
                    process_picture(&mut image);
                }
                replace_lazy_attrs(&mut image);
                Some(Element::Image(Image::new(node, image, self.page_url.clone())))
            }
            _ => None,
        }
    }
}

/// The image of a figure and the node it is anchored to. Images inside
/// `<noscript>` win over the (usually lazy) visible ones, `<picture>` over `<img>`.
fn find_real_figure_image(figure: NodeRef<'_>) -> Option<(NodeRef<'_>, OutputElement)> {
    let noscript = dom::first_element_by_tag_name(&figure, "noscript");

    for tag in ["picture", "img"] {
        if let Some(noscript) = &noscript {
            if let Some(image) = noscript_image(noscript, tag) {
                return Some((figure, image));
            }
        }
        if let Some(node) = dom::first_element_by_tag_name(&figure, tag) {
            let image = OutputNode::deep_clone(&node)?.into_element()?;
            return Some((node, image));
        }
    }
    None
}

/// Noscript content is raw text in a scripting-enabled parse; it is parsed on its own.
fn noscript_image(noscript: &NodeRef, tag: &str) -> Option<OutputElement> {
    if let Some(img) = dom::first_element_by_tag_name(noscript, "img") {
        return OutputNode::deep_clone(&img)?.into_element();
    }
    let fragment = Document::from(dom::text_content(noscript));
    let body = *fragment.select("body").nodes().first()?;
    let image = dom::first_element_by_tag_name(&body, tag)?;
    OutputNode::deep_clone(&image)?.into_element()
}

/// A `<figcaption>` holding only the trimmed text. The text is parsed first
/// since some sites put `<noscript>` markup into captions.
fn create_fig_caption(text: &str) -> OutputElement {
    let parsed = Document::from(text);
    let text = parsed
        .select("body")
        .nodes()
        .first()
        .map(dom::inner_text)
        .unwrap_or_default();

    let mut caption = OutputElement::new("figcaption");
    let text = text.trim();
    if !text.is_empty() {
        caption.push(OutputNode::Text(text.to_string()));
    }
    caption
}

/// Keeps only `img` and `source` inside a picture; without any `img`, the
/// first `source` becomes one.
fn process_picture(picture: &mut OutputElement) {
    fn retain_media(element: &mut OutputElement) {
        element.children.retain(|child| match child {
            OutputNode::Element(e) => e.name == "img" || e.name == "source",
            OutputNode::Text(_) => true,
        });
        for child in &mut element.children {
            if let OutputNode::Element(e) = child {
                retain_media(e);
            }
        }
    }
    retain_media(picture);

    let has_img = picture.elements().iter().skip(1).any(|e| e.name == "img");
    if !has_img {
        if let Some(source) = picture
            .children
            .iter_mut()
            .find_map(|child| match child {
                OutputNode::Element(e) if e.name == "source" => Some(e),
                _ => None,
            })
        {
            source.name = "img".to_string();
        }
    }
}

/// Promotes lazy-loading attributes on the base element and every `img`/`source` in it.
fn replace_lazy_attrs(base: &mut OutputElement) {
    let base_name = base.name.clone();
    let mut is_base = true;
    base.for_each_element_mut(&mut |e| {
        let relevant = is_base || e.name == "img" || e.name == "source";
        is_base = false;
        if !relevant {
            return;
        }
        replace_lazy_src(e);
        if e.attr("src").is_none_or(str::is_empty) {
            replace_lazy_srcset(e);
        }
    });
    trace!(tag = %base_name, "lazy image attributes replaced");
}

fn replace_lazy_src(img: &mut OutputElement) {
    let mut src = img.attr("src").unwrap_or_default().to_string();
    if !src.is_empty() && !image_src_is_valid(&src) {
        img.remove_attr("src");
        src.clear();
    }

    if let Some(lazy) = LAZY_IMAGE_SRC_ATTRS
        .iter()
        .find_map(|name| img.attr(name).filter(|v| !v.is_empty()))
    {
        src = lazy.to_string();
    }

    if src.is_empty() {
        if let Some((_, value)) = img.attrs.iter().find(|(_, v)| LAZY_IMAGE_SRC.is_match(v)) {
            src = value.clone();
        }
    }

    if !src.is_empty() {
        img.set_attr("src", &src);
    }
}

fn replace_lazy_srcset(img: &mut OutputElement) {
    let mut srcset = img.attr("srcset").unwrap_or_default().to_string();
    if let Some(lazy) = LAZY_IMAGE_SRCSET_ATTRS
        .iter()
        .find_map(|name| img.attr(name).filter(|v| !v.is_empty()))
    {
        srcset = lazy.to_string();
    }

    if srcset.is_empty() {
        if let Some((_, value)) = img.attrs.iter().find(|(_, v)| LAZY_IMAGE_SRCSET.is_match(v)) {
            srcset = value.clone();
        }
    }

    if !srcset.is_empty() {
        img.set_attr("srcset", &srcset);
    }
}

/// Tiny base64 images are placeholders. SVG can be meaningful in very few bytes.
fn image_src_is_valid(src: &str) -> bool {
    let Some(caps) = BASE64_DATA_URL.captures(src) else {
        return true;
    };
    if caps.get(1).is_some_and(|m| m.as_str() == "image/svg+xml") {
        return true;
    }
    let payload_start = src.find("base64").map_or(0, |i| i + 7);
    src.len().saturating_sub(payload_start) >= MIN_BASE64_LENGTH
}
