//! # dom-distiller
//!
//! Readable article extraction from HTML pages.
//!
//! A parsed page is flattened into a web document of text, image, table and
//! embed elements. Its texts are grouped into text blocks that a fixed
//! sequence of heuristic filters classifies as content or boilerplate; the
//! decisions flow back to the elements, which are then rendered as clean
//! HTML or plain text.
//!
//! ## Quick Start
//!
//! ```rust
//! use dom_distiller::distill;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>Main content here.</p></article></body></html>"#;
//!
//! let result = distill(html)?;
//! println!("Title: {}", result.title);
//! println!("Content: {}", result.html);
//! # Ok::<(), dom_distiller::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Conversion** (`converter`, `webdoc`): DOM walk into elements and blocks
//! - **Classification** (`filter`): block filters, then element post-filters
//! - **Metadata** (`markup`, `title`): OpenGraph properties and the page title
//! - **Output** (`output`): sanitized clones of the kept subtrees

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over the `dom_query` arena.
pub mod dom;

/// Crate-owned output trees and their sanitizing.
pub mod output;

/// URL resolution and inspection.
pub mod url_utils;

/// Word segmentation strategies.
pub mod word_counter;

/// Block and text labels.
pub mod label;

/// The web document model: elements, text blocks and their builders.
pub mod webdoc;

/// Data table versus layout table classification.
pub mod table;

/// Image and embedded media extraction.
pub mod embed;

/// DOM to web document conversion.
pub mod converter;

/// Content classification filters.
pub mod filter;

/// Document title heuristic.
pub mod title;

/// Structured markup metadata (OpenGraph).
pub mod markup;

/// Distillation drivers.
pub mod extractor;

use std::time::Instant;

use dom_query::Document;

pub use error::{Error, Result};
pub use extractor::ContentExtractor;
pub use options::Options;
pub use result::{DistillResult, MarkupArticle, MarkupImage, MarkupInfo, TimingEntry, TimingInfo};

const SOFT_HYPHEN: char = '\u{00AD}';

/// Distills an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use dom_distiller::distill;
///
/// let html = "<html><body><p>Some content for the reader.</p></body></html>";
/// let result = distill(html)?;
/// println!("{} words", result.word_count);
/// # Ok::<(), dom_distiller::Error>(())
/// ```
pub fn distill(html: &str) -> Result<DistillResult> {
    distill_with_options(html, &Options::default())
}

/// Distills an HTML document with custom options.
///
/// Soft hyphens are removed before parsing.
///
/// # Example
///
/// ```rust
/// use dom_distiller::{distill_with_options, Options};
///
/// let html = "<html><body><p>Some content for the reader.</p></body></html>";
/// let options = Options {
///     extract_text_only: true,
///     ..Options::with_url("https://example.com/news/1.html")?
/// };
/// let result = distill_with_options(html, &options)?;
/// assert_eq!(result.url.as_deref(), Some("https://example.com/news/1.html"));
/// # Ok::<(), dom_distiller::Error>(())
/// ```
pub fn distill_with_options(html: &str, options: &Options) -> Result<DistillResult> {
    let document = if html.contains(SOFT_HYPHEN) {
        Document::from(html.replace(SOFT_HYPHEN, "").as_str())
    } else {
        Document::from(html)
    };
    distill_document(&document, options)
}

/// Distills an already parsed document.
///
/// Returns [`Error::InvalidInput`] when the document has no element.
pub fn distill_document(document: &Document, options: &Options) -> Result<DistillResult> {
    let start = Instant::now();

    let root = document
        .select("*")
        .nodes()
        .first()
        .copied()
        .ok_or(Error::InvalidInput)?;

    let mut extractor = ContentExtractor::new(root, options);
    let (html, word_count) = extractor.extract_content(options.extract_text_only);

    let mut timing = extractor.timing().clone();
    timing.total_time = start.elapsed();

    Ok(DistillResult {
        url: options.original_url.as_ref().map(ToString::to_string),
        title: extractor.title().to_string(),
        text_direction: extractor.text_direction(),
        html,
        content_images: extractor.image_urls().to_vec(),
        word_count,
        markup_info: extractor.markup_info(),
        timing,
    })
}
