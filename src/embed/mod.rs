//! Embed extractors.
//!
//! An extractor looks at a single element and, when it recognizes it,
//! returns the web document element that replaces the whole subtree.

mod image;
mod twitter;
mod vimeo;
mod youtube;

use std::collections::BTreeMap;

use url::Url;

use crate::dom::NodeRef;
use crate::webdoc::Element;

pub use image::ImageExtractor;
pub use twitter::TwitterExtractor;
pub use vimeo::VimeoExtractor;
pub use youtube::YouTubeExtractor;

/// Detects embedded content.
pub trait EmbedExtractor {
    /// Tags this extractor is interested in.
    fn relevant_tag_names(&self) -> &'static [&'static str];

    /// The element for `node`, or `None` when it is not an embed this extractor handles.
    fn extract<'a>(&self, node: NodeRef<'a>) -> Option<Element<'a>>;
}

/// The standard extractors, in the order they are tried.
#[must_use]
pub fn default_extractors(page_url: Option<&Url>) -> Vec<Box<dyn EmbedExtractor>> {
    vec![
        Box::new(ImageExtractor::new(page_url.cloned())),
        Box::new(TwitterExtractor::new(page_url.cloned())),
        Box::new(VimeoExtractor::new(page_url.cloned())),
        Box::new(YouTubeExtractor::new(page_url.cloned())),
    ]
}

/// Query parameters; for repeated keys the last value wins.
fn query_params(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
