//! Tweets, rendered (`iframe`) or not yet rendered (`blockquote.twitter-tweet`).

use std::collections::BTreeMap;

use tracing::debug;
use url::Url;

use crate::dom::{self, NodeRef};
use crate::url_utils::{create_absolute_url, has_root_domain, last_path_segment, parse_url};
use crate::webdoc::{Element, Embed};

use super::EmbedExtractor;

pub struct TwitterExtractor {
    page_url: Option<Url>,
}

impl TwitterExtractor {
    #[must_use]
    pub fn new(page_url: Option<Url>) -> Self {
        Self { page_url }
    }

    fn extract_non_rendered(&self, node: &NodeRef) -> Option<String> {
        if !dom::class_name(node).contains("twitter-tweet") {
            return None;
        }

        // The last anchor links to the tweet itself.
        let anchor = dom::elements_by_tag_name(node, "a").pop()?;
        let href = create_absolute_url(&dom::attribute_or_empty(&anchor, "href"), self.page_url.as_ref());
        if !has_root_domain(&href, "twitter.com") {
            return None;
        }
        parse_url(&href).and_then(|url| last_path_segment(&url))
    }

    fn extract_rendered(node: &NodeRef) -> Option<String> {
        if !node.has_name("iframe") {
            return None;
        }
        if !has_root_domain(&dom::attribute_or_empty(node, "src"), "twitter.com") {
            return None;
        }
        dom::get_attribute(node, "data-tweet-id").filter(|id| !id.is_empty())
    }
}

impl EmbedExtractor for TwitterExtractor {
    fn relevant_tag_names(&self) -> &'static [&'static str] {
        &["blockquote", "iframe"]
    }

    fn extract<'a>(&self, node: NodeRef<'a>) -> Option<Element<'a>> {
        let tweet_id = match dom::tag_name(&node).as_str() {
            "blockquote" => self.extract_non_rendered(&node),
            "iframe" => Self::extract_rendered(&node),
            _ => None,
        }?;

        debug!(id = %tweet_id, "twitter embed extracted");
        Some(Element::Embed(Embed::new(node, "twitter", tweet_id, BTreeMap::new())))
    }
}
