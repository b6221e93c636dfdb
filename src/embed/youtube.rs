//! YouTube iframes and legacy flash `object` embeds.

use tracing::debug;
use url::Url;

use crate::dom::{self, NodeRef};
use crate::url_utils::{create_absolute_url, has_root_domain, last_path_segment, parse_url};
use crate::webdoc::{Element, Embed};

use super::{query_params, EmbedExtractor};

pub struct YouTubeExtractor {
    page_url: Option<Url>,
}

impl YouTubeExtractor {
    #[must_use]
    pub fn new(page_url: Option<Url>) -> Self {
        Self { page_url }
    }
}

/// Source URL of an `object` embed: its `data` for flash objects, else the `movie` param.
fn object_src(node: &NodeRef) -> String {
    if dom::attribute_or_empty(node, "type") == "application/x-shockwave-flash" {
        return dom::attribute_or_empty(node, "data");
    }
    node.descendants_it()
        .find(|n| n.has_name("param") && n.attr("name").is_some_and(|name| &*name == "movie"))
        .map(|param| dom::attribute_or_empty(&param, "value"))
        .unwrap_or_else(|| dom::attribute_or_empty(node, "src"))
}

impl EmbedExtractor for YouTubeExtractor {
    fn relevant_tag_names(&self) -> &'static [&'static str] {
        &["iframe", "object"]
    }

    fn extract<'a>(&self, node: NodeRef<'a>) -> Option<Element<'a>> {
        let mut src = match dom::tag_name(&node).as_str() {
            "iframe" => dom::attribute_or_empty(&node, "src"),
            "object" => object_src(&node),
            _ => return None,
        };

        // "http://www.youtube.com/v/<id>&param=value" is seen in the wild.
        if !src.contains('?') {
            src = src.replacen('&', "?", 1);
        }

        let src = create_absolute_url(&src, self.page_url.as_ref());
        if !has_root_domain(&src, "youtube.com") && !has_root_domain(&src, "youtube-nocookie.com") {
            return None;
        }

        let url = parse_url(&src)?;
        let id = last_path_segment(&url).filter(|part| part != "embed")?;
        debug!(%id, "youtube embed extracted");
        Some(Element::Embed(Embed::new(node, "youtube", id, query_params(&url))))
    }
}
