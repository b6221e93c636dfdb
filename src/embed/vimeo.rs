//! Vimeo player iframes.

use tracing::debug;
use url::Url;

use crate::dom::{self, NodeRef};
use crate::url_utils::{create_absolute_url, has_root_domain, last_path_segment, parse_url};
use crate::webdoc::{Element, Embed};

use super::{query_params, EmbedExtractor};

pub struct VimeoExtractor {
    page_url: Option<Url>,
}

impl VimeoExtractor {
    #[must_use]
    pub fn new(page_url: Option<Url>) -> Self {
        Self { page_url }
    }
}

impl EmbedExtractor for VimeoExtractor {
    fn relevant_tag_names(&self) -> &'static [&'static str] {
        &["iframe"]
    }

    fn extract<'a>(&self, node: NodeRef<'a>) -> Option<Element<'a>> {
        if !node.has_name("iframe") {
            return None;
        }

        let src = create_absolute_url(&dom::attribute_or_empty(&node, "src"), self.page_url.as_ref());
        if !has_root_domain(&src, "player.vimeo.com") {
            return None;
        }

        let url = parse_url(&src)?;
        let id = last_path_segment(&url).filter(|part| part != "video")?;
        debug!(%id, "vimeo embed extracted");
        Some(Element::Embed(Embed::new(node, "vimeo", id, query_params(&url))))
    }
}
