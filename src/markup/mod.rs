//! Structured markup metadata.
//!
//! Pages describe themselves through structured markup such as OpenGraph
//! `<meta property>` tags. Each format is read by a [`MarkupAccessor`]; the
//! [`MarkupParser`] asks its accessors in turn and keeps the first value
//! found for every field.

mod opengraph;

use std::time::Instant;

use tracing::debug;

use crate::dom::NodeRef;
use crate::result::{MarkupArticle, MarkupImage, MarkupInfo, TimingInfo};

pub use opengraph::OpenGraphMarkup;

/// Read access to the metadata of one markup format.
pub trait MarkupAccessor {
    fn title(&self) -> Option<&str>;
    /// `"Article"` for article pages.
    fn page_type(&self) -> Option<&str>;
    fn url(&self) -> Option<&str>;
    fn images(&self) -> &[MarkupImage];
    fn description(&self) -> Option<&str>;
    fn publisher(&self) -> Option<&str>;
    fn copyright(&self) -> Option<&str>;
    fn author(&self) -> Option<String>;
    fn article(&self) -> Option<MarkupArticle>;
    /// Whether the page asks not to be distilled.
    fn opt_out(&self) -> bool;
}

/// All markup accessors of a page, in priority order.
#[derive(Default)]
pub struct MarkupParser {
    accessors: Vec<Box<dyn MarkupAccessor>>,
}

impl MarkupParser {
    /// Reads every supported markup format under `root`.
    #[must_use]
    pub fn new(root: &NodeRef, timing: &mut TimingInfo) -> Self {
        let mut parser = Self::default();

        let start = Instant::now();
        if let Some(og) = OpenGraphMarkup::parse(root) {
            parser.accessors.push(Box::new(og));
        }
        timing.add_entry(start, "OpenGraphProtocolParser");

        debug!(accessors = parser.accessors.len(), "markup parsed");
        parser
    }

    /// Parser over the given accessors.
    #[must_use]
    pub fn with_accessors(accessors: Vec<Box<dyn MarkupAccessor>>) -> Self {
        Self { accessors }
    }

    fn first<'s, T>(&'s self, f: impl Fn(&'s dyn MarkupAccessor) -> Option<T>) -> Option<T> {
        self.accessors.iter().find_map(|a| f(a.as_ref()))
    }

    /// Collected metadata, empty when any accessor opts out.
    #[must_use]
    pub fn markup_info(&self) -> MarkupInfo {
        if self.opt_out() {
            return MarkupInfo::default();
        }

        let owned = |s: Option<&str>| s.unwrap_or_default().to_string();
        MarkupInfo {
            title: owned(self.title()),
            page_type: owned(self.page_type()),
            url: owned(self.url()),
            description: owned(self.description()),
            publisher: owned(self.publisher()),
            copyright: owned(self.copyright()),
            author: self.author().unwrap_or_default(),
            article: self.article().unwrap_or_default(),
            images: self.images().to_vec(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl MarkupAccessor for MarkupParser {
    fn title(&self) -> Option<&str> {
        self.first(|a| a.title().and_then(non_empty))
    }

    fn page_type(&self) -> Option<&str> {
        self.first(|a| a.page_type().and_then(non_empty))
    }

    fn url(&self) -> Option<&str> {
        self.first(|a| a.url().and_then(non_empty))
    }

    fn images(&self) -> &[MarkupImage] {
        self.first(|a| Some(a.images()).filter(|images| !images.is_empty()))
            .unwrap_or_default()
    }

    fn description(&self) -> Option<&str> {
        self.first(|a| a.description().and_then(non_empty))
    }

    fn publisher(&self) -> Option<&str> {
        self.first(|a| a.publisher().and_then(non_empty))
    }

    fn copyright(&self) -> Option<&str> {
        self.first(|a| a.copyright().and_then(non_empty))
    }

    fn author(&self) -> Option<String> {
        self.first(|a| a.author().filter(|s| !s.is_empty()))
    }

    fn article(&self) -> Option<MarkupArticle> {
        self.first(|a| a.article())
    }

    fn opt_out(&self) -> bool {
        self.accessors.iter().any(|a| a.opt_out())
    }
}
