//! OpenGraph protocol metadata.
//!
//! Reads `og:*` properties plus the `profile:*` and `article:*` objects.
//! Pages may rename the prefixes through a `prefix` attribute on `<html>` or
//! `<head>` (`"tstog: http://ogp.me/ns#"`), or through `xmlns:<prefix>`
//! attributes on the root. A renamed prefix replaces the default one.

use std::collections::HashMap;

use tracing::debug;

use crate::dom::{self, NodeRef};
use crate::patterns::{OGP_NS_PREFIX, OGP_NS_XMLNS_NAME, OGP_NS_XMLNS_VALUE};
use crate::result::{MarkupArticle, MarkupImage};

use super::MarkupAccessor;

const TITLE: &str = "title";
const TYPE: &str = "type";
const URL: &str = "url";
const DESCRIPTION: &str = "description";
const SITE_NAME: &str = "site_name";
const IMAGE: &str = "image";
const FIRST_NAME: &str = "first_name";
const LAST_NAME: &str = "last_name";
const SECTION: &str = "section";
const PUBLISHED_TIME: &str = "published_time";
const MODIFIED_TIME: &str = "modified_time";
const EXPIRATION_TIME: &str = "expiration_time";
const AUTHOR: &str = "author";

const PROFILE_OBJECT: &str = "profile";
const ARTICLE_OBJECT: &str = "article";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Og,
    Profile,
    Article,
}

/// Properties read from the page; anything else is ignored. `image` also
/// covers the `image:*` structure.
const PROPERTIES: &[(&str, Namespace)] = &[
    (TITLE, Namespace::Og),
    (TYPE, Namespace::Og),
    (URL, Namespace::Og),
    (DESCRIPTION, Namespace::Og),
    (SITE_NAME, Namespace::Og),
    (IMAGE, Namespace::Og),
    (FIRST_NAME, Namespace::Profile),
    (LAST_NAME, Namespace::Profile),
    (SECTION, Namespace::Article),
    (PUBLISHED_TIME, Namespace::Article),
    (MODIFIED_TIME, Namespace::Article),
    (EXPIRATION_TIME, Namespace::Article),
    (AUTHOR, Namespace::Article),
];

/// Prefix in use for each namespace.
#[derive(Debug, Default)]
struct Prefixes {
    og: Option<String>,
    profile: Option<String>,
    article: Option<String>,
}

impl Prefixes {
    /// Registers `prefix` for the object type named by a namespace URL
    /// suffix (`""`, `"/profile"`, `"/article"`).
    fn add(&mut self, prefix: &str, object_type: &str) {
        let slot = match object_type.trim_start_matches('/') {
            "" => &mut self.og,
            PROFILE_OBJECT => &mut self.profile,
            ARTICLE_OBJECT => &mut self.article,
            _ => return,
        };
        *slot = Some(prefix.to_lowercase());
    }

    fn get(&self, namespace: Namespace) -> &str {
        match namespace {
            Namespace::Og => self.og.as_deref().unwrap_or("og"),
            Namespace::Profile => self.profile.as_deref().unwrap_or(PROFILE_OBJECT),
            Namespace::Article => self.article.as_deref().unwrap_or(ARTICLE_OBJECT),
        }
    }

    fn find(root: &NodeRef) -> Self {
        let mut prefixes = Self::default();

        let mut declared = if root.has_name("html") {
            dom::attribute_or_empty(root, "prefix")
        } else {
            String::new()
        };
        if declared.is_empty() {
            if let Some(head) = dom::first_element_by_tag_name(root, "head") {
                declared = dom::attribute_or_empty(&head, "prefix");
            }
        }

        if declared.is_empty() {
            for attr in root.attrs() {
                let name = attr.name.local.to_lowercase();
                let Some(prefix) = OGP_NS_XMLNS_NAME.captures(&name).and_then(|c| c.get(1)) else {
                    continue;
                };
                if let Some(value) = OGP_NS_XMLNS_VALUE.captures(&attr.value) {
                    let object_type = value.get(1).map_or("", |m| m.as_str());
                    prefixes.add(prefix.as_str(), object_type);
                }
            }
        } else {
            for caps in OGP_NS_PREFIX.captures_iter(&declared) {
                let Some(prefix) = caps.get(2) else { continue };
                let object_type = caps.get(4).map_or("", |m| m.as_str());
                prefixes.add(prefix.as_str(), object_type);
            }
        }

        prefixes
    }
}

/// Image structure under construction. `root` is the `og:image` value that
/// opened it; images without one are dropped.
#[derive(Debug, Default)]
struct PendingImage {
    root: String,
    image: MarkupImage,
}

/// OpenGraph metadata of a page.
#[derive(Debug)]
pub struct OpenGraphMarkup {
    properties: HashMap<&'static str, String>,
    images: Vec<MarkupImage>,
    is_profile: bool,
    authors: Vec<String>,
}

impl OpenGraphMarkup {
    /// Reads the OpenGraph properties under `root`, the `<html>` element.
    ///
    /// Returns `None` unless the required `title`, `type`, `url` and
    /// `image` properties are all present.
    #[must_use]
    pub fn parse(root: &NodeRef) -> Option<Self> {
        let prefixes = Prefixes::find(root);

        let mut properties: HashMap<&'static str, String> = HashMap::new();
        let mut pending: Vec<PendingImage> = Vec::new();
        let mut authors = Vec::new();
        let mut profile_checked: Option<bool> = None;
        let mut is_article = false;

        for meta in dom::elements_by_tag_name(root, "meta") {
            let Some(property) = dom::get_attribute(&meta, "property") else {
                continue;
            };
            let property = property.to_lowercase();
            let content = dom::attribute_or_empty(&meta, "content");

            let matched = PROPERTIES.iter().find_map(|&(name, namespace)| {
                let local = property.strip_prefix(prefixes.get(namespace))?.strip_prefix(':')?;
                local.starts_with(name).then_some((name, namespace, local))
            });
            let Some((name, namespace, local)) = matched else {
                continue;
            };

            let keep = match namespace {
                Namespace::Og if name == IMAGE => {
                    parse_image_property(&mut pending, local, &content);
                    false
                }
                Namespace::Og => true,
                // The page type is checked once, at the first profile property.
                Namespace::Profile => *profile_checked.get_or_insert_with(|| {
                    properties.get(TYPE).is_some_and(|t| t.to_lowercase() == PROFILE_OBJECT)
                }),
                Namespace::Article => {
                    is_article = is_article
                        || properties.get(TYPE).is_some_and(|t| t.to_lowercase() == ARTICLE_OBJECT);
                    if is_article && local == AUTHOR {
                        authors.push(content.clone());
                        false
                    } else {
                        is_article
                    }
                }
            };
            if keep {
                properties.insert(name, content);
            }
        }

        let images: Vec<MarkupImage> = pending
            .into_iter()
            .filter(|p| !p.root.is_empty())
            .map(|PendingImage { root, mut image }| {
                if image.url.is_empty() {
                    image.url = root;
                }
                image
            })
            .collect();

        let og = prefixes.get(Namespace::Og);
        for required in [TITLE, TYPE, URL] {
            if properties.get(required).is_none_or(String::is_empty) {
                debug!(property = %format!("{og}:{required}"), "required opengraph property missing");
                return None;
            }
        }
        if images.is_empty() {
            debug!(property = %format!("{og}:{IMAGE}"), "required opengraph property missing");
            return None;
        }

        Some(Self {
            properties,
            images,
            is_profile: profile_checked.unwrap_or(false),
            authors,
        })
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// `image` opens a new image; `image:*` fills in the latest one.
fn parse_image_property(pending: &mut Vec<PendingImage>, property: &str, content: &str) {
    if property == IMAGE {
        pending.push(PendingImage {
            root: content.to_string(),
            image: MarkupImage::default(),
        });
        return;
    }

    let Some(field) = property.strip_prefix("image:") else {
        return;
    };
    if !matches!(field, "url" | "secure_url" | "type" | "width" | "height") {
        return;
    }
    if pending.is_empty() {
        pending.push(PendingImage::default());
    }
    let Some(current) = pending.last_mut() else {
        return;
    };

    let image = &mut current.image;
    match field {
        "url" => image.url = content.to_string(),
        "secure_url" => image.secure_url = content.to_string(),
        "type" => image.image_type = content.to_string(),
        "width" => image.width = content.trim().parse().unwrap_or(0),
        "height" => image.height = content.trim().parse().unwrap_or(0),
        _ => {}
    }
}

impl MarkupAccessor for OpenGraphMarkup {
    fn title(&self) -> Option<&str> {
        self.property(TITLE)
    }

    fn page_type(&self) -> Option<&str> {
        self.property(TYPE)
            .filter(|t| t.eq_ignore_ascii_case(ARTICLE_OBJECT))
            .map(|_| "Article")
    }

    fn url(&self) -> Option<&str> {
        self.property(URL)
    }

    fn images(&self) -> &[MarkupImage] {
        &self.images
    }

    fn description(&self) -> Option<&str> {
        self.property(DESCRIPTION)
    }

    fn publisher(&self) -> Option<&str> {
        self.property(SITE_NAME)
    }

    fn copyright(&self) -> Option<&str> {
        None
    }

    fn author(&self) -> Option<String> {
        if !self.is_profile {
            return None;
        }
        let first = self.property(FIRST_NAME).unwrap_or_default();
        let last = self.property(LAST_NAME).unwrap_or_default();
        let name = if first.is_empty() || last.is_empty() {
            first.to_string()
        } else {
            format!("{first} {last}")
        };
        (!name.is_empty()).then_some(name)
    }

    fn article(&self) -> Option<MarkupArticle> {
        let text = |name| self.property(name).unwrap_or_default().to_string();
        let article = MarkupArticle {
            published_time: text(PUBLISHED_TIME),
            modified_time: text(MODIFIED_TIME),
            expiration_time: text(EXPIRATION_TIME),
            section: text(SECTION),
            authors: self.authors.clone(),
        };
        (!article.is_empty()).then_some(article)
    }

    fn opt_out(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &str = r#"
        <meta property="og:title" content="dummy title">
        <meta property="og:type" content="website">
        <meta property="og:url" content="http://dummy/url.html">
        <meta property="og:image" content="http://dummy/image.jpeg">"#;

    const CUSTOM_REQUIRED: &str = r#"
        <meta property="tstog:title" content="dummy title">
        <meta property="tstog:type" content="website">
        <meta property="tstog:url" content="http://dummy/url.html">
        <meta property="tstog:image" content="http://dummy/image.jpeg">"#;

    fn parse_page(html_attrs: &str, head_attrs: &str, metas: &str) -> Option<OpenGraphMarkup> {
        let html = format!("<html {html_attrs}><head {head_attrs}>{metas}</head><body></body></html>");
        let doc = dom::parse(&html);
        let root = doc.select("html").nodes()[0];
        OpenGraphMarkup::parse(&root)
    }

    #[test]
    fn test_required_properties_and_description_and_site_name() {
        let metas = format!(
            r#"{REQUIRED}
            <meta property="og:description" content="This tests the description">
            <meta property="og:site_name" content="Google">"#
        );
        let og = parse_page("", "", &metas).expect("required properties present");
        assert_eq!(og.title(), Some("dummy title"));
        assert_eq!(og.page_type(), None);
        assert_eq!(og.url(), Some("http://dummy/url.html"));
        assert_eq!(og.description(), Some("This tests the description"));
        assert_eq!(og.publisher(), Some("Google"));
        assert_eq!(og.copyright(), None);
        assert!(!og.opt_out());

        let images = og.images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url, "http://dummy/image.jpeg");
        assert_eq!(images[0].secure_url, "");
        assert_eq!(images[0].width, 0);
    }

    #[test]
    fn test_missing_required_property() {
        let without_url = REQUIRED.replace("og:url", "og:other");
        assert!(parse_page("", "", &without_url).is_none());

        // An image structure without its opening og:image is not an image.
        let without_image = REQUIRED.replace(
            r#"property="og:image""#,
            r#"property="og:image:url""#,
        );
        assert!(parse_page("", "", &without_image).is_none());
    }

    #[test]
    fn test_image_structures() {
        let metas = r#"
            <meta property="og:title" content="t">
            <meta property="og:type" content="website">
            <meta property="og:url" content="http://test/url.html">
            <meta property="og:image" content="http://test/image1.jpeg">
            <meta property="og:image:secure_url" content="https://test/image1.jpeg">
            <meta property="og:image:type" content="image/jpeg">
            <meta property="og:image" content="http://test/image2.jpeg">
            <meta property="og:image:url" content="http://test/image2-full.jpeg">
            <meta property="og:image:width" content="600">
            <meta property="og:image:height" content="400">
            <meta property="og:image:height" content="tall">"#;
        let og = parse_page("", "", metas).expect("required properties present");
        let images = og.images();
        assert_eq!(images.len(), 2);

        assert_eq!(images[0].url, "http://test/image1.jpeg");
        assert_eq!(images[0].secure_url, "https://test/image1.jpeg");
        assert_eq!(images[0].image_type, "image/jpeg");
        assert_eq!((images[0].width, images[0].height), (0, 0));

        assert_eq!(images[1].url, "http://test/image2-full.jpeg");
        assert_eq!(images[1].secure_url, "");
        assert_eq!(images[1].width, 600);
        assert_eq!(images[1].height, 0);
    }

    #[test]
    fn test_no_objects() {
        let og = parse_page("", "", REQUIRED).expect("required properties present");
        assert_eq!(og.author(), None);
        assert_eq!(og.article(), None);
    }

    #[test]
    fn test_profile() {
        let metas = format!(
            r#"{}
            <meta property="profile:first_name" content="Jane">
            <meta property="profile:last_name" content="Doe">"#,
            REQUIRED.replace(r#"content="website""#, r#"content="profile""#)
        );
        let og = parse_page("", "", &metas).expect("required properties present");
        assert_eq!(og.author(), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_profile_ignored_for_other_types() {
        let metas = format!(r#"{REQUIRED}<meta property="profile:first_name" content="Jane">"#);
        let og = parse_page("", "", &metas).expect("required properties present");
        assert_eq!(og.author(), None);
    }

    #[test]
    fn test_article() {
        let metas = format!(
            r#"{}
            <meta property="article:section" content="GWT Testing">
            <meta property="article:published_time" content="2014-04-01T01:23:59Z">
            <meta property="article:modified_time" content="2014-04-02T02:23:59Z">
            <meta property="article:expiration_time" content="2014-04-03T03:23:59Z">
            <meta property="article:author" content="http://blah/author1.html">
            <meta property="article:author" content="http://blah/author2.html">"#,
            REQUIRED.replace(r#"content="website""#, r#"content="Article""#)
        );
        let og = parse_page("", "", &metas).expect("required properties present");
        assert_eq!(og.page_type(), Some("Article"));

        let article = og.article().unwrap_or_default();
        assert_eq!(article.section, "GWT Testing");
        assert_eq!(article.published_time, "2014-04-01T01:23:59Z");
        assert_eq!(article.modified_time, "2014-04-02T02:23:59Z");
        assert_eq!(article.expiration_time, "2014-04-03T03:23:59Z");
        assert_eq!(
            article.authors,
            vec!["http://blah/author1.html".to_string(), "http://blah/author2.html".to_string()]
        );
    }

    #[test]
    fn test_prefixes_in_html_tag() {
        let metas = format!(
            r#"{}
            <meta property="tstpf:first_name" content="Jane">
            <meta property="tstpf:last_name" content="Doe">"#,
            CUSTOM_REQUIRED.replace(r#"content="website""#, r#"content="profile""#)
        );
        let og = parse_page(
            r#"prefix="tstog: http://ogp.me/ns# tstpf: http://ogp.me/ns/profile#""#,
            "",
            &metas,
        )
        .expect("required properties present");
        assert_eq!(og.title(), Some("dummy title"));
        assert_eq!(og.author(), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_article_prefix_in_head_tag() {
        let metas = format!(
            r#"{}<meta property="tsta:section" content="GWT Testing">"#,
            CUSTOM_REQUIRED.replace(r#"content="website""#, r#"content="article""#)
        );
        let og = parse_page(
            "",
            r#"prefix="tstog: http://ogp.me/ns# tsta: http://ogp.me/ns/article#""#,
            &metas,
        )
        .expect("required properties present");
        assert_eq!(og.page_type(), Some("Article"));
        assert_eq!(og.article().map(|a| a.section), Some("GWT Testing".to_string()));
    }

    #[test]
    fn test_declared_prefix_replaces_default() {
        let metas = format!(
            r#"{CUSTOM_REQUIRED}<meta property="og:description" content="this description should be ignored">"#
        );
        let og = parse_page(r#"prefix="tstog: http://ogp.me/ns#""#, "", &metas)
            .expect("required properties present");
        assert_eq!(og.description(), None);

        // Without the declaration the custom prefix means nothing.
        assert!(parse_page("", "", CUSTOM_REQUIRED).is_none());
    }

    #[test]
    fn test_xmlns_prefixes() {
        let metas = format!(
            r#"{}
            <meta property="tsta:author" content="http://blah/author1.html">
            <meta property="og:description" content="this description should be ignored">"#,
            CUSTOM_REQUIRED.replace(r#"content="website""#, r#"content="article""#)
        );
        let og = parse_page(
            r#"xmlns:tstog="http://ogp.me/ns#" xmlns:tsta="http://ogp.me/ns/article#""#,
            "",
            &metas,
        )
        .expect("required properties present");
        assert_eq!(og.page_type(), Some("Article"));
        assert_eq!(og.description(), None);
        assert_eq!(
            og.article().map(|a| a.authors),
            Some(vec!["http://blah/author1.html".to_string()])
        );
    }
}
