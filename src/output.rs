//! Cloned output subtrees.
//!
//! Output is never produced from the parsed document directly. The nodes an
//! element needs are cloned into a small owned tree, sanitized, and then
//! serialized to HTML or inner text.

use std::collections::HashSet;
use std::fmt::Write as _;

use url::Url;

use crate::dom::{self, NodeId, NodeRef};
use crate::patterns::{LINE_BREAK, LINE_BREAK_MARKER, PUNCTUATION_SPACING, SRCSET_URL};
use crate::url_utils::create_absolute_url;

/// Attributes that survive sanitizing.
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "abbr", "align", "alt", "cite", "colspan", "controls", "datetime", "default", "dir",
    "headers", "height", "href", "kind", "label", "lang", "loop", "media", "muted", "poster",
    "preload", "reversed", "rowspan", "scope", "sizes", "span", "src", "srclang", "srcset",
    "start", "summary", "title", "type", "valign", "value", "width",
];

/// Attributes kept on `img` elements.
const IMAGE_ATTRIBUTES: &[&str] = &["src", "alt", "srcset", "dir", "width", "height", "title"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes"];

/// A node of a cloned output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
    Element(OutputElement),
    Text(String),
}

/// An element of a cloned output tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<OutputNode>,
}

impl OutputNode {
    /// Clone a single node without its children. Comments and other node kinds yield `None`.
    #[must_use]
    pub fn shallow_clone(node: &NodeRef) -> Option<Self> {
        if node.is_text() {
            return Some(Self::Text(dom::text_content(node)));
        }
        if !node.is_element() {
            return None;
        }
        let attrs = node
            .attrs()
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect();
        Some(Self::Element(OutputElement {
            name: dom::tag_name(node),
            attrs,
            children: Vec::new(),
        }))
    }

    /// Clone a node with its whole subtree.
    #[must_use]
    pub fn deep_clone(node: &NodeRef) -> Option<Self> {
        let mut clone = Self::shallow_clone(node)?;
        if let Self::Element(element) = &mut clone {
            element.children = node
                .children()
                .iter()
                .filter_map(Self::deep_clone)
                .collect();
        }
        Some(clone)
    }

    /// Clone the minimal tree that contains every node in `nodes`.
    ///
    /// The clone is rooted at the nodes' nearest common ancestor and only keeps
    /// the branches that lead to one of them. Children of the listed nodes are
    /// dropped unless they are listed too.
    #[must_use]
    pub fn tree_clone(nodes: &[NodeRef]) -> Option<Self> {
        let root = dom::nearest_common_ancestor(nodes)?;
        let keep = dom::ancestor_set(nodes);
        Self::clone_kept(&root, &keep)
    }

    fn clone_kept(node: &NodeRef, keep: &HashSet<NodeId>) -> Option<Self> {
        let mut clone = Self::shallow_clone(node)?;
        if let Self::Element(element) = &mut clone {
            element.children = node
                .children()
                .iter()
                .filter(|child| keep.contains(&child.id))
                .filter_map(|child| Self::clone_kept(child, keep))
                .collect();
        }
        Some(clone)
    }

    #[must_use]
    pub fn into_element(self) -> Option<OutputElement> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }

    /// Serialized HTML of this node.
    #[must_use]
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    /// Text with hidden children skipped, `<br>` as newline and whitespace collapsed.
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);

        let collapsed = buffer.split_whitespace().collect::<Vec<_>>().join(" ");
        let spaced = PUNCTUATION_SPACING.replace_all(&collapsed, "$1 $2");
        LINE_BREAK.replace_all(&spaced, "\n").into_owned()
    }

    fn collect_text(&self, buffer: &mut String) {
        match self {
            Self::Text(text) => {
                buffer.push(' ');
                buffer.push_str(text);
                buffer.push(' ');
            }
            Self::Element(element) => {
                if element.name == "br" {
                    buffer.push_str(LINE_BREAK_MARKER);
                    return;
                }
                if element.has_attr("hidden")
                    || element.attr("style").is_some_and(dom::style_hides)
                {
                    return;
                }
                for child in &element.children {
                    child.collect_text(buffer);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String, raw: bool) {
        match self {
            Self::Text(text) if raw => out.push_str(text),
            Self::Text(text) => escape_into(out, text, false),
            Self::Element(element) => element.write_html(out),
        }
    }
}

impl OutputElement {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn push(&mut self, child: OutputNode) {
        self.children.push(child);
    }

    /// Calls `f` on this element and every descendant element, parents first.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut OutputElement)) {
        f(self);
        for child in &mut self.children {
            if let OutputNode::Element(e) = child {
                e.for_each_element_mut(f);
            }
        }
    }

    /// This element and every descendant element, parents first.
    #[must_use]
    pub fn elements(&self) -> Vec<&OutputElement> {
        let mut result = vec![self];
        for child in &self.children {
            if let OutputNode::Element(e) = child {
                result.extend(e.elements());
            }
        }
        result
    }

    /// First element (self included) with the given tag.
    pub fn first_element_mut(&mut self, tag: &str) -> Option<&mut OutputElement> {
        if self.name == tag {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            OutputNode::Element(e) => e.first_element_mut(tag),
            OutputNode::Text(_) => None,
        })
    }

    #[must_use]
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    #[must_use]
    pub fn inner_html(&self) -> String {
        let raw = RAW_TEXT_ELEMENTS.contains(&self.name.as_str());
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out, raw);
        }
        out
    }

    #[must_use]
    pub fn inner_text(&self) -> String {
        OutputNode::Element(self.clone()).inner_text()
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, " {key}=\"");
            escape_into(out, value, true);
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.name.as_str()) {
            return;
        }
        out.push_str(&self.inner_html());
        let _ = write!(out, "</{}>", self.name);
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&#34;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

// === Sanitizing ===

/// Clone a whole subtree and sanitize it for output.
#[must_use]
pub fn clone_and_process_tree(root: &NodeRef, page_url: Option<&Url>) -> Option<OutputElement> {
    let mut root = OutputNode::deep_clone(root)?.into_element()?;
    process_for_output(&mut root, page_url);
    Some(root)
}

/// Absolute links, no ids, no presentational or unsafe attributes.
pub fn process_for_output(root: &mut OutputElement, page_url: Option<&Url>) {
    make_all_links_absolute(root, page_url);
    root.for_each_element_mut(&mut |e| {
        if e.name == "img" {
            e.attrs.retain(|(k, _)| IMAGE_ATTRIBUTES.contains(&k.as_str()));
        }
    });
    strip_attributes(root);
}

/// Drops every attribute outside the allowlist.
pub fn strip_attributes(root: &mut OutputElement) {
    root.for_each_element_mut(&mut |e| {
        e.attrs.retain(|(k, _)| ALLOWED_ATTRIBUTES.contains(&k.as_str()));
    });
}

/// Resolves `href`, `poster`, `src` and `srcset` against the page URL.
pub fn make_all_links_absolute(root: &mut OutputElement, page_url: Option<&Url>) {
    root.for_each_element_mut(&mut |e| {
        let attr = match e.name.as_str() {
            "a" => Some("href"),
            "video" => Some("poster"),
            _ => None,
        };
        if let Some(attr) = attr {
            absolutize_attr(e, attr, page_url);
        }
    });
    make_all_src_attributes_absolute(root, page_url);
    make_all_srcset_absolute(root, page_url);
}

/// Resolves `src` of `img`, `source`, `track` and `video` elements.
pub fn make_all_src_attributes_absolute(root: &mut OutputElement, page_url: Option<&Url>) {
    root.for_each_element_mut(&mut |e| {
        if matches!(e.name.as_str(), "img" | "source" | "track" | "video") {
            absolutize_attr(e, "src", page_url);
        }
    });
}

/// Resolves every URL of every `srcset`; empty `srcset` attributes are removed.
pub fn make_all_srcset_absolute(root: &mut OutputElement, page_url: Option<&Url>) {
    root.for_each_element_mut(&mut |e| {
        let Some(srcset) = e.attr("srcset").map(str::to_string) else {
            return;
        };
        if srcset.is_empty() {
            e.remove_attr("srcset");
            return;
        }
        let resolved = SRCSET_URL.replace_all(&srcset, |caps: &regex::Captures| {
            let url = caps.get(1).map_or("", |m| m.as_str());
            let descriptor = caps.get(2).map_or("", |m| m.as_str());
            let separator = caps.get(3).map_or("", |m| m.as_str());
            format!("{}{descriptor}{separator}", create_absolute_url(url, page_url))
        });
        e.set_attr("srcset", &resolved);
    });
}

fn absolutize_attr(e: &mut OutputElement, attr: &str, page_url: Option<&Url>) {
    if let Some(value) = e.attr(attr).filter(|v| !v.is_empty()) {
        let absolute = create_absolute_url(value, page_url);
        e.set_attr(attr, &absolute);
    }
}

/// URLs listed in the element's own `srcset`.
#[must_use]
pub fn srcset_urls(element: &OutputElement) -> Vec<String> {
    element
        .attr("srcset")
        .map(|srcset| {
            SRCSET_URL
                .captures_iter(srcset)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// URLs of every `srcset` in the tree, root included.
#[must_use]
pub fn all_srcset_urls(root: &OutputElement) -> Vec<String> {
    root.elements().into_iter().flat_map(srcset_urls).collect()
}
