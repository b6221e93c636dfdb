//! DOM Operations Adapter
//!
//! Read-only helpers over `dom_query` node handles. The parsed document is
//! the node arena: every walk here chases `NodeId` handles through the tree,
//! nothing is ever mutated.

use std::collections::HashSet;

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef};
pub use tendril::StrTendril;

use crate::output::OutputNode;
use crate::patterns::{DISPLAY_NONE, DISPLAY_STYLE, VISIBILITY_HIDDEN};

// === Attribute Operations ===

/// Attribute value as stored by the parser, without copying
#[inline]
#[must_use]
pub fn attr_tendril(node: &NodeRef, name: &str) -> Option<StrTendril> {
    node.attr(name)
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    attr_tendril(node, name).map(|s| s.to_string())
}

/// Get an attribute value, empty when missing
#[inline]
#[must_use]
pub fn attribute_or_empty(node: &NodeRef, name: &str) -> String {
    get_attribute(node, name).unwrap_or_default()
}

/// Check if attribute exists
#[inline]
#[must_use]
pub fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.has_attr(name)
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    attribute_or_empty(node, "class")
}

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> String {
    attribute_or_empty(node, "id")
}

// === Tag/Node Information ===

/// Get tag name (lowercase), empty for non-element nodes
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Text content of a text node, or of all descendant text nodes
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> String {
    node.text().to_string()
}

/// Rendered-ish text of a subtree: hidden children skipped, `<br>` kept as newline.
#[must_use]
pub fn inner_text(node: &NodeRef) -> String {
    OutputNode::deep_clone(node)
        .map(|n| n.inner_text())
        .unwrap_or_default()
}

// === Tree Navigation ===

/// Nearest ancestor that is an element
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_element() {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// The node itself followed by all of its ancestors
#[must_use]
pub fn parent_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut result = vec![*node];
    result.extend(node.ancestors(None));
    result
}

/// Depth of the node in its tree (the document node has depth 0)
#[must_use]
pub fn node_depth(node: &NodeRef) -> usize {
    node.ancestors(None).len()
}

/// Whether `node` is `ancestor` or one of its descendants
#[must_use]
pub fn contains(ancestor: &NodeRef, node: &NodeRef) -> bool {
    node.id == ancestor.id || node.ancestors_it(None).any(|a| a.id == ancestor.id)
}

/// Nearest node that is an ancestor-or-self of every node in `nodes`
#[must_use]
pub fn nearest_common_ancestor<'a>(nodes: &[NodeRef<'a>]) -> Option<NodeRef<'a>> {
    let (first, rest) = nodes.split_first()?;
    let mut candidates = parent_nodes(first);
    for node in rest {
        let chain: HashSet<NodeId> = parent_nodes(node).iter().map(|n| n.id).collect();
        candidates.retain(|c| chain.contains(&c.id));
    }
    candidates.into_iter().next()
}

/// Ids of every node in `nodes` plus all of their ancestors
#[must_use]
pub fn ancestor_set(nodes: &[NodeRef]) -> HashSet<NodeId> {
    let mut set = HashSet::new();
    for node in nodes {
        set.insert(node.id);
        for ancestor in node.ancestors_it(None) {
            if !set.insert(ancestor.id) {
                break;
            }
        }
    }
    set
}

/// Descendant elements with the given tag, in document order (root excluded)
#[must_use]
pub fn elements_by_tag_name<'a>(root: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    root.descendants_it()
        .filter(|n| n.has_name(tag))
        .collect()
}

/// First descendant element with the given tag (root excluded)
#[must_use]
pub fn first_element_by_tag_name<'a>(root: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    root.descendants_it().find(|n| n.has_name(tag))
}

/// Whether the node or any ancestor element has the given tag
#[must_use]
pub fn has_ancestor_or_self(node: &NodeRef, tag: &str) -> bool {
    node.has_name(tag) || node.ancestors_it(None).any(|a| a.has_name(tag))
}

// === Style Approximation ===

/// Display value for a tag: inline `style` wins, otherwise the tag's default.
#[must_use]
pub fn display_style_of(tag: &str, style: Option<&str>) -> String {
    if let Some(value) = style
        .and_then(|s| DISPLAY_STYLE.captures(s))
        .and_then(|c| c.get(1))
    {
        return value.as_str().to_string();
    }

    let display = match tag {
        "address" | "article" | "blockquote" | "body" | "dd" | "details" | "dialog" | "div"
        | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form" | "h1" | "h2"
        | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "html" | "legend" | "main" | "nav"
        | "ol" | "p" | "pre" | "section" | "ul" => "block",
        "a" | "abbr" | "acronym" | "audio" | "b" | "bdi" | "bdo" | "br" | "canvas" | "circle"
        | "cite" | "code" | "data" | "defs" | "del" | "dfn" | "ellipse" | "em" | "embed"
        | "font" | "i" | "iframe" | "img" | "ins" | "kbd" | "label" | "lineargradient"
        | "mark" | "object" | "output" | "picture" | "polygon" | "q" | "rect" | "s"
        | "source" | "span" | "stop" | "strong" | "sub" | "sup" | "svg" | "tt" | "text"
        | "time" | "track" | "u" | "var" | "video" | "wbr" => "inline",
        "button" | "input" => "inline-block",
        "li" | "summary" => "list-item",
        "ruby" => "ruby",
        "rt" => "ruby-text",
        "table" => "table",
        "caption" => "table-caption",
        "td" | "th" => "table-cell",
        "col" => "table-column",
        "colgroup" => "table-column-group",
        "tfoot" => "table-footer-group",
        "thead" => "table-header-group",
        "tr" => "table-row",
        "tbody" => "table-row-group",
        _ => "none",
    };
    display.to_string()
}

/// Display value of an element node
#[must_use]
pub fn display_style(node: &NodeRef) -> String {
    let style = node.attr("style");
    display_style_of(&tag_name(node), style.as_deref())
}

/// Whether an inline style hides the element
#[must_use]
pub fn style_hides(style: &str) -> bool {
    DISPLAY_NONE.is_match(style) || VISIBILITY_HIDDEN.is_match(style)
}

/// Visibility approximated from markup: the `hidden` attribute and inline style.
#[must_use]
pub fn is_probably_visible(node: &NodeRef) -> bool {
    if node.has_attr("hidden") {
        return false;
    }
    !node.attr("style").is_some_and(|s| style_hides(&s))
}

/// Parse an HTML string into a document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
