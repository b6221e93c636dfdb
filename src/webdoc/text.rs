//! Text runs.

use url::Url;

use crate::dom::{self, NodeRef};
use crate::label::{Label, LabelSet};
use crate::output::{make_all_links_absolute, strip_attributes, OutputElement, OutputNode};

use super::can_be_nested;

/// A run of text between two flush points, with the nodes it came from.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    pub text: String,
    pub num_words: usize,
    /// Words inside anchors. Never more than `num_words`.
    pub num_linked_words: usize,
    pub labels: LabelSet,
    /// Nesting depth when the run started.
    pub tag_level: i32,
    /// Position among all texts of the document.
    pub offset_block: usize,
    /// Contiguous-run id used to regroup texts into blocks.
    pub group_number: usize,
    /// Text nodes and `<br>` elements of the run, in document order.
    pub text_nodes: Vec<NodeRef<'a>>,
    first_word_node: usize,
    last_word_node: usize,
    page_url: Option<Url>,
    is_content: bool,
}

impl<'a> Text<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        text: String,
        text_nodes: Vec<NodeRef<'a>>,
        first_word_node: usize,
        last_word_node: usize,
        num_words: usize,
        num_linked_words: usize,
        tag_level: i32,
        offset_block: usize,
        page_url: Option<Url>,
    ) -> Self {
        debug_assert!(num_linked_words <= num_words);
        debug_assert!(first_word_node <= last_word_node && last_word_node < text_nodes.len());
        Self {
            text,
            num_words,
            num_linked_words,
            labels: LabelSet::new(),
            tag_level,
            offset_block,
            group_number: 0,
            text_nodes,
            first_word_node,
            last_word_node,
            page_url,
            is_content: false,
        }
    }

    #[must_use]
    pub fn is_content(&self) -> bool {
        self.is_content
    }

    pub fn set_is_content(&mut self, is_content: bool) {
        self.is_content = is_content;
    }

    #[must_use]
    pub fn first_non_whitespace_text_node(&self) -> NodeRef<'a> {
        self.text_nodes[self.first_word_node]
    }

    #[must_use]
    pub fn last_non_whitespace_text_node(&self) -> NodeRef<'a> {
        self.text_nodes[self.last_word_node]
    }

    /// Moves the labels out, leaving the text unlabelled.
    pub fn take_labels(&mut self) -> LabelSet {
        std::mem::take(&mut self.labels)
    }

    /// Output for the run: the minimal subtree holding its nodes, widened until
    /// the root is not an inline element.
    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        if self.labels.contains(Label::Title) {
            return String::new();
        }
        let Some(mut root) = self.cloned_root() else {
            return String::new();
        };

        make_all_links_absolute(&mut root, self.page_url.as_ref());
        strip_attributes(&mut root);

        if text_only {
            root.inner_text()
        } else if can_be_nested(&root.name) {
            // The enclosing Tag markers already emit this element.
            root.inner_html()
        } else {
            root.outer_html()
        }
    }

    fn cloned_root(&self) -> Option<OutputElement> {
        let nodes = &self.text_nodes;
        let mut root = match OutputNode::tree_clone(nodes)? {
            OutputNode::Element(element) => element,
            text @ OutputNode::Text(_) => {
                let mut parent = nodes[0]
                    .parent()
                    .as_ref()
                    .and_then(OutputNode::shallow_clone)
                    .and_then(OutputNode::into_element)
                    .unwrap_or_else(|| OutputElement::new("div"));
                parent.push(text);
                parent
            }
        };

        if root.name == "body" {
            root.name = "div".to_string();
            root.attrs.clear();
        }

        let mut src_root: Option<NodeRef> = None;
        while dom::display_style_of(&root.name, root.attr("style")) == "inline" {
            let current = match src_root {
                Some(node) => node,
                None => {
                    let ancestor = dom::nearest_common_ancestor(nodes)?;
                    if ancestor.is_element() {
                        ancestor
                    } else {
                        dom::parent_element(&ancestor)?
                    }
                }
            };
            let Some(parent) = dom::parent_element(&current) else {
                break;
            };
            if parent.has_name("body") {
                break;
            }
            let Some(mut wrapper) = OutputNode::shallow_clone(&parent).and_then(OutputNode::into_element)
            else {
                break;
            };
            wrapper.push(OutputNode::Element(root));
            root = wrapper;
            src_root = Some(parent);
        }

        Some(root)
    }

    #[must_use]
    pub fn debug_string(&self) -> String {
        format!(
            "ELEMENT \"text\": text={:?}, labels={}, is_content={}",
            self.text, self.labels, self.is_content
        )
    }
}
