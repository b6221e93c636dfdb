//! Per-element builder actions.

use crate::dom::{self, NodeRef};
use crate::label::{Label, LabelSet};
use crate::patterns::COMMENTS;

/// Elements with more classes than this are not treated as comment sections.
const MAX_CLASS_COUNT: usize = 2;

/// What entering an element does to the text being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementAction {
    /// Pending text is flushed into its own block when the element ends.
    pub flush: bool,
    /// Text inside counts as linked words.
    pub is_anchor: bool,
    pub changes_tag_level: bool,
    /// Inherited by every text created while the element is open.
    pub labels: LabelSet,
}

impl ElementAction {
    /// Action for an element, decided from its display style, ancestry and tag.
    #[must_use]
    pub fn for_element(element: &NodeRef) -> Self {
        let tag = dom::tag_name(element);
        let mut action = ElementAction::default();

        match dom::display_style(element).as_str() {
            "none" | "inline" => {}
            "inline-block" | "inline-flex" => action.changes_tag_level = true,
            _ => {
                action.flush = true;
                action.changes_tag_level = true;
            }
        }

        if element
            .ancestors_it(None)
            .any(|a| a.has_name("li") || a.has_name("summary"))
        {
            action.flush = false;
            action.changes_tag_level = false;
        }

        if matches!(tag.as_str(), "html" | "body" | "article") {
            return action;
        }

        let id = dom::id(element);
        let class_name = dom::class_name(element);
        let class_count = class_name.split_whitespace().count();
        if (COMMENTS.is_match(&id) || COMMENTS.is_match(&class_name)) && class_count <= MAX_CLASS_COUNT
        {
            action.labels.insert(Label::StrictlyNotContent);
        }

        match tag.as_str() {
            "aside" | "nav" => action.labels.insert(Label::StrictlyNotContent),
            "li" => action.labels.insert(Label::Li),
            "h1" => {
                action.labels.insert(Label::H1);
                action.labels.insert(Label::Heading);
            }
            "h2" => {
                action.labels.insert(Label::H2);
                action.labels.insert(Label::Heading);
            }
            "h3" => {
                action.labels.insert(Label::H3);
                action.labels.insert(Label::Heading);
            }
            "h4" | "h5" | "h6" => action.labels.insert(Label::Heading),
            "a" => {
                action.changes_tag_level = true;
                action.is_anchor = element.has_attr("href");
            }
            _ => {}
        }

        action
    }
}
