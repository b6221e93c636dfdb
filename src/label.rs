//! Block labels.
//!
//! Labels are hints attached to texts and blocks by the builder and by
//! filters. A block's label set is the union of its texts' labels.

use std::fmt;

use serde::Serialize;

/// A classification hint carried by a text or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Label {
    Title,
    ArticleMetadata,
    MightBeContent,
    VeryLikelyContent,
    Hr,
    Li,
    Heading,
    H1,
    H2,
    H3,
    BoilerplateHeadingFused,
    StrictlyNotContent,
    SiblingOfMainContent,
}

impl Label {
    const ALL: [Label; 13] = [
        Label::Title,
        Label::ArticleMetadata,
        Label::MightBeContent,
        Label::VeryLikelyContent,
        Label::Hr,
        Label::Li,
        Label::Heading,
        Label::H1,
        Label::H2,
        Label::H3,
        Label::BoilerplateHeadingFused,
        Label::StrictlyNotContent,
        Label::SiblingOfMainContent,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Title => "TITLE",
            Label::ArticleMetadata => "ARTICLE_METADATA",
            Label::MightBeContent => "MIGHT_BE_CONTENT",
            Label::VeryLikelyContent => "VERY_LIKELY_CONTENT",
            Label::Hr => "HR",
            Label::Li => "LI",
            Label::Heading => "HEADING",
            Label::H1 => "H1",
            Label::H2 => "H2",
            Label::H3 => "H3",
            Label::BoilerplateHeadingFused => "BOILERPLATE_HEADING_FUSED",
            Label::StrictlyNotContent => "STRICTLY_NOT_CONTENT",
            Label::SiblingOfMainContent => "SIBLING_OF_MAIN_CONTENT",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSet(u16);

impl LabelSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(self, label: Label) -> bool {
        self.0 & label.bit() != 0
    }

    pub fn insert(&mut self, label: Label) {
        self.0 |= label.bit();
    }

    pub fn remove(&mut self, label: Label) {
        self.0 &= !label.bit();
    }

    pub fn extend(&mut self, other: LabelSet) {
        self.0 |= other.0;
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Label> {
        Label::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}

impl FromIterator<Label> for LabelSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Label::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl Serialize for LabelSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = LabelSet::new();
        assert!(set.is_empty());

        set.insert(Label::Heading);
        set.insert(Label::H2);
        assert!(set.contains(Label::Heading));
        assert!(set.contains(Label::H2));
        assert!(!set.contains(Label::H1));

        set.remove(Label::Heading);
        assert!(!set.contains(Label::Heading));
        assert!(set.contains(Label::H2));
    }

    #[test]
    fn test_extend_is_union() {
        let mut a: LabelSet = [Label::Li].into_iter().collect();
        let b: LabelSet = [Label::Title, Label::Li].into_iter().collect();
        a.extend(b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![Label::Title, Label::Li]);
    }

    #[test]
    fn test_display() {
        let set: LabelSet = [Label::StrictlyNotContent, Label::Heading].into_iter().collect();
        assert_eq!(set.to_string(), "[HEADING, STRICTLY_NOT_CONTENT]");
    }
}
