//! Lead image scoring heuristics.
//!
//! Each scorer rates an image node between 0 and its maximum score. Size
//! based scorers need computed layout, which is never available here: they
//! always score 0 and [`LeadImageFinder`](super::LeadImageFinder) does not
//! use them.

use crate::dom::{self, NodeRef};

/// Rates a candidate lead image.
pub trait ImageScorer {
    /// Score for `node`, at most [`ImageScorer::max_score`]; 0 for no node.
    fn image_score(&self, node: Option<&NodeRef>) -> u32;

    fn max_score(&self) -> u32;
}

/// Favours images close to the first content node in the DOM.
pub struct ImageDomDistanceScorer<'a> {
    max_score: u32,
    first_content: Option<NodeRef<'a>>,
}

impl<'a> ImageDomDistanceScorer<'a> {
    #[must_use]
    pub fn new(max_score: u32, first_content: Option<NodeRef<'a>>) -> Self {
        Self {
            max_score,
            first_content,
        }
    }

    fn compute(&self, node: &NodeRef) -> u32 {
        let Some(content) = self.first_content else {
            return 0;
        };
        let Some(common) = dom::nearest_common_ancestor(&[content, *node]) else {
            return 0;
        };

        let depth_diff = dom::node_depth(&content).saturating_sub(dom::node_depth(&common));
        let multiplier = match depth_diff {
            0..4 => 1.0,
            4..6 => 0.6,
            6..8 => 0.2,
            _ => 0.0,
        };
        (f64::from(self.max_score) * multiplier) as u32
    }
}

impl ImageScorer for ImageDomDistanceScorer<'_> {
    fn image_score(&self, node: Option<&NodeRef>) -> u32 {
        node.map_or(0, |n| self.compute(n)).min(self.max_score)
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }
}

/// Favours images inside a `figure`.
pub struct ImageHasFigureScorer {
    max_score: u32,
}

impl ImageHasFigureScorer {
    #[must_use]
    pub fn new(max_score: u32) -> Self {
        Self { max_score }
    }
}

impl ImageScorer for ImageHasFigureScorer {
    fn image_score(&self, node: Option<&NodeRef>) -> u32 {
        match node {
            Some(n) if dom::has_ancestor_or_self(n, "figure") => self.max_score,
            _ => 0,
        }
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }
}

/// Favours images with a large rendered area. Needs layout; scores 0.
pub struct ImageAreaScorer {
    max_score: u32,
}

impl ImageAreaScorer {
    #[must_use]
    pub fn new(max_score: u32) -> Self {
        Self { max_score }
    }
}

impl ImageScorer for ImageAreaScorer {
    fn image_score(&self, _node: Option<&NodeRef>) -> u32 {
        0
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }
}

/// Favours images with a landscape aspect ratio. Needs layout; scores 0.
pub struct ImageRatioScorer {
    max_score: u32,
}

impl ImageRatioScorer {
    #[must_use]
    pub fn new(max_score: u32) -> Self {
        Self { max_score }
    }
}

impl ImageScorer for ImageRatioScorer {
    fn image_score(&self, _node: Option<&NodeRef>) -> u32 {
        0
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }
}
