//! The block classification pipeline.

use tracing::{debug, enabled, trace, Level};

use crate::filter::english::{NumWordsRulesClassifier, TerminatingBlocksFinder};
use crate::filter::heuristic::{
    BlockProximityFusion, DocumentTitleMatch, ExpandTitleToContent, HeadingFusion, KeepLargestBlock,
    LargeBlockSameTagLevelToContent, ListAtEnd, SimilarSiblingContent,
};
use crate::filter::simple::{BoilerplateBlock, LabelToBoilerplate};
use crate::filter::TextBlockFilter;
use crate::label::Label;
use crate::webdoc::TextDocument;
use crate::word_counter::WordCounter;

/// Runs the block filters in their fixed order.
///
/// Every stage sees the result of the previous one, so the order is part of
/// the algorithm: classification first, then expansion to siblings, fusion,
/// removal of boilerplate and finally selection of the main block.
pub struct ArticleExtractor {
    stages: Vec<(&'static str, Box<dyn TextBlockFilter>)>,
}

impl ArticleExtractor {
    /// Pipeline matching blocks against `candidate_titles`, best candidate first.
    #[must_use]
    pub fn new(counter: &dyn WordCounter, candidate_titles: &[String]) -> Self {
        let stages: Vec<(&'static str, Box<dyn TextBlockFilter>)> = vec![
            ("terminating blocks", Box::new(TerminatingBlocksFinder)),
            (
                "document title match",
                Box::new(DocumentTitleMatch::new(counter, candidate_titles)),
            ),
            ("classification", Box::new(NumWordsRulesClassifier)),
            (
                "ignore strictly not content blocks",
                Box::new(LabelToBoilerplate::new(&[Label::StrictlyNotContent])),
            ),
            (
                "cross headings similar sibling expansion",
                Box::new(SimilarSiblingContent {
                    allow_cross_headings: true,
                    max_link_density: 0.5,
                    max_block_distance: 10,
                    ..SimilarSiblingContent::default()
                }),
            ),
            (
                "mixed tags similar sibling expansion",
                Box::new(SimilarSiblingContent {
                    allow_cross_headings: true,
                    allow_mixed_tags: true,
                    max_block_distance: 10,
                    ..SimilarSiblingContent::default()
                }),
            ),
            ("heading fusion", Box::new(HeadingFusion)),
            ("proximity fusion", Box::new(BlockProximityFusion::new(false))),
            (
                "remove boilerplate keeping titles",
                Box::new(BoilerplateBlock::new(Some(Label::Title))),
            ),
            (
                "same level proximity fusion",
                Box::new(BlockProximityFusion::new(true)),
            ),
            ("keep largest block", Box::new(KeepLargestBlock::new(true))),
            ("expand title to content", Box::new(ExpandTitleToContent)),
            (
                "large blocks at main tag level",
                Box::new(LargeBlockSameTagLevelToContent),
            ),
            ("list at end", Box::new(ListAtEnd)),
        ];
        Self { stages }
    }

    /// Classifies the blocks of `doc`. Returns whether any stage changed it.
    pub fn extract(&self, doc: &mut TextDocument) -> bool {
        if enabled!(Level::TRACE) {
            trace!(blocks = %doc.debug_string(), "start");
        }

        let mut any_changed = false;
        for (stage, filter) in &self.stages {
            let changed = filter.process(doc);
            any_changed |= changed;
            debug!(stage, changed, blocks = doc.text_blocks.len(), "filter applied");
            if changed && enabled!(Level::TRACE) {
                trace!(stage, blocks = %doc.debug_string());
            }
        }
        any_changed
    }
}
