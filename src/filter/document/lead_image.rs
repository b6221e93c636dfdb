use tracing::trace;

use crate::dom::{self, NodeRef};
use crate::webdoc::{Document, Element};

use super::scorer::{ImageDomDistanceScorer, ImageHasFigureScorer, ImageScorer};
use crate::filter::DocumentFilter;

/// Images must score strictly more than this to lead the article.
const MIN_ACCEPTED_SCORE: u32 = 13;

/// Picks an image placed before the article text as its lead image.
///
/// Candidates are the images and figures preceding the first content text.
/// The highest scoring one above the acceptance threshold becomes content;
/// on a tie the earlier image wins.
pub struct LeadImageFinder;

fn image_node<'a>(element: &Element<'a>) -> Option<NodeRef<'a>> {
    match element {
        Element::Image(image) => Some(image.node),
        Element::Figure(figure) => Some(figure.image.node),
        _ => None,
    }
}

/// The scorers rating lead image candidates. Size based scorers are left
/// out: without layout they would only raise the maximum.
fn lead_scorers<'a>(first_content: NodeRef<'a>) -> Vec<Box<dyn ImageScorer + 'a>> {
    vec![
        Box::new(ImageDomDistanceScorer::new(25, Some(first_content))),
        Box::new(ImageHasFigureScorer::new(15)),
    ]
}

fn max_total_score(scorers: &[Box<dyn ImageScorer + '_>]) -> u32 {
    scorers.iter().map(|s| s.max_score()).sum()
}

/// Index of the best candidate scoring above the threshold.
fn best_candidate(scores: impl IntoIterator<Item = (usize, u32)>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, score) in scores {
        if score > MIN_ACCEPTED_SCORE && best.is_none_or(|(_, b)| score > b) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

impl DocumentFilter for LeadImageFinder {
    fn process(&self, doc: &mut Document) -> bool {
        let first_content = doc.elements.iter().find_map(|e| match e {
            Element::Text(text) if text.is_content() => Some(text.first_non_whitespace_text_node()),
            _ => None,
        });
        let Some(first_content) = first_content else {
            return false;
        };

        let mut candidates = Vec::new();
        for (index, element) in doc.elements.iter().enumerate() {
            if matches!(element, Element::Text(text) if text.is_content()) {
                break;
            }
            let Some(node) = image_node(element) else {
                continue;
            };
            if element.is_content() {
                break;
            }
            candidates.push((index, node));
        }
        if candidates.is_empty() {
            return false;
        }

        let scorers = lead_scorers(first_content);
        let max = max_total_score(&scorers);

        let scores = candidates.iter().map(|&(index, node)| {
            let score = scorers.iter().map(|s| s.image_score(Some(&node))).sum::<u32>();
            trace!(
                score,
                max,
                src = %dom::attribute_or_empty(&node, "src"),
                "lead image candidate"
            );
            (index, score)
        });

        match best_candidate(scores) {
            Some(index) => {
                doc.elements[index].set_is_content(true);
                true
            }
            None => false,
        }
    }
}
