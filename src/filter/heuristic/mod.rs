//! Heuristics that fuse, expand and relabel blocks using their neighbours
//! and the shape of the DOM around them.

mod expand_title;
mod heading_fusion;
mod large_block;
mod largest_block;
mod list_at_end;
mod proximity;
mod similar_sibling;
mod title_match;

pub use expand_title::ExpandTitleToContent;
pub use heading_fusion::HeadingFusion;
pub use large_block::{LargeBlockAroundTagLevelToContent, LargeBlockSameTagLevelToContent};
pub use largest_block::KeepLargestBlock;
pub use list_at_end::ListAtEnd;
pub use proximity::BlockProximityFusion;
pub use similar_sibling::SimilarSiblingContent;
pub use title_match::DocumentTitleMatch;
