//! Distillation drivers.
//!
//! - `article`: the fixed sequence of block filters that classifies a page
//! - `content`: the whole run from a parsed page to output, with timings

pub mod article;
pub mod content;

pub use article::ArticleExtractor;
pub use content::ContentExtractor;
