//! Filters over the element list of a page.

mod lead_image;
mod nested;
mod relevant;
pub mod scorer;

pub use lead_image::LeadImageFinder;
pub use nested::NestedElementRetainer;
pub use relevant::RelevantElements;
