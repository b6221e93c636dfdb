//! The web document model.
//!
//! The converter walks the parsed page and feeds a [`WebDocumentBuilder`],
//! which produces a flat [`Document`] of elements: text runs, nesting tags,
//! images, figures, videos, embeds and data tables. Text runs are regrouped
//! into a [`TextDocument`] of blocks for classification, and the verdicts are
//! written back onto the elements before output is generated.

mod action;
mod builder;
mod document;
mod element;
mod text;
mod text_block;
mod text_builder;

pub use action::ElementAction;
pub use builder::{DocumentBuilder, WebDocumentBuilder};
pub use document::Document;
pub use element::{Element, Embed, Figure, Image, Table, Tag, TagType, Video};
pub use text::Text;
pub use text_block::{TextBlock, TextDocument};
pub use text_builder::TextBuilder;

/// Elements whose start and end are emitted as separate [`Tag`]s so that
/// content may span several blocks inside them.
#[must_use]
pub fn can_be_nested(tag_name: &str) -> bool {
    matches!(tag_name, "ul" | "ol" | "li" | "blockquote" | "pre")
}
