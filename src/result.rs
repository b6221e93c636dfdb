//! Result types for distillation output.
//!
//! This module defines the structured output of a distillation run: the
//! content itself, the page metadata read from structured markup and the
//! time spent in each stage.

use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

/// Image described by structured markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupImage {
    pub url: String,
    pub secure_url: String,
    /// MIME type, e.g. `image/jpeg`.
    #[serde(rename = "type")]
    pub image_type: String,
    pub caption: String,
    /// Zero when missing or unparseable.
    pub width: u32,
    pub height: u32,
}

/// Article object of structured markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupArticle {
    pub published_time: String,
    pub modified_time: String,
    pub expiration_time: String,
    pub section: String,
    pub authors: Vec<String>,
}

impl MarkupArticle {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.published_time.is_empty()
            && self.modified_time.is_empty()
            && self.expiration_time.is_empty()
            && self.section.is_empty()
            && self.authors.is_empty()
    }
}

/// Page metadata collected from structured markup.
///
/// Empty when the page opts out of distillation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupInfo {
    pub title: String,
    /// `"Article"` for article pages, empty otherwise.
    #[serde(rename = "type")]
    pub page_type: String,
    pub url: String,
    pub description: String,
    pub publisher: String,
    pub copyright: String,
    pub author: String,
    pub article: MarkupArticle,
    pub images: Vec<MarkupImage>,
}

/// A named timing measured outside the main stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingEntry {
    pub name: String,
    #[serde(serialize_with = "serialize_millis")]
    pub time: Duration,
}

/// Time spent in each stage of a distillation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimingInfo {
    #[serde(serialize_with = "serialize_millis")]
    pub markup_parsing_time: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub document_construction_time: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub article_processing_time: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub formatting_time: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub total_time: Duration,
    pub other_times: Vec<TimingEntry>,
}

impl TimingInfo {
    /// Records the time elapsed since `start` under `name`.
    pub fn add_entry(&mut self, start: Instant, name: &str) {
        self.other_times.push(TimingEntry {
            name: name.to_string(),
            time: start.elapsed(),
        });
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Result of distilling an HTML document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DistillResult {
    /// Origin URL the page was distilled with, if any.
    pub url: Option<String>,

    /// Title of the page: the markup title if present, else the
    /// cleaned `<title>`.
    pub title: String,

    /// `dir` of the root element, else of `<body>`, else `"auto"`.
    pub text_direction: String,

    /// Distilled content as HTML, or plain text when text-only output
    /// was requested.
    pub html: String,

    /// Absolute URLs of the images kept in the content.
    pub content_images: Vec<String>,

    /// Number of words in the content blocks.
    pub word_count: usize,

    /// Metadata from structured markup.
    pub markup_info: MarkupInfo,

    /// Per-stage timings.
    pub timing: TimingInfo,
}
