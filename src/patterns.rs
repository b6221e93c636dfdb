//! Compiled regex patterns used across the pipeline.
//!
//! All patterns are compiled once using `LazyLock`. They are grouped by the
//! stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Word Counting
// =============================================================================

// Words are split on ASCII whitespace only; a non-breaking space joins words.

/// A run of non-whitespace containing at least one Latin, extended or Hangul letter.
pub static FULL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\t\n\f\r ]*[0-9A-Za-z_\x{00C0}-\x{1FFF}\x{AC00}-\x{D7AF}][^\t\n\f\r ]*")
        .expect("FULL_WORD regex")
});

/// A run of non-whitespace containing at least one Latin or extended letter.
pub static FAST_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\t\n\f\r ]*[0-9A-Za-z_\x{00C0}-\x{1FFF}][^\t\n\f\r ]*")
        .expect("FAST_WORD regex")
});

/// Kana, CJK ideographs and Yi.
pub static CJK_CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{3040}-\x{A4CF}]").expect("CJK_CHARACTER regex"));

/// Hangul syllables.
pub static HANGUL_CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{AC00}-\x{D7AF}]").expect("HANGUL_CHARACTER regex"));

// =============================================================================
// Inline Style
// =============================================================================

/// `display:` declaration in an inline style.
pub static DISPLAY_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)display:\s*([\w-]+)\s*(?:;|$)").expect("DISPLAY_STYLE regex")
});

pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display:\s*none").expect("DISPLAY_NONE regex"));

pub static VISIBILITY_HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)visibility:\s*(:?hidden|collapse)").expect("VISIBILITY_HIDDEN regex")
});

// =============================================================================
// Text Output
// =============================================================================

/// Whitespace before sentence punctuation.
pub static PUNCTUATION_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([.?!,;])\s*(\S*)").expect("PUNCTUATION_SPACING regex")
});

/// Placeholder written for `<br>` while collapsing whitespace.
pub const LINE_BREAK_MARKER: &str = r"|\/|";

pub static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\\/\|\s*").expect("LINE_BREAK regex"));

// =============================================================================
// URLs and Images
// =============================================================================

/// One candidate of a `srcset` list: URL, optional descriptor, separator.
pub static SRCSET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\S+)(\s+[\d.]+[xw])?(\s*(?:,|$))").expect("SRCSET_URL regex")
});

/// Base64 `data:` URL prefix capturing the media type.
pub static BASE64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*([^\s;,]+)\s*;\s*base64\s*").expect("BASE64_DATA_URL regex")
});

/// Attribute value that looks like a single image URL.
pub static LAZY_IMAGE_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("LAZY_IMAGE_SRC regex")
});

/// Attribute value that looks like an image `srcset`.
pub static LAZY_IMAGE_SRCSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)\s+\d").expect("LAZY_IMAGE_SRCSET regex")
});

// =============================================================================
// Element Actions and Block Classification
// =============================================================================

/// Class or id naming a comment section.
pub static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcomments?\b").expect("COMMENTS regex"));

/// Phrases that mark the end of an article body.
pub static TERMINATING_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^(comments|© reuters|please rate this|post a comment|\d+\s+(comments|users responded in))|what you think\.\.\.|add your comment|add comment|reader views|have your say|reader comments|rätta artikeln|^thanks for your comments - this feedback is now closed$)",
    )
    .expect("TERMINATING_BLOCK regex")
});

// =============================================================================
// Title Matching
// =============================================================================

/// Separators tried in turn when looking for the longest part of a title.
pub static TITLE_LONGEST_PART_SEPARATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"[ ]*[\|»|-][ ]*",
        r"[ ]*[\|»|:][ ]*",
        r"[ ]*[\|»|:\(\)][ ]*",
        r"[ ]*[\|»|:\(\)\-][ ]*",
        r"[ ]*[\|»|,|:\(\)\-][ ]*",
        r"[ ]*[\|»|,|:\(\)\-\x{00a0}][ ]*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("TITLE_LONGEST_PART_SEPARATORS regex"))
    .collect()
});

/// Separators whose long parts (4+ words) are candidate titles themselves.
pub static TITLE_POTENTIAL_SEPARATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"[ ]+[\|][ ]+", r"[ ]+[\-][ ]+"]
        .iter()
        .map(|p| Regex::new(p).expect("TITLE_POTENTIAL_SEPARATORS regex"))
        .collect()
});

/// Trailing ` - Site` suffix.
pub static TITLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - [^\-]+$").expect("TITLE_SUFFIX regex"));

/// Leading `Site - ` prefix.
pub static TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\-]+ - ").expect("TITLE_PREFIX regex"));

/// Punctuation ignored when comparing block text with a title.
pub static TITLE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\?\!\.\-\:]+").expect("TITLE_PUNCTUATION regex"));

// =============================================================================
// Document Title
// =============================================================================

/// Any title separator surrounded by spaces.
pub static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [\|\-\\/>»] ").expect("TITLE_SEPARATOR regex"));

/// Separators implying a site hierarchy.
pub static TITLE_HIERARCHY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [\\/>»] ").expect("TITLE_HIERARCHY_SEPARATOR regex"));

/// Everything before the last separator.
pub static TITLE_REMOVE_FINAL_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*)[\|\-\\/>»] .*").expect("TITLE_REMOVE_FINAL_PART regex"));

/// Everything after the first separator.
pub static TITLE_REMOVE_FIRST_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\|\-\\/>»]*[\|\-\\/>»](.*)").expect("TITLE_REMOVE_FIRST_PART regex")
});

pub static TITLE_ANY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\|\-\\/>»]+").expect("TITLE_ANY_SEPARATOR regex"));

// =============================================================================
// OpenGraph Namespaces
// =============================================================================

/// `prefix: http://ogp.me/ns/<type>#` pairs of a `prefix` attribute.
/// Group 2 is the prefix, group 4 the object type (with its leading slash).
pub static OGP_NS_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((\w+):\s+(http://ogp\.me/ns(/\w+)*#))\s*").expect("OGP_NS_PREFIX regex")
});

/// `xmlns:<prefix>` attribute name.
pub static OGP_NS_XMLNS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^xmlns:(\w+)").expect("OGP_NS_XMLNS_NAME regex"));

/// `xmlns` namespace value; group 1 is the object type.
pub static OGP_NS_XMLNS_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^http://ogp\.me/ns(/\w+)*#").expect("OGP_NS_XMLNS_VALUE regex")
});
