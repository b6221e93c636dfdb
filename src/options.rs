//! Configuration options for distillation.
//!
//! The `Options` struct controls the output format and the context the
//! pipeline runs with (page URL, word segmentation).

use url::Url;

use crate::word_counter::WordCounterKind;
use crate::{Error, Result};

/// Configuration options for distillation.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use dom_distiller::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Plain text output for a known page
/// let options = Options {
///     extract_text_only: true,
///     ..Options::with_url("https://example.com/news/1.html")?
/// };
/// # Ok::<(), dom_distiller::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Produce plain text instead of HTML.
    ///
    /// Tag markers and embeds produce no output in text mode, images and
    /// figures contribute their captions only.
    ///
    /// Default: `false`
    pub extract_text_only: bool,

    /// Origin URL of the page.
    ///
    /// Used to resolve relative links, `src` and `srcset` values and to match
    /// embed domains. When `None`, relative URLs pass through unchanged.
    ///
    /// Default: `None`
    pub original_url: Option<Url>,

    /// Force a word counter instead of selecting one from the page text.
    ///
    /// Default: `None` (selected per page)
    pub word_counter: Option<WordCounterKind>,
}

impl Options {
    /// Default options with `original_url` parsed from `url`.
    pub fn with_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(url.to_string(), e))?;
        Ok(Self {
            original_url: Some(parsed),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert!(!opts.extract_text_only);
        assert!(opts.original_url.is_none());
        assert!(opts.word_counter.is_none());
    }

    #[test]
    fn test_with_url_parses_origin() {
        let opts = Options::with_url("https://example.com/a/b.html");
        match opts {
            Ok(opts) => {
                let url = opts.original_url.map(|u| u.to_string());
                assert_eq!(url.as_deref(), Some("https://example.com/a/b.html"));
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_with_url_rejects_relative() {
        let opts = Options::with_url("/relative/path");
        assert!(matches!(opts, Err(Error::InvalidUrl(..))));
    }

    #[test]
    fn test_fields_can_be_overridden() {
        let opts = Options {
            extract_text_only: true,
            word_counter: Some(WordCounterKind::Letter),
            ..Options::default()
        };

        assert!(opts.extract_text_only);
        assert_eq!(opts.word_counter, Some(WordCounterKind::Letter));
    }
}
