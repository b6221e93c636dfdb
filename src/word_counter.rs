//! Word segmentation strategies.
//!
//! Space-delimited scripts count runs of non-whitespace containing a word
//! character. CJK scripts have no delimiters, so their characters are counted
//! individually at a discount.

use serde::Serialize;

use crate::patterns::{CJK_CHARACTER, FAST_WORD, FULL_WORD, HANGUL_CHARACTER};

/// Counts words in a piece of text.
pub trait WordCounter {
    /// Number of words in `text`.
    fn count(&self, text: &str) -> usize;
}

/// Available word counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WordCounterKind {
    /// Letter words plus weighted CJK characters.
    Full,
    /// Letter words, including Hangul syllables.
    Letter,
    /// Latin and extended letter words only.
    Fast,
}

impl WordCounter for WordCounterKind {
    fn count(&self, text: &str) -> usize {
        match self {
            Self::Full => {
                let words = FULL_WORD.find_iter(text).count();
                let cjk = CJK_CHARACTER.find_iter(text).count();
                words + (cjk as f64 * 0.55).ceil() as usize
            }
            Self::Letter => FULL_WORD.find_iter(text).count(),
            Self::Fast => FAST_WORD.find_iter(text).count(),
        }
    }
}

/// Picks the cheapest counter that handles the scripts found in `text`.
#[must_use]
pub fn select_word_counter(text: &str) -> WordCounterKind {
    if CJK_CHARACTER.is_match(text) {
        WordCounterKind::Full
    } else if HANGUL_CHARACTER.is_match(text) {
        WordCounterKind::Letter
    } else {
        WordCounterKind::Fast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_counts_space_delimited_words() {
        let wc = WordCounterKind::Fast;
        assert_eq!(wc.count("one two  three"), 3);
        assert_eq!(wc.count("  \n\t "), 0);
        assert_eq!(wc.count(""), 0);
    }

    #[test]
    fn test_only_ascii_whitespace_separates_words() {
        assert_eq!(WordCounterKind::Fast.count("one\u{a0}two three"), 2);
        assert_eq!(WordCounterKind::Letter.count("one\u{2009}two"), 1);
        assert_eq!(WordCounterKind::Full.count("one\ttwo\rthree\x0cfour"), 4);
    }

    #[test]
    fn test_fast_ignores_pure_punctuation() {
        let wc = WordCounterKind::Fast;
        assert_eq!(wc.count("a - b"), 2);
        assert_eq!(wc.count("... !!!"), 0);
    }

    #[test]
    fn test_letter_counts_hangul() {
        assert_eq!(WordCounterKind::Letter.count("안녕하세요 세계"), 2);
    }

    #[test]
    fn test_full_weights_cjk_characters() {
        // ceil(4 * 0.55) = 3
        assert_eq!(WordCounterKind::Full.count("日本語だ"), 3);
        assert_eq!(WordCounterKind::Full.count("日本語だ in text"), 5);
    }

    #[test]
    fn test_select_word_counter() {
        assert_eq!(select_word_counter("plain english text"), WordCounterKind::Fast);
        assert_eq!(select_word_counter("한국어 텍스트"), WordCounterKind::Letter);
        assert_eq!(select_word_counter("中文 text"), WordCounterKind::Full);
    }
}
