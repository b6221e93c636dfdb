//! Matching blocks against the page's candidate titles.

use std::collections::HashSet;

use regex::Regex;

use crate::label::Label;
use crate::patterns::{
    TITLE_LONGEST_PART_SEPARATORS, TITLE_POTENTIAL_SEPARATORS, TITLE_PREFIX, TITLE_PUNCTUATION,
    TITLE_SUFFIX,
};
use crate::webdoc::TextDocument;
use crate::word_counter::WordCounter;

use crate::filter::TextBlockFilter;

/// Parts of a split title need this many words to be candidates on their own.
const MIN_WORDS_IN_TITLE_PART: usize = 4;

/// Labels blocks whose text equals a candidate title as [`Label::Title`].
///
/// Candidates are derived from each given title: its longest part under a
/// series of separators, its long parts, and the title without a leading or
/// trailing `Site - ` segment. Every matching block is labelled, so
/// breadcrumbs repeating the title are caught too.
pub struct DocumentTitleMatch {
    potential_titles: HashSet<String>,
}

fn normalize(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .replace('\'', "")
        .trim()
        .to_lowercase()
}

impl DocumentTitleMatch {
    #[must_use]
    pub fn new(counter: &dyn WordCounter, titles: &[String]) -> Self {
        let mut filter = Self {
            potential_titles: HashSet::new(),
        };
        for title in titles {
            filter.add_title(counter, title);
        }
        filter
    }

    fn add_title(&mut self, counter: &dyn WordCounter, title: &str) {
        let title = normalize(title);
        if title.is_empty() || self.potential_titles.contains(&title) {
            return;
        }

        for rx in TITLE_LONGEST_PART_SEPARATORS.iter() {
            if let Some(part) = longest_part(counter, &title, rx) {
                self.potential_titles.insert(part);
            }
        }

        for rx in TITLE_POTENTIAL_SEPARATORS.iter() {
            let parts: Vec<&str> = rx.split(&title).collect();
            if parts.len() == 1 {
                continue;
            }
            for part in parts {
                if !part.contains(".com") && counter.count(part) >= MIN_WORDS_IN_TITLE_PART {
                    self.potential_titles.insert(part.to_string());
                }
            }
        }

        for rx in [&*TITLE_SUFFIX, &*TITLE_PREFIX] {
            self.potential_titles.insert(rx.replace_all(&title, "").into_owned());
        }
    }

    fn is_title(&self, text: &str) -> bool {
        let text = normalize(text);
        if self.potential_titles.contains(&text) {
            return true;
        }
        let stripped = TITLE_PUNCTUATION.replace_all(&text, "");
        self.potential_titles.contains(stripped.trim())
    }
}

/// The part with the most words (or characters) after splitting on `rx`.
fn longest_part(counter: &dyn WordCounter, title: &str, rx: &Regex) -> Option<String> {
    let parts: Vec<&str> = rx.split(title).collect();
    if parts.len() == 1 {
        return None;
    }

    let mut longest = "";
    let mut longest_words = 0;
    let mut longest_len = 0;
    for part in parts {
        if part.contains(".com") {
            continue;
        }
        let words = counter.count(part);
        let len = part.chars().count();
        if words > longest_words || len > longest_len {
            longest = part;
            longest_words = words;
            longest_len = len;
        }
    }

    (longest_len > 0).then(|| longest.trim().to_string())
}

impl TextBlockFilter for DocumentTitleMatch {
    fn process(&self, doc: &mut TextDocument) -> bool {
        if self.potential_titles.is_empty() {
            return false;
        }

        let mut changes = false;
        for block in &mut doc.text_blocks {
            if self.is_title(&block.text) {
                block.add_label(Label::Title);
                changes = true;
            }
        }
        changes
    }
}
