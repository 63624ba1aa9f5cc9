//! Emoji detection.
//!
//! Rewriting is driven by an [`EmojiMatcher`], which reports where emoji sit
//! in a piece of text. The rewriters never look inside a match, so the
//! detection data can be swapped without touching them.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::codepoint::VARIATION_SELECTOR;

/// U+FE0E, the text presentation selector.
const TEXT_SELECTOR: char = '\u{FE0E}';

/// One emoji sequence found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiMatch<'t> {
    /// The matched text.
    pub raw: &'t str,
    /// Byte offset of `raw` in the scanned text.
    pub index: usize,
}

impl EmojiMatch<'_> {
    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.index + self.raw.len()
    }
}

/// Finds emoji sequences in text.
///
/// Implementations must return matches left to right and without overlap.
/// Rewriters skip any match that breaks this rather than panicking.
pub trait EmojiMatcher {
    fn find_matches<'t>(&self, text: &'t str) -> Vec<EmojiMatch<'t>>;
}

impl<M: EmojiMatcher + ?Sized> EmojiMatcher for &M {
    fn find_matches<'t>(&self, text: &'t str) -> Vec<EmojiMatch<'t>> {
        (**self).find_matches(text)
    }
}

/// Every match of the pattern is an emoji.
impl EmojiMatcher for Regex {
    fn find_matches<'t>(&self, text: &'t str) -> Vec<EmojiMatch<'t>> {
        self.find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| EmojiMatch {
                raw: m.as_str(),
                index: m.start(),
            })
            .collect()
    }
}

/// Lookup table built from the `emojis` crate.
struct EmojiTable {
    sequences: HashSet<&'static str>,
    /// Selector-free forms, which are not `'static` slices of the data.
    stripped: HashSet<String>,
    /// Chars that start at least one sequence.
    starts: HashSet<char>,
    /// Longest sequence, in bytes.
    max_len: usize,
}

impl EmojiTable {
    fn build() -> Self {
        let mut table = Self {
            sequences: HashSet::new(),
            stripped: HashSet::new(),
            starts: HashSet::new(),
            max_len: 0,
        };

        for emoji in emojis::iter() {
            table.insert(emoji.as_str());
            if let Some(tones) = emoji.skin_tones() {
                for tone in tones {
                    table.insert(tone.as_str());
                }
            }
        }

        log::debug!(
            "emoji table: {} sequences, {} selector-free forms",
            table.sequences.len(),
            table.stripped.len()
        );
        table
    }

    fn insert(&mut self, seq: &'static str) {
        self.sequences.insert(seq);
        self.max_len = self.max_len.max(seq.len());
        if let Some(first) = seq.chars().next() {
            self.starts.insert(first);
        }

        if seq.contains(VARIATION_SELECTOR) {
            let stripped: String = seq.chars().filter(|&c| c != VARIATION_SELECTOR).collect();
            if let Some(first) = stripped.chars().next() {
                self.starts.insert(first);
                self.stripped.insert(stripped);
            }
        }
    }

    fn contains(&self, candidate: &str) -> bool {
        self.sequences.contains(candidate) || self.stripped.contains(candidate)
    }

    /// Length of the longest sequence at the start of `text`.
    fn longest_prefix(&self, text: &str) -> Option<usize> {
        let first = text.chars().next()?;
        if !self.starts.contains(&first) {
            return None;
        }

        let limit = self.max_len.min(text.len());
        (first.len_utf8()..=limit)
            .rev()
            .filter(|&end| text.is_char_boundary(end))
            .find(|&end| self.contains(&text[..end]))
    }
}

static TABLE: Lazy<EmojiTable> = Lazy::new(EmojiTable::build);

/// Greedy longest-match detection over the Unicode emoji list.
///
/// Sequences are recognized with or without their `U+FE0F` selectors, and a
/// selector trailing a match is folded into it. A match followed by the text
/// presentation selector `U+FE0E` asked to be shown as text and is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

impl EmojiMatcher for DefaultMatcher {
    fn find_matches<'t>(&self, text: &'t str) -> Vec<EmojiMatch<'t>> {
        let table = &*TABLE;
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let Some(mut len) = table.longest_prefix(rest) else {
                pos += rest.chars().next().map_or(1, char::len_utf8);
                continue;
            };

            let mut after = rest[len..].chars();
            match after.next() {
                Some(VARIATION_SELECTOR) if !rest[..len].ends_with(VARIATION_SELECTOR) => {
                    len += VARIATION_SELECTOR.len_utf8();
                }
                Some(TEXT_SELECTOR) => {
                    pos += len + TEXT_SELECTOR.len_utf8();
                    continue;
                }
                _ => {}
            }

            matches.push(EmojiMatch {
                raw: &rest[..len],
                index: pos,
            });
            pos += len;
        }

        matches
    }
}
