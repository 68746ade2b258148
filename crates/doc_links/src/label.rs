//! Heading text to label identifier canonicalization.

use std::collections::BTreeSet;

/// Converts heading display text into a comparable label identifier.
///
/// Canonicalization trims the text, lowercases it, removes every character in the stripped set,
/// and collapses each whitespace run into a single `-`. It is pure: the same input always gives
/// the same output, and nothing outside the canonicalizer is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelCanonicalizer {
    stripped: BTreeSet<char>,
}

impl LabelCanonicalizer {
    /// Create a canonicalizer that strips the given characters.
    pub fn new(stripped: impl IntoIterator<Item = char>) -> Self {
        Self {
            stripped: stripped.into_iter().collect(),
        }
    }

    /// Characters removed during canonicalization.
    pub fn stripped(&self) -> &BTreeSet<char> {
        &self.stripped
    }

    /// Canonicalize `text` into a label identifier.
    ///
    /// ```rust
    /// # use doc_links::LabelCanonicalizer;
    /// let labels = LabelCanonicalizer::default();
    /// assert_eq!(labels.canonicalize("Setup (Advanced): Linux/macOS"), "setup-advanced-linuxmacos");
    /// ```
    pub fn canonicalize(&self, text: &str) -> String {
        let kept: String = text
            .chars()
            .filter(|ch| !self.stripped.contains(ch))
            .flat_map(char::to_lowercase)
            .collect();
        kept.split_whitespace().collect::<Vec<_>>().join("-")
    }
}

impl Default for LabelCanonicalizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_STRIPPED_PUNCTUATION.iter().copied())
    }
}
