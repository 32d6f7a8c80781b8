// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered list of phrases, one card per phrase.

use serde::{Deserialize, Serialize};

/// Non-empty, trimmed phrases in file order.
///
/// Phrases are identified by position only; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseList {
    phrases: Vec<String>,
}

impl PhraseList {
    /// Build a list from raw entries, trimming them and dropping blank ones.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = lines
            .into_iter()
            .filter_map(|line| {
                let trimmed = line.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        Self { phrases }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.phrases.clear();
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.phrases.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_skips_blank_and_keeps_order() {
        let list = PhraseList::from_lines(["  Ace ", "", "   ", "Two", "Ace"]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some("Ace"));
        assert_eq!(list.get(1), Some("Two"));
        assert_eq!(list.get(2), Some("Ace"));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn test_clear() {
        let mut list = PhraseList::from_lines(["a", "b"]);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.get(0), None);
    }
}
