//! Term ⇄ id mapping owned by a lexicon.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::WordId;

/// A monotonic vocabulary.
///
/// Ids are handed out from 1 upward in first-seen order and never reused, so
/// postings that reference them stay valid for the vocabulary's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// word -> id, sorted for prefix scans
    ids: BTreeMap<String, WordId>,
    /// id - 1 -> word
    words: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a word's id, assigning the next id if the word is new.
    pub fn get_or_insert(&mut self, word: &str) -> WordId {
        if let Some(&wid) = self.ids.get(word) {
            return wid;
        }
        self.words.push(word.to_string());
        let wid = self.words.len() as WordId;
        self.ids.insert(word.to_string(), wid);
        wid
    }

    /// Look up a word's id without assigning one.
    pub fn get(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// Resolve an id back to its word.
    pub fn word(&self, wid: WordId) -> Option<&str> {
        let idx = (wid as usize).checked_sub(1)?;
        self.words.get(idx).map(String::as_str)
    }

    /// All `(word, id)` pairs whose word starts with `prefix`, in word order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, WordId)> + 'a {
        self.ids
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(word, _)| word.starts_with(prefix))
            .map(|(word, &wid)| (word.as_str(), wid))
    }

    /// All words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// All ids in assignment order.
    pub fn word_ids(&self) -> impl Iterator<Item = WordId> {
        1..=self.words.len() as WordId
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        let mut vocabulary = Vocabulary::new();

        let cats = vocabulary.get_or_insert("cats");
        let dogs = vocabulary.get_or_insert("dogs");

        assert_eq!(cats, 1);
        assert_eq!(dogs, 2);
        assert_eq!(vocabulary.get_or_insert("cats"), cats);
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.word(dogs), Some("dogs"));
        assert_eq!(vocabulary.word(0), None);
        assert_eq!(vocabulary.word(3), None);
    }

    #[test]
    fn test_prefix_scan() {
        let mut vocabulary = Vocabulary::new();
        for word in ["rich", "rice", "rhyme", "riches", "ant"] {
            vocabulary.get_or_insert(word);
        }

        let matches: Vec<&str> = vocabulary.with_prefix("ric").map(|(w, _)| w).collect();
        assert_eq!(matches, vec!["rice", "rich", "riches"]);

        let all: Vec<&str> = vocabulary.with_prefix("").map(|(w, _)| w).collect();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_word_ids_follow_insertion_order() {
        let mut vocabulary = Vocabulary::new();
        vocabulary.get_or_insert("zeta");
        vocabulary.get_or_insert("alpha");

        let ids: Vec<WordId> = vocabulary.word_ids().collect();
        assert_eq!(ids, vec![1, 2]);
        let words: Vec<&str> = vocabulary.words().collect();
        assert_eq!(words, vec!["alpha", "zeta"]);
    }
}
