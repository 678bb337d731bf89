//! Stop word removal filter.
//!
//! # Examples
//!
//! ```
//! use folio::analysis::token::Token;
//! use folio::analysis::token_filter::Filter;
//! use folio::analysis::token_filter::stop::StopWordRemover;
//!
//! let filter = StopWordRemover::new();
//! let tokens = vec![
//!     Token::new("now", 0),
//!     Token::new("is", 1),
//!     Token::new("the", 2),
//!     Token::new("time", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "now");
//! assert_eq!(result[1].text, "time");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words.
///
/// Matching is exact, so this filter belongs after case normalization.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "co", "corp", "could", "for", "from", "had", "has", "have", "he",
    "her", "his", "if", "in", "inc", "into", "is", "it", "its", "last", "more", "most", "mr",
    "mrs", "ms", "mz", "no", "not", "of", "on", "one", "only", "or", "other", "out", "over", "s",
    "says", "she", "so", "some", "such", "than", "that", "the", "their", "there", "they", "this",
    "to", "up", "was", "we", "were", "when", "which", "who", "will", "with", "would",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that drops tokens found in a fixed stop word set.
#[derive(Clone, Debug)]
pub struct StopWordRemover {
    stop_words: Arc<HashSet<String>>,
}

impl StopWordRemover {
    /// Create a new remover with the default English stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a new remover with a custom stop word set.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopWordRemover {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new remover from a list of words.
    ///
    /// ```
    /// use folio::analysis::token_filter::stop::StopWordRemover;
    ///
    /// let filter = StopWordRemover::from_words(vec!["foo", "bar", "baz"]);
    /// assert_eq!(filter.len(), 3);
    /// assert!(filter.is_stop_word("bar"));
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopWordRemover {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopWordRemover {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop_word_remover"
    }
}
