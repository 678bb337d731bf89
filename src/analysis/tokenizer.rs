//! Tokenizer implementations for the first lexicon stage.
//!
//! Tokenizers turn raw text into a [`TokenStream`]. Every other stage of a
//! lexicon pipeline is a [`Filter`](crate::analysis::token_filter::Filter).
//!
//! # Examples
//!
//! ```
//! use folio::analysis::tokenizer::Tokenizer;
//! use folio::analysis::tokenizer::splitter::Splitter;
//!
//! let splitter = Splitter::new();
//! let tokens: Vec<_> = splitter.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a lexicon can sit behind a shared lock.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Tokenize a query, keeping wildcard characters attached to words.
    ///
    /// Tokenizers without wildcard support fall back to [`tokenize`](Self::tokenize).
    fn tokenize_glob(&self, text: &str) -> Result<TokenStream> {
        self.tokenize(text)
    }

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod splitter;

pub use splitter::Splitter;
