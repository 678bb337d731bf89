//! Token filter implementations for the lexicon pipeline.
//!
//! Filters receive the stream produced by the previous stage and return a new
//! one. The default lexicon chains them like this:
//!
//! ```text
//! Splitter → CaseNormalizer → StopWordRemover → vocabulary
//! ```
//!
//! # Examples
//!
//! ```
//! use folio::analysis::token::Token;
//! use folio::analysis::token_filter::Filter;
//! use folio::analysis::token_filter::case::CaseNormalizer;
//!
//! let filter = CaseNormalizer::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod case;
pub mod stop;

pub use case::CaseNormalizer;
pub use stop::StopWordRemover;
