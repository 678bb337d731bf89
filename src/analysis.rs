//! Text analysis: tokens, pipeline stages, wildcard patterns and the lexicon.

pub mod lexicon;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod wildcard;

pub use lexicon::{Lexicon, SharedLexicon, Vocabulary};
pub use token::{Token, TokenStream};
pub use token_filter::{CaseNormalizer, Filter, StopWordRemover};
pub use tokenizer::{Splitter, Tokenizer};
pub use wildcard::WildcardPattern;
