//! Word-boundary splitter.
//!
//! Splits text using the Unicode word boundary rules (UAX #29) and keeps only
//! segments that contain at least one alphanumeric character. In glob mode the
//! wildcard characters `*` and `?` are glued to the word they touch, so
//! `"data*"` survives as a single token. A `?` ending a word is read as a
//! question mark, not a wildcard.
//!
//! # Examples
//!
//! ```
//! use folio::analysis::tokenizer::Tokenizer;
//! use folio::analysis::tokenizer::splitter::Splitter;
//!
//! let splitter = Splitter::new();
//! let tokens: Vec<_> = splitter.tokenize("Hello, world! café").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "café");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{GLOB_CHARS, Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct Splitter;

impl Splitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Splitter
    }

    fn is_word(segment: &str) -> bool {
        segment.chars().any(char::is_alphanumeric)
    }

    fn is_wildcard(segment: &str) -> bool {
        segment.len() == 1 && segment.contains(GLOB_CHARS)
    }

    fn split(text: &str, keep_wildcards: bool) -> Vec<Token> {
        let mut tokens = Vec::new();
        // Byte range of the run currently being assembled.
        let mut run: Option<(usize, usize)> = None;
        let mut after_wildcard = false;

        let flush = |run: &mut Option<(usize, usize)>, tokens: &mut Vec<Token>| {
            if let Some((start, end)) = run.take() {
                let raw = &text[start..end];
                // A wildcard may extend a word but never start one, and a
                // trailing `?` is sentence punctuation.
                let leading = raw.trim_start_matches(GLOB_CHARS);
                let trimmed = leading.trim_end_matches('?');
                if Self::is_word(trimmed) {
                    let start = start + (raw.len() - leading.len());
                    let end = start + trimmed.len();
                    tokens.push(Token::with_offsets(trimmed, tokens.len(), start, end));
                }
            }
        };

        for (offset, segment) in text.split_word_bound_indices() {
            let end = offset + segment.len();
            let wildcard = keep_wildcards && Self::is_wildcard(segment);

            if !wildcard && !Self::is_word(segment) {
                flush(&mut run, &mut tokens);
                after_wildcard = false;
                continue;
            }

            // Touching word segments (e.g. CJK ideographs) stay separate
            // tokens unless a wildcard sits between them.
            if let Some((start, run_end)) = run {
                if run_end == offset && (wildcard || after_wildcard) {
                    run = Some((start, end));
                    after_wildcard = wildcard;
                    continue;
                }
            }
            flush(&mut run, &mut tokens);
            run = Some((offset, end));
            after_wildcard = wildcard;
        }
        flush(&mut run, &mut tokens);

        tokens
    }
}

impl Tokenizer for Splitter {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(Self::split(text, false).into_iter()))
    }

    fn tokenize_glob(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(Self::split(text, true).into_iter()))
    }

    fn name(&self) -> &'static str {
        "splitter"
    }
}
