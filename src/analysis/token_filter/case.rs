//! Case normalization filter.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that lowercases every token.
///
/// ASCII tokens take a byte-wise fast path; everything else goes through
/// Unicode-aware lowercasing. Positions and offsets are preserved.
#[derive(Clone, Debug, Default)]
pub struct CaseNormalizer;

impl CaseNormalizer {
    /// Create a new case normalizer.
    pub fn new() -> Self {
        CaseNormalizer
    }

    fn normalize(text: &str) -> String {
        if text.is_ascii() {
            text.to_ascii_lowercase()
        } else {
            text.to_lowercase()
        }
    }
}

impl Filter for CaseNormalizer {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let text = Self::normalize(&token.text);
                token.with_text(text)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "case_normalizer"
    }
}
