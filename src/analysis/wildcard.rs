//! Wildcard patterns used to expand glob terms against the vocabulary.
//!
//! Supports the following wildcards:
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//! - `\*` and `\?` match literal `*` and `?` characters

use regex::Regex;

use crate::error::{FolioError, Result};

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
    prefix: String,
}

impl WildcardPattern {
    /// Compile a wildcard pattern.
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self> {
        let pattern = pattern.into();
        let (regex_pattern, prefix) = Self::translate(&pattern);
        let regex = Regex::new(&regex_pattern)
            .map_err(|e| FolioError::analysis(format!("Invalid wildcard pattern: {e}")))?;

        Ok(WildcardPattern {
            pattern,
            regex,
            prefix,
        })
    }

    /// Get the source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The literal text before the first wildcard.
    ///
    /// Every matching word starts with this prefix, which lets callers narrow a
    /// sorted vocabulary before running the regex.
    pub fn literal_prefix(&self) -> &str {
        &self.prefix
    }

    /// Check if a word matches the pattern.
    pub fn matches(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }

    /// Build an anchored regex and the literal prefix in one pass.
    fn translate(pattern: &str) -> (String, String) {
        let mut regex_pattern = String::with_capacity(pattern.len() + 8);
        let mut prefix = String::new();
        let mut in_prefix = true;
        regex_pattern.push('^');

        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => {
                        regex_pattern.push_str(&regex::escape(&escaped.to_string()));
                        if in_prefix {
                            prefix.push(escaped);
                        }
                    }
                    None => {
                        regex_pattern.push_str(r"\\");
                        if in_prefix {
                            prefix.push('\\');
                        }
                    }
                },
                '*' => {
                    regex_pattern.push_str(".*");
                    in_prefix = false;
                }
                '?' => {
                    regex_pattern.push('.');
                    in_prefix = false;
                }
                c => {
                    regex_pattern.push_str(&regex::escape(&c.to_string()));
                    if in_prefix {
                        prefix.push(c);
                    }
                }
            }
        }

        regex_pattern.push('$');
        (regex_pattern, prefix)
    }
}
