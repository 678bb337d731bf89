//! The lexicon: a text pipeline plus a persistent vocabulary.
//!
//! The same pipeline runs for documents and for queries, so a query term can
//! only ever match what indexing produced. Indexing grows the vocabulary;
//! querying only reads it.
//!
//! ```text
//! text → Splitter → CaseNormalizer → StopWordRemover → words → word ids
//! ```
//!
//! # Examples
//!
//! ```
//! use folio::analysis::lexicon::Lexicon;
//!
//! let mut lexicon = Lexicon::new();
//! let wids = lexicon.source_to_word_ids("Now is the time").unwrap();
//! assert_eq!(wids.len(), 2);
//!
//! assert_eq!(lexicon.parse_terms("The TIME").unwrap(), vec!["time"]);
//! assert_eq!(lexicon.term_to_word_ids("time later").unwrap(), vec![Some(2), None]);
//! ```

pub mod vocabulary;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::analysis::token::{GLOB_CHARS, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::case::CaseNormalizer;
use crate::analysis::token_filter::stop::StopWordRemover;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::splitter::Splitter;
use crate::analysis::wildcard::WildcardPattern;
use crate::error::Result;
use crate::types::WordId;

pub use vocabulary::Vocabulary;

/// A lexicon shared between a catalog index and its scoring engine.
pub type SharedLexicon = Arc<RwLock<Lexicon>>;

/// Tokenization pipeline plus term vocabulary.
pub struct Lexicon {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    vocabulary: Vocabulary,
}

impl Lexicon {
    /// Create a lexicon with the default three-stage pipeline.
    pub fn new() -> Self {
        Self::with_pipeline(
            Arc::new(Splitter::new()),
            vec![
                Arc::new(CaseNormalizer::new()),
                Arc::new(StopWordRemover::new()),
            ],
        )
    }

    /// Create a lexicon with a custom pipeline.
    pub fn with_pipeline(tokenizer: Arc<dyn Tokenizer>, filters: Vec<Arc<dyn Filter>>) -> Self {
        Lexicon {
            tokenizer,
            filters,
            vocabulary: Vocabulary::new(),
        }
    }

    /// Replace the vocabulary, e.g. when restoring a snapshot.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Swap in another vocabulary, keeping the pipeline.
    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) {
        self.vocabulary = vocabulary;
    }

    /// Wrap this lexicon for sharing.
    pub fn into_shared(self) -> SharedLexicon {
        Arc::new(RwLock::new(self))
    }

    /// Get the tokenizer stage.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filter stages, in application order.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Names of every pipeline stage, in application order.
    pub fn pipeline_names(&self) -> Vec<&'static str> {
        std::iter::once(self.tokenizer.name())
            .chain(self.filters.iter().map(|f| f.name()))
            .collect()
    }

    /// Get the vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn run(&self, mut tokens: TokenStream) -> Result<Vec<String>> {
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens.map(|token| token.text).collect())
    }

    /// Run the pipeline over document text.
    pub fn analyze(&self, text: &str) -> Result<Vec<String>> {
        self.run(self.tokenizer.tokenize(text)?)
    }

    /// Run the pipeline over query text, keeping wildcard characters.
    pub fn parse_terms(&self, text: &str) -> Result<Vec<String>> {
        self.run(self.tokenizer.tokenize_glob(text)?)
    }

    /// Whether a parsed term is a wildcard pattern.
    pub fn is_glob(term: &str) -> bool {
        term.contains(GLOB_CHARS)
    }

    /// Turn document text into word ids, growing the vocabulary as needed.
    ///
    /// The result keeps document order and repetitions.
    pub fn source_to_word_ids(&mut self, text: &str) -> Result<Vec<WordId>> {
        let words = self.analyze(text)?;
        Ok(words
            .iter()
            .map(|word| self.vocabulary.get_or_insert(word))
            .collect())
    }

    /// Turn query text into word ids without touching the vocabulary.
    ///
    /// Unknown words map to `None` so callers can tell a partial match apart.
    pub fn term_to_word_ids(&self, text: &str) -> Result<Vec<Option<WordId>>> {
        let words = self.analyze(text)?;
        Ok(words.iter().map(|word| self.vocabulary.get(word)).collect())
    }

    /// Expand a query that may contain wildcards into known word ids.
    ///
    /// Plain terms resolve exactly; glob terms match every vocabulary word that
    /// fits the pattern. The result is sorted and free of duplicates.
    pub fn glob_to_word_ids(&self, pattern: &str) -> Result<Vec<WordId>> {
        let mut wids = Vec::new();
        for term in self.parse_terms(pattern)? {
            if !Self::is_glob(&term) {
                wids.extend(self.vocabulary.get(&term));
                continue;
            }
            let compiled = WildcardPattern::new(term.as_str())?;
            wids.extend(
                self.vocabulary
                    .with_prefix(compiled.literal_prefix())
                    .filter(|(word, _)| compiled.matches(word))
                    .map(|(_, wid)| wid),
            );
        }
        wids.sort_unstable();
        wids.dedup();
        Ok(wids)
    }

    /// Resolve an id back to its word.
    pub fn word(&self, wid: WordId) -> Option<&str> {
        self.vocabulary.word(wid)
    }

    /// Look up the id of an already-normalized word.
    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.vocabulary.get(word)
    }

    /// All known words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.words()
    }

    /// All assigned ids in assignment order.
    pub fn word_ids(&self) -> impl Iterator<Item = WordId> {
        self.vocabulary.word_ids()
    }

    /// Number of distinct words seen so far.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon")
            .field("pipeline", &self.pipeline_names())
            .field("words", &self.vocabulary.len())
            .finish()
    }
}
