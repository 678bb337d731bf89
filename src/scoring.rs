//! Inverted index engines that score documents against free-text queries.
//!
//! An engine owns postings keyed by word id and the per-document statistics a
//! relevance function needs. It shares its [`Lexicon`](crate::analysis::Lexicon)
//! with whoever created it, so the catalog layer and the engine always agree
//! on how text becomes word ids.

pub mod bm25;
pub mod okapi;
pub mod postings;

use std::fmt::Debug;

use crate::analysis::lexicon::SharedLexicon;
use crate::error::Result;
use crate::types::{DocId, DocIdSet, Scores};

pub use bm25::Bm25Config;
pub use okapi::{IndexSnapshot, OkapiIndex};
pub use postings::PostingStore;

/// Trait for relevance-scoring inverted indexes.
pub trait ScoringIndex: Send + Sync + Debug {
    /// The lexicon this engine tokenizes with.
    fn lexicon(&self) -> &SharedLexicon;

    /// Index (or re-index) a document's text.
    fn index_doc(&mut self, docid: DocId, text: &str) -> Result<()>;

    /// Remove a document. Unknown ids are ignored.
    fn unindex_doc(&mut self, docid: DocId) -> Result<()>;

    /// Drop every document. The vocabulary is left alone.
    fn clear(&mut self);

    /// Free-text search: documents matching any known query term.
    fn search(&self, query: &str) -> Result<Scores>;

    /// Documents containing every term of `phrase` contiguously and in order.
    fn search_phrase(&self, phrase: &str) -> Result<Scores>;

    /// Documents matching any vocabulary word that fits a wildcard pattern.
    fn search_glob(&self, pattern: &str) -> Result<Scores>;

    /// The maximal score the given query terms can reach.
    ///
    /// `0.0` when none of the terms is known.
    fn query_weight(&self, terms: &[String]) -> Result<f64>;

    /// Number of documents with indexed text.
    fn document_count(&self) -> usize;

    /// Sum of all document lengths.
    fn word_count(&self) -> u64;

    /// Whether a document has indexed text.
    fn has_doc(&self, docid: DocId) -> bool;

    /// Ids of every document with indexed text.
    fn docids(&self) -> DocIdSet;
}

/// Engines that can be created around an existing lexicon.
pub trait FromLexicon: ScoringIndex + Sized {
    fn from_lexicon(lexicon: SharedLexicon, config: Bm25Config) -> Result<Self>;
}
