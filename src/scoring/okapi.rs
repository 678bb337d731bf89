//! Okapi BM25 inverted index.
//!
//! # Examples
//!
//! ```
//! use folio::analysis::Lexicon;
//! use folio::scoring::{OkapiIndex, ScoringIndex};
//!
//! let mut index = OkapiIndex::new(Lexicon::new().into_shared());
//! index.index_doc(1, "cats and dogs").unwrap();
//! index.index_doc(2, "dogs only").unwrap();
//!
//! let scores = index.search("cats").unwrap();
//! assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec![1]);
//! assert_eq!(index.document_count(), 2);
//! ```

use std::fmt;
use std::io::{Read, Write};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::lexicon::{Lexicon, SharedLexicon, Vocabulary};
use crate::error::{FolioError, Result};
use crate::scoring::{FromLexicon, ScoringIndex};
use crate::scoring::bm25::Bm25Config;
use crate::scoring::postings::PostingStore;
use crate::types::{DocId, DocIdSet, Scores, WordId};

/// Serializable state of an [`OkapiIndex`] together with its vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub config: Bm25Config,
    pub vocabulary: Vocabulary,
    pub postings: PostingStore,
}

impl IndexSnapshot {
    /// Write the snapshot as JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Read a snapshot written by [`write_json`](Self::write_json).
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let snapshot: IndexSnapshot = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the parameters, and that every stored word id is in the vocabulary.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        let known = 1..=self.vocabulary.len() as WordId;
        if let Some(wid) = self.postings.word_ids().find(|wid| !known.contains(wid)) {
            return Err(FolioError::index(format!(
                "word id {wid} is not in the snapshot vocabulary ({} words)",
                self.vocabulary.len()
            )));
        }
        Ok(())
    }
}

/// BM25-scored inverted index over a shared lexicon.
pub struct OkapiIndex {
    lexicon: SharedLexicon,
    config: Bm25Config,
    postings: PostingStore,
}

impl OkapiIndex {
    /// Create an engine with default BM25 parameters.
    pub fn new(lexicon: SharedLexicon) -> Self {
        OkapiIndex {
            lexicon,
            config: Bm25Config::default(),
            postings: PostingStore::new(),
        }
    }

    /// Create an engine with custom BM25 parameters.
    pub fn with_config(lexicon: SharedLexicon, config: Bm25Config) -> Result<Self> {
        config.validate()?;
        Ok(OkapiIndex {
            lexicon,
            config,
            postings: PostingStore::new(),
        })
    }

    /// Rebuild an engine, and a default-pipeline lexicon, from a snapshot.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self> {
        snapshot.validate()?;
        let lexicon = Lexicon::new()
            .with_vocabulary(snapshot.vocabulary)
            .into_shared();
        Ok(OkapiIndex {
            lexicon,
            config: snapshot.config,
            postings: snapshot.postings,
        })
    }

    /// Capture postings, statistics and vocabulary.
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            config: self.config,
            vocabulary: self.lexicon.read().vocabulary().clone(),
            postings: self.postings.clone(),
        }
    }

    /// Replace this engine's state, and its lexicon's vocabulary, with a snapshot.
    pub fn restore(&mut self, snapshot: IndexSnapshot) -> Result<()> {
        snapshot.validate()?;
        self.lexicon.write().set_vocabulary(snapshot.vocabulary);
        self.config = snapshot.config;
        self.postings = snapshot.postings;
        log::debug!(
            "restored index with {} documents",
            self.postings.document_count()
        );
        Ok(())
    }

    /// BM25 parameters in use.
    pub fn config(&self) -> &Bm25Config {
        &self.config
    }

    /// Token count of an indexed document.
    pub fn document_length(&self, docid: DocId) -> Option<u32> {
        self.postings.doc_length(docid)
    }

    /// Number of words with at least one posting.
    pub fn term_count(&self) -> usize {
        self.postings.term_count()
    }

    fn idf(&self, wid: WordId) -> f64 {
        self.config
            .idf(self.postings.doc_freq(wid), self.postings.document_count())
    }

    /// Per-document BM25 contribution of a single word.
    fn word_scores(&self, wid: WordId) -> impl Iterator<Item = (DocId, f64)> + '_ {
        let idf = self.idf(wid);
        let mean = self.postings.mean_doc_len();
        self.postings
            .postings(wid)
            .into_iter()
            .flat_map(|docs| docs.iter())
            .map(move |(&docid, &freq)| {
                let doc_len = self.postings.doc_length(docid).unwrap_or(0);
                (docid, idf * self.config.tf(freq, doc_len, mean))
            })
    }

    /// Union of the given words' postings, summing scores.
    ///
    /// Each distinct word counts once, matching [`query_weight`](ScoringIndex::query_weight).
    fn union(&self, wids: &[WordId]) -> Scores {
        let mut scores = Scores::new();
        for wid in Self::distinct(wids) {
            for (docid, score) in self.word_scores(wid) {
                *scores.entry(docid).or_insert(0.0) += score;
            }
        }
        scores
    }

    fn distinct(wids: &[WordId]) -> Vec<WordId> {
        let mut distinct = wids.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        distinct
    }

    fn contains_run(words: &[WordId], phrase: &[WordId]) -> bool {
        words.windows(phrase.len()).any(|window| window == phrase)
    }
}

impl ScoringIndex for OkapiIndex {
    fn lexicon(&self) -> &SharedLexicon {
        &self.lexicon
    }

    fn index_doc(&mut self, docid: DocId, text: &str) -> Result<()> {
        let wids = self.lexicon.write().source_to_word_ids(text)?;
        let len = wids.len();
        let is_new = self.postings.insert(docid, wids);
        log::debug!(
            "{} document {docid} ({len} words)",
            if is_new { "indexed" } else { "re-indexed" }
        );
        Ok(())
    }

    fn unindex_doc(&mut self, docid: DocId) -> Result<()> {
        if self.postings.remove(docid).is_some() {
            log::debug!("unindexed document {docid}");
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.postings.clear();
        log::debug!("cleared index");
    }

    fn search(&self, query: &str) -> Result<Scores> {
        let wids: Vec<WordId> = self
            .lexicon
            .read()
            .term_to_word_ids(query)?
            .into_iter()
            .flatten()
            .collect();
        log::trace!("search {query:?} -> {} known words", wids.len());
        Ok(self.union(&wids))
    }

    fn search_phrase(&self, phrase: &str) -> Result<Scores> {
        let resolved = self.lexicon.read().term_to_word_ids(phrase)?;
        let Some(wids) = resolved.into_iter().collect::<Option<Vec<WordId>>>() else {
            log::trace!("phrase {phrase:?} has unknown words");
            return Ok(Scores::new());
        };
        if wids.is_empty() {
            return Ok(Scores::new());
        }

        // Candidates must contain every word; start from the rarest one.
        let mut distinct = Self::distinct(&wids);
        distinct.sort_by_key(|&wid| self.postings.doc_freq(wid));
        let Some(candidates) = self.postings.postings(distinct[0]) else {
            return Ok(Scores::new());
        };
        let matching: AHashSet<DocId> = candidates
            .keys()
            .copied()
            .filter(|&docid| {
                distinct[1..].iter().all(|&wid| {
                    self.postings
                        .postings(wid)
                        .is_some_and(|docs| docs.contains_key(&docid))
                })
            })
            .filter(|&docid| {
                self.postings
                    .doc_words(docid)
                    .is_some_and(|words| Self::contains_run(words, &wids))
            })
            .collect();

        let mut scores = Scores::new();
        for &wid in &distinct {
            for (docid, score) in self.word_scores(wid) {
                if matching.contains(&docid) {
                    *scores.entry(docid).or_insert(0.0) += score;
                }
            }
        }
        log::trace!("phrase {phrase:?} -> {} documents", scores.len());
        Ok(scores)
    }

    fn search_glob(&self, pattern: &str) -> Result<Scores> {
        let wids = self.lexicon.read().glob_to_word_ids(pattern)?;
        log::trace!("glob {pattern:?} -> {} words", wids.len());
        Ok(self.union(&wids))
    }

    fn query_weight(&self, terms: &[String]) -> Result<f64> {
        let lexicon = self.lexicon.read();
        let mut wids = Vec::new();
        for term in terms {
            if Lexicon::is_glob(term) {
                wids.extend(lexicon.glob_to_word_ids(term)?);
            } else {
                wids.extend(lexicon.term_to_word_ids(term)?.into_iter().flatten());
            }
        }
        let max_tf = self.config.max_tf();
        Ok(Self::distinct(&wids)
            .into_iter()
            .map(|wid| self.idf(wid) * max_tf)
            .sum())
    }

    fn document_count(&self) -> usize {
        self.postings.document_count()
    }

    fn word_count(&self) -> u64 {
        self.postings.word_count()
    }

    fn has_doc(&self, docid: DocId) -> bool {
        self.postings.contains(docid)
    }

    fn docids(&self) -> DocIdSet {
        self.postings.docids().collect()
    }
}

impl FromLexicon for OkapiIndex {
    fn from_lexicon(lexicon: SharedLexicon, config: Bm25Config) -> Result<Self> {
        Self::with_config(lexicon, config)
    }
}

impl Default for OkapiIndex {
    fn default() -> Self {
        Self::new(Lexicon::new().into_shared())
    }
}

impl fmt::Debug for OkapiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OkapiIndex")
            .field("config", &self.config)
            .field("documents", &self.postings.document_count())
            .field("words", &self.postings.word_count())
            .finish()
    }
}
