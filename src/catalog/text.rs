//! Full-text catalog index.
//!
//! [`TextIndex`] ties a discriminator, a lexicon and a scoring engine
//! together. It tracks every document it was asked to index in a membership
//! set, whether or not a text value was found, so "does not contain" queries
//! also return documents that have no text at all.
//!
//! # Examples
//!
//! ```
//! use folio::catalog::{CatalogIndex, Discriminator, IndexValue, TextIndex};
//!
//! let discriminator = Discriminator::<str>::callable(|text| Some(IndexValue::from(text)));
//! let mut index = TextIndex::new(discriminator).unwrap();
//!
//! index.index_doc(1, "now is the time").unwrap();
//! index.index_doc(2, "the time has come").unwrap();
//! index.index_doc(3, "something else").unwrap();
//!
//! let results = index.apply("time").unwrap();
//! assert_eq!(index.sort(results, Some(1), false).unwrap().len(), 1);
//!
//! let rest = index.apply_does_not_contain("time").unwrap();
//! assert_eq!(rest.docids().into_iter().collect::<Vec<_>>(), vec![3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::lexicon::{Lexicon, SharedLexicon};
use crate::catalog::discriminator::{Attributes, Discriminator, IndexValue};
use crate::catalog::{CatalogIndex, Operator};
use crate::error::{FolioError, Result};
use crate::scoring::bm25::Bm25Config;
use crate::scoring::okapi::{IndexSnapshot, OkapiIndex};
use crate::scoring::{FromLexicon, ScoringIndex};
use crate::types::{DocId, DocIdSet, ResultSet, Scores};

/// Score given to every match when normalization produces nonsense.
pub const DEFAULT_FALLBACK_SCORE: f64 = (i32::MAX / 10) as f64;

const SUPPORTED_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::DoesNotContain,
    Operator::Eq,
    Operator::Sort,
];

/// Configuration for a [`TextIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextIndexConfig {
    /// Parameters for an engine the index creates itself.
    pub bm25: Bm25Config,

    /// Score substituted when raw scores cannot be normalized.
    pub fallback_score: f64,
}

impl Default for TextIndexConfig {
    fn default() -> Self {
        TextIndexConfig {
            bm25: Bm25Config::default(),
            fallback_score: DEFAULT_FALLBACK_SCORE,
        }
    }
}

impl TextIndexConfig {
    pub fn validate(&self) -> Result<()> {
        self.bm25.validate()?;
        if !self.fallback_score.is_finite() {
            return Err(FolioError::configuration(format!(
                "fallback score must be finite, got {}",
                self.fallback_score
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TextIndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json_str`](Self::from_json_str), reading from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: TextIndexConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// Serializable state of a [`TextIndex`]: membership plus the engine snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextIndexSnapshot {
    pub config: TextIndexConfig,
    pub docids: DocIdSet,
    pub index: IndexSnapshot,
}

impl TextIndexSnapshot {
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        self.index.validate()
    }

    /// Write the snapshot as JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Read a snapshot written by [`write_json`](Self::write_json).
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let snapshot: TextIndexSnapshot = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// How a query string is answered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind<'q> {
    /// `"a b c"`: contiguous match of the quoted text.
    Phrase(&'q str),
    /// A term carries `*` or `?`.
    Glob,
    Text,
}

/// Builder for [`TextIndex`].
///
/// Without a lexicon or an engine, a default lexicon and an [`OkapiIndex`]
/// over it are created. A lexicon alone gets a new engine built on it; an
/// engine alone lends the index its own lexicon. Documents already in a
/// supplied engine become members of the index.
pub struct TextIndexBuilder<O: ?Sized, E = OkapiIndex> {
    discriminator: Discriminator<O>,
    lexicon: Option<SharedLexicon>,
    index: Option<E>,
    config: TextIndexConfig,
}

impl<O: ?Sized, E: FromLexicon> TextIndexBuilder<O, E> {
    /// Use an existing lexicon.
    pub fn lexicon(mut self, lexicon: SharedLexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Use an existing engine, possibly of another type.
    pub fn index<F: FromLexicon>(self, index: F) -> TextIndexBuilder<O, F> {
        TextIndexBuilder {
            discriminator: self.discriminator,
            lexicon: self.lexicon,
            index: Some(index),
            config: self.config,
        }
    }

    pub fn config(mut self, config: TextIndexConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TextIndex<O, E>> {
        self.config.validate()?;

        let (lexicon, index) = match (self.lexicon, self.index) {
            (Some(lexicon), Some(index)) => {
                if !Arc::ptr_eq(&lexicon, index.lexicon()) {
                    log::debug!("text index and its engine use different lexicons");
                }
                (lexicon, index)
            }
            (Some(lexicon), None) => {
                let index = E::from_lexicon(Arc::clone(&lexicon), self.config.bm25)?;
                (lexicon, index)
            }
            (None, Some(index)) => (Arc::clone(index.lexicon()), index),
            (None, None) => {
                let lexicon = Lexicon::new().into_shared();
                let index = E::from_lexicon(Arc::clone(&lexicon), self.config.bm25)?;
                (lexicon, index)
            }
        };

        let docids = index.docids();
        if !docids.is_empty() {
            log::debug!("text index adopts {} documents from its engine", docids.len());
        }

        Ok(TextIndex {
            discriminator: self.discriminator,
            lexicon,
            index,
            docids,
            config: self.config,
        })
    }
}

/// Catalog index answering free-text queries with normalized relevance scores.
pub struct TextIndex<O: ?Sized, E = OkapiIndex> {
    discriminator: Discriminator<O>,
    lexicon: SharedLexicon,
    index: E,
    /// Every document ever indexed and not since unindexed.
    docids: DocIdSet,
    config: TextIndexConfig,
}

impl<O: ?Sized> TextIndex<O> {
    /// Create an index with a default lexicon and engine.
    pub fn new(discriminator: Discriminator<O>) -> Result<Self> {
        Self::builder(discriminator).build()
    }

    pub fn builder(discriminator: Discriminator<O>) -> TextIndexBuilder<O> {
        TextIndexBuilder {
            discriminator,
            lexicon: None,
            index: None,
            config: TextIndexConfig::default(),
        }
    }

    /// Rebuild an index, with a default-pipeline lexicon, from a snapshot.
    pub fn from_snapshot(
        discriminator: Discriminator<O>,
        snapshot: TextIndexSnapshot,
    ) -> Result<Self> {
        snapshot.config.validate()?;
        let engine = OkapiIndex::from_snapshot(snapshot.index)?;
        let mut index = Self::builder(discriminator)
            .index(engine)
            .config(snapshot.config)
            .build()?;
        index.docids.extend(snapshot.docids);
        Ok(index)
    }

    /// Capture membership, configuration and the engine state.
    pub fn snapshot(&self) -> TextIndexSnapshot {
        TextIndexSnapshot {
            config: self.config,
            docids: self.docids.clone(),
            index: self.index.snapshot(),
        }
    }

    /// Replace membership, configuration and engine state with a snapshot.
    pub fn restore(&mut self, snapshot: TextIndexSnapshot) -> Result<()> {
        snapshot.config.validate()?;
        self.index.restore(snapshot.index)?;
        self.docids = snapshot.docids;
        self.docids.extend(self.index.docids());
        self.config = snapshot.config;
        Ok(())
    }
}

impl<O: ?Sized, E: ScoringIndex> TextIndex<O, E> {
    pub fn lexicon(&self) -> &SharedLexicon {
        &self.lexicon
    }

    /// The scoring engine.
    pub fn index(&self) -> &E {
        &self.index
    }

    pub fn config(&self) -> &TextIndexConfig {
        &self.config
    }

    /// Number of documents with indexed text.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Total number of words over all indexed documents.
    pub fn word_count(&self) -> u64 {
        self.index.word_count()
    }

    /// Every member document, with or without text.
    pub fn docids(&self) -> &DocIdSet {
        &self.docids
    }

    /// Members whose text reached the engine.
    pub fn indexed(&self) -> DocIdSet {
        self.docids
            .iter()
            .copied()
            .filter(|&docid| self.index.has_doc(docid))
            .collect()
    }

    /// Members without text.
    pub fn not_indexed(&self) -> DocIdSet {
        self.docids
            .iter()
            .copied()
            .filter(|&docid| !self.index.has_doc(docid))
            .collect()
    }

    pub fn docids_count(&self) -> usize {
        self.docids.len()
    }

    pub fn indexed_count(&self) -> usize {
        self.indexed().len()
    }

    pub fn not_indexed_count(&self) -> usize {
        self.not_indexed().len()
    }

    fn query_kind<'q>(query: &'q str, terms: &[String]) -> QueryKind<'q> {
        let trimmed = query.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            return QueryKind::Phrase(&trimmed[1..trimmed.len() - 1]);
        }
        if terms.iter().any(|term| Lexicon::is_glob(term)) {
            return QueryKind::Glob;
        }
        QueryKind::Text
    }

    /// Divide raw scores by the query weight.
    fn normalize(&self, raw: Scores, query_weight: f64) -> Scores {
        let divisor = if query_weight == 0.0 { 1.0 } else { query_weight };
        let normalized: Option<Scores> = raw
            .iter()
            .map(|(&docid, &score)| {
                let ratio = score / divisor;
                ratio.is_finite().then_some((docid, ratio))
            })
            .collect();

        normalized.unwrap_or_else(|| {
            log::warn!(
                "cannot normalize scores by query weight {query_weight}, using fallback score {}",
                self.config.fallback_score
            );
            raw.into_keys()
                .map(|docid| (docid, self.config.fallback_score))
                .collect()
        })
    }
}

impl<O, E> CatalogIndex<O> for TextIndex<O, E>
where
    O: ?Sized + Attributes,
    E: ScoringIndex,
{
    type Query = str;

    fn type_name(&self) -> &'static str {
        "TextIndex"
    }

    fn discriminator(&self) -> &Discriminator<O> {
        &self.discriminator
    }

    fn supported_operators(&self) -> &'static [Operator] {
        SUPPORTED_OPERATORS
    }

    fn index_value(&mut self, docid: DocId, value: IndexValue) -> Result<()> {
        let text = value.as_text().ok_or_else(|| {
            FolioError::validation(format!("Catalog cannot index {} value", value.kind()))
        })?;
        self.index.index_doc(docid, &text)?;
        self.docids.insert(docid);
        Ok(())
    }

    fn unindex_doc(&mut self, docid: DocId) -> Result<()> {
        self.docids.remove(&docid);
        self.index.unindex_doc(docid)
    }

    fn clear(&mut self) -> Result<()> {
        self.docids.clear();
        self.index.clear();
        Ok(())
    }

    /// Index an object. The document stays a member even without a value.
    fn index_doc(&mut self, docid: DocId, object: &O) -> Result<()> {
        let value = self.discriminate(object)?;
        self.docids.insert(docid);
        match value {
            None => self.index.unindex_doc(docid),
            Some(value) => self.index_value(docid, value),
        }
    }

    /// Indexing replaces previous postings, so re-indexing is plain indexing.
    fn reindex_doc(&mut self, docid: DocId, object: &O) -> Result<()> {
        self.index_doc(docid, object)
    }

    fn apply(&self, query: &str) -> Result<ResultSet> {
        let terms = self.lexicon.read().parse_terms(query)?;
        let raw = match Self::query_kind(query, &terms) {
            QueryKind::Phrase(phrase) => self.index.search_phrase(phrase)?,
            QueryKind::Glob => self.index.search_glob(query)?,
            QueryKind::Text => self.index.search(query)?,
        };
        if raw.is_empty() {
            return Ok(ResultSet::Scored(raw));
        }

        let query_weight = self.index.query_weight(&terms)?;
        log::trace!(
            "{query:?} matched {} documents, query weight {query_weight}",
            raw.len()
        );
        Ok(ResultSet::Scored(self.normalize(raw, query_weight)))
    }

    fn apply_contains(&self, query: &str) -> Result<ResultSet> {
        self.apply(query)
    }

    fn apply_eq(&self, query: &str) -> Result<ResultSet> {
        self.apply(query)
    }

    fn apply_does_not_contain(&self, query: &str) -> Result<ResultSet> {
        let matches = self.apply(query)?;
        Ok(ResultSet::Unscored(
            self.docids
                .iter()
                .copied()
                .filter(|&docid| !matches.contains(docid))
                .collect(),
        ))
    }

    fn sort(&self, results: ResultSet, limit: Option<usize>, reverse: bool) -> Result<Vec<DocId>> {
        let scores = match results {
            ResultSet::Scored(scores) => scores,
            ResultSet::Unscored(ids) if ids.is_empty() => return Ok(Vec::new()),
            ResultSet::Unscored(_) => {
                return Err(FolioError::type_mismatch(
                    "Unable to sort by relevance because the search result does not contain weights",
                ));
            }
        };

        let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
        ranked.sort_by(|(a_id, a_score), (b_id, b_score)| {
            let by_score = if reverse {
                a_score.total_cmp(b_score)
            } else {
                b_score.total_cmp(a_score)
            };
            match by_score {
                Ordering::Equal => a_id.cmp(b_id),
                other => other,
            }
        });
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        Ok(ranked.into_iter().map(|(docid, _)| docid).collect())
    }
}

impl<O: ?Sized, E: fmt::Debug> fmt::Debug for TextIndex<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextIndex")
            .field("discriminator", &self.discriminator)
            .field("index", &self.index)
            .field("docids", &self.docids.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    /// Engine returning canned results and recording what it was asked.
    #[derive(Debug)]
    struct RecordingEngine {
        lexicon: SharedLexicon,
        results: Scores,
        weight: f64,
        fail_unindex: bool,
        indexed: Vec<(DocId, String)>,
        unindexed: Vec<DocId>,
        cleared: bool,
        searched: Mutex<Vec<String>>,
        weighted: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingEngine {
        fn new(lexicon: SharedLexicon) -> Self {
            RecordingEngine {
                lexicon,
                results: Scores::from([(1, 14.0), (2, 7.4), (3, 3.2)]),
                weight: 42.0,
                fail_unindex: false,
                indexed: Vec::new(),
                unindexed: Vec::new(),
                cleared: false,
                searched: Mutex::new(Vec::new()),
                weighted: Mutex::new(Vec::new()),
            }
        }

        fn with_results(mut self, results: Scores) -> Self {
            self.results = results;
            self
        }

        fn with_weight(mut self, weight: f64) -> Self {
            self.weight = weight;
            self
        }

        fn record_search(&self, query: &str) -> Result<Scores> {
            self.searched.lock().push(query.to_string());
            Ok(self.results.clone())
        }
    }

    impl ScoringIndex for RecordingEngine {
        fn lexicon(&self) -> &SharedLexicon {
            &self.lexicon
        }

        fn index_doc(&mut self, docid: DocId, text: &str) -> Result<()> {
            self.indexed.push((docid, text.to_string()));
            Ok(())
        }

        fn unindex_doc(&mut self, docid: DocId) -> Result<()> {
            if self.fail_unindex {
                return Err(FolioError::index("unindex_doc must not be called"));
            }
            self.unindexed.push(docid);
            Ok(())
        }

        fn clear(&mut self) {
            self.cleared = true;
        }

        fn search(&self, query: &str) -> Result<Scores> {
            self.record_search(query)
        }

        fn search_phrase(&self, phrase: &str) -> Result<Scores> {
            self.record_search(phrase)
        }

        fn search_glob(&self, pattern: &str) -> Result<Scores> {
            self.record_search(pattern)
        }

        fn query_weight(&self, terms: &[String]) -> Result<f64> {
            self.weighted.lock().push(terms.to_vec());
            Ok(self.weight)
        }

        fn document_count(&self) -> usize {
            4
        }

        fn word_count(&self) -> u64 {
            45
        }

        fn has_doc(&self, docid: DocId) -> bool {
            self.indexed.iter().any(|(id, _)| *id == docid)
        }

        fn docids(&self) -> DocIdSet {
            self.indexed.iter().map(|(id, _)| *id).collect()
        }
    }

    impl FromLexicon for RecordingEngine {
        fn from_lexicon(lexicon: SharedLexicon, _config: Bm25Config) -> Result<Self> {
            Ok(Self::new(lexicon))
        }
    }

    fn identity() -> Discriminator<str> {
        Discriminator::callable(|text: &str| Some(IndexValue::from(text)))
    }

    fn recording(engine: RecordingEngine) -> TextIndex<str, RecordingEngine> {
        TextIndex::builder(identity()).index(engine).build().unwrap()
    }

    #[test]
    fn test_defaults_share_one_lexicon() {
        let index = TextIndex::new(identity()).unwrap();

        assert!(Arc::ptr_eq(index.lexicon(), index.index().lexicon()));
        assert_eq!(
            index.lexicon().read().pipeline_names(),
            vec!["splitter", "case_normalizer", "stop_word_remover"]
        );
        assert_eq!(index.config(), &TextIndexConfig::default());
    }

    #[test]
    fn test_explicit_lexicon_gets_default_engine() {
        let lexicon = Lexicon::new().into_shared();
        let index = TextIndex::builder(identity())
            .lexicon(Arc::clone(&lexicon))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(index.lexicon(), &lexicon));
        assert!(Arc::ptr_eq(index.index().lexicon(), &lexicon));
    }

    #[test]
    fn test_explicit_engine_lends_its_lexicon() {
        let lexicon = Lexicon::new().into_shared();
        let index = recording(RecordingEngine::new(Arc::clone(&lexicon)));

        assert!(Arc::ptr_eq(index.lexicon(), &lexicon));
    }

    #[test]
    fn test_explicit_lexicon_and_engine_are_kept() {
        let lexicon = Lexicon::new().into_shared();
        let other = Lexicon::new().into_shared();
        let index = TextIndex::builder(identity())
            .lexicon(Arc::clone(&lexicon))
            .index(RecordingEngine::new(Arc::clone(&other)))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(index.lexicon(), &lexicon));
        assert!(Arc::ptr_eq(index.index().lexicon(), &other));
    }

    #[test]
    fn test_index_doc_passes_text_to_engine() {
        let mut index = recording(RecordingEngine::new(Lexicon::new().into_shared()));

        index.index_doc(1, "cats and dogs").unwrap();

        assert_eq!(index.index().indexed, vec![(1, "cats and dogs".to_string())]);
        assert!(index.docids().contains(&1));
    }

    #[test]
    fn test_explicit_engine_documents_become_members() {
        let mut engine = RecordingEngine::new(Lexicon::new().into_shared());
        engine.index_doc(1, "cats").unwrap();
        engine.index_doc(2, "dogs").unwrap();
        let engine = engine.with_results(Scores::from([(1, 3.0)]));

        let index = recording(engine);

        assert_eq!(index.docids(), &DocIdSet::from([1, 2]));
        assert_eq!(index.not_indexed_count(), 0);
        assert_eq!(
            index.apply_does_not_contain("cats").unwrap(),
            ResultSet::from(vec![2])
        );
    }

    #[test]
    fn test_snapshot_keeps_members_without_text() {
        let mut index = TextIndex::new(Discriminator::callable(|text: &str| {
            (!text.is_empty()).then(|| IndexValue::from(text))
        }))
        .unwrap();
        index.index_doc(1, "cats").unwrap();
        index.index_doc(2, "dogs").unwrap();
        index.index_doc(3, "").unwrap();
        let config = TextIndexConfig {
            fallback_score: 1.0,
            ..TextIndexConfig::default()
        };
        index.config = config;

        let mut buffer = Vec::new();
        index.snapshot().write_json(&mut buffer).unwrap();
        let snapshot = TextIndexSnapshot::read_json(buffer.as_slice()).unwrap();

        let restored = TextIndex::from_snapshot(identity(), snapshot.clone()).unwrap();
        assert_eq!(restored.docids(), &DocIdSet::from([1, 2, 3]));
        assert_eq!(restored.not_indexed(), DocIdSet::from([3]));
        assert_eq!(restored.config(), &config);
        assert_eq!(
            restored.apply_does_not_contain("cats").unwrap(),
            ResultSet::from(vec![2, 3])
        );

        let mut target = TextIndex::new(identity()).unwrap();
        target.index_doc(9, "birds").unwrap();
        target.restore(snapshot).unwrap();
        assert_eq!(target.docids(), &DocIdSet::from([1, 2, 3]));
        assert!(target.apply("birds").unwrap().is_empty());
        assert_eq!(target.apply("dogs").unwrap().docids(), DocIdSet::from([2]));
    }

    #[test]
    fn test_statistics_delegate_to_engine() {
        let index = recording(RecordingEngine::new(Lexicon::new().into_shared()));

        assert_eq!(index.document_count(), 4);
        assert_eq!(index.word_count(), 45);
    }

    #[test]
    fn test_unindex_and_clear_reach_engine() {
        let mut index = recording(RecordingEngine::new(Lexicon::new().into_shared()));
        index.index_doc(1, "cats").unwrap();

        index.unindex_doc(1).unwrap();
        assert_eq!(index.index().unindexed, vec![1]);
        assert!(index.docids().is_empty());

        index.index_doc(2, "dogs").unwrap();
        index.clear().unwrap();
        assert!(index.index().cleared);
        assert!(index.docids().is_empty());
    }

    #[test]
    fn test_reindex_does_not_unindex() {
        let mut engine = RecordingEngine::new(Lexicon::new().into_shared());
        engine.fail_unindex = true;
        let mut index = recording(engine);

        index.index_doc(5, "now is the time").unwrap();
        index.reindex_doc(5, "now is the time").unwrap();

        assert_eq!(index.index().indexed.len(), 2);
    }

    #[test]
    fn test_apply_no_results_skips_query_weight() {
        let engine =
            RecordingEngine::new(Lexicon::new().into_shared()).with_results(Scores::new());
        let index = recording(engine);

        let results = index.apply("anything").unwrap();

        assert!(results.is_empty());
        assert!(index.index().weighted.lock().is_empty());
        assert_eq!(*index.index().searched.lock(), vec!["anything"]);
    }

    #[test]
    fn test_apply_normalizes_by_query_weight() {
        let index = recording(RecordingEngine::new(Lexicon::new().into_shared()));

        let results = index.apply("anything").unwrap();
        let scores = results.scores().unwrap();

        assert_eq!(scores[&1], 14.0 / 42.0);
        assert_eq!(scores[&2], 7.4 / 42.0);
        assert_eq!(scores[&3], 3.2 / 42.0);
        assert_eq!(*index.index().searched.lock(), vec!["anything"]);
        assert_eq!(index.index().weighted.lock()[0], vec!["anything"]);
    }

    #[test]
    fn test_apply_zero_query_weight_keeps_raw_scores() {
        let engine = RecordingEngine::new(Lexicon::new().into_shared()).with_weight(0.0);
        let index = recording(engine);

        let results = index.apply("anything").unwrap();

        assert_eq!(
            results,
            ResultSet::Scored(Scores::from([(1, 14.0), (2, 7.4), (3, 3.2)]))
        );
        assert_eq!(index.index().weighted.lock().len(), 1);
    }

    #[test]
    fn test_apply_unusable_scores_fall_back() {
        let engine = RecordingEngine::new(Lexicon::new().into_shared())
            .with_results(Scores::from([(1, f64::NAN), (2, 7.4), (3, 3.2)]));
        let index = recording(engine);

        let results = index.apply("anything").unwrap();

        assert_eq!(
            results,
            ResultSet::Scored(Scores::from([
                (1, DEFAULT_FALLBACK_SCORE),
                (2, DEFAULT_FALLBACK_SCORE),
                (3, DEFAULT_FALLBACK_SCORE),
            ]))
        );
        assert_eq!(DEFAULT_FALLBACK_SCORE, 214_748_364.0);
    }

    #[test]
    fn test_custom_fallback_score() {
        let config = TextIndexConfig {
            fallback_score: 1.0,
            ..TextIndexConfig::default()
        };
        let index = TextIndex::builder(identity())
            .index(RecordingEngine::new(Lexicon::new().into_shared()).with_weight(f64::NAN))
            .config(config)
            .build()
            .unwrap();

        let results = index.apply("anything").unwrap();
        assert!(results.scores().unwrap().values().all(|&s| s == 1.0));
    }

    #[test]
    fn test_query_dispatch() {
        let engine = RecordingEngine::new(Lexicon::new().into_shared());
        let index = recording(engine);

        index.apply("\"quick brown\"").unwrap();
        index.apply("qui*").unwrap();
        index.apply("Am I rich yet?").unwrap();

        assert_eq!(
            *index.index().searched.lock(),
            vec!["quick brown", "qui*", "Am I rich yet?"]
        );
        assert_eq!(
            index.index().weighted.lock()[2],
            vec!["am", "i", "rich", "yet"]
        );
    }

    #[test]
    fn test_does_not_contain_with_recording_engine() {
        let engine = RecordingEngine::new(Lexicon::new().into_shared())
            .with_results(Scores::from([(1, 1.0)]));
        let mut index = recording(engine);
        for docid in [1, 2, 3] {
            index.index_doc(docid, "text").unwrap();
        }

        let result = index.apply_does_not_contain("anything").unwrap();
        assert_eq!(result, ResultSet::from(vec![2, 3]));
    }

    #[test]
    fn test_sort() {
        let index = TextIndex::new(identity()).unwrap();
        let results = || ResultSet::Scored(Scores::from([(-2, 5.0), (3, 3.0), (0, 4.5)]));

        assert_eq!(index.sort(results(), None, false).unwrap(), vec![-2, 0, 3]);
        assert_eq!(index.sort(results(), None, true).unwrap(), vec![3, 0, -2]);
        assert_eq!(index.sort(results(), Some(2), false).unwrap(), vec![-2, 0]);
    }

    #[test]
    fn test_sort_edge_cases() {
        let index = TextIndex::new(identity()).unwrap();

        assert!(index.sort(ResultSet::empty(), None, false).unwrap().is_empty());
        assert!(
            index
                .sort(ResultSet::Unscored(DocIdSet::new()), None, false)
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            index.sort(ResultSet::from(vec![1]), None, false),
            Err(FolioError::TypeMismatch(_))
        ));

        let tied = ResultSet::Scored(Scores::from([(9, 1.0), (4, 1.0), (7, 2.0)]));
        assert_eq!(index.sort(tied, None, false).unwrap(), vec![7, 4, 9]);
    }

    #[test]
    fn test_supported_operators() {
        let index = TextIndex::new(identity()).unwrap();

        assert!(index.supports(Operator::Contains));
        assert!(index.supports(Operator::Sort));
        assert!(!index.supports(Operator::Gt));

        let error = index.apply_not_eq("x").unwrap_err();
        assert_eq!(error.to_string(), "NotEq is not supported for TextIndex");
        let error = index.apply_range(Some("a"), Some("b"), false, false).unwrap_err();
        assert_eq!(error.to_string(), "Range is not supported for TextIndex");
    }

    #[test]
    fn test_config_from_json() {
        let config = TextIndexConfig::from_json_str(r#"{"bm25": {"k1": 2.0}}"#).unwrap();
        assert_eq!(config.bm25.k1, 2.0);
        assert_eq!(config.bm25.b, 0.75);
        assert_eq!(config.fallback_score, DEFAULT_FALLBACK_SCORE);

        assert!(matches!(
            TextIndexConfig::from_json_str(r#"{"bm25": {"b": 3.0}}"#),
            Err(FolioError::Configuration(_))
        ));
        assert!(matches!(
            TextIndexConfig::from_json_str("not json"),
            Err(FolioError::Json(_))
        ));
    }

    #[test]
    fn test_config_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text_index.json");
        std::fs::write(&path, r#"{"fallback_score": 10.0}"#).unwrap();

        let config = TextIndexConfig::from_path(&path).unwrap();
        assert_eq!(config.fallback_score, 10.0);

        let missing = TextIndexConfig::from_path(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(FolioError::Io(_))));
    }
}
