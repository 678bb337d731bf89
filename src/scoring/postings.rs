//! In-memory posting storage.
//!
//! Everything is keyed by ids: postings by word id, length records and word
//! sequences by document id. The store never holds references to documents,
//! only their ids, so it can be snapshotted as plain data.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::types::{DocId, WordId};

/// Postings, document length records and global statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingStore {
    /// word id -> { doc id -> frequency }
    postings: AHashMap<WordId, AHashMap<DocId, u32>>,
    /// doc id -> token count after analysis
    doc_lengths: AHashMap<DocId, u32>,
    /// doc id -> word ids in document order (phrase matching)
    doc_words: AHashMap<DocId, Vec<WordId>>,
    /// Sum of all document lengths
    total_words: u64,
}

impl PostingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document's word sequence, replacing whatever it had before.
    ///
    /// Returns `true` when the document was not present yet.
    pub fn insert(&mut self, docid: DocId, wids: Vec<WordId>) -> bool {
        let is_new = self.remove(docid).is_none();

        let mut frequencies: AHashMap<WordId, u32> = AHashMap::new();
        for &wid in &wids {
            *frequencies.entry(wid).or_insert(0) += 1;
        }
        for (wid, freq) in frequencies {
            self.postings.entry(wid).or_default().insert(docid, freq);
        }

        let doc_len = wids.len() as u32;
        self.doc_lengths.insert(docid, doc_len);
        self.doc_words.insert(docid, wids);
        self.total_words += doc_len as u64;

        is_new
    }

    /// Drop a document, returning its length if it was present.
    pub fn remove(&mut self, docid: DocId) -> Option<u32> {
        let doc_len = self.doc_lengths.remove(&docid)?;
        let wids = self.doc_words.remove(&docid).unwrap_or_default();

        let distinct: AHashSet<WordId> = wids.into_iter().collect();
        for wid in distinct {
            if let Some(docs) = self.postings.get_mut(&wid) {
                docs.remove(&docid);
                if docs.is_empty() {
                    self.postings.remove(&wid);
                }
            }
        }

        self.total_words = self.total_words.saturating_sub(doc_len as u64);
        Some(doc_len)
    }

    /// Remove every document and reset the statistics.
    pub fn clear(&mut self) {
        self.postings.clear();
        self.doc_lengths.clear();
        self.doc_words.clear();
        self.total_words = 0;
    }

    /// The `{doc id -> frequency}` postings of a word.
    pub fn postings(&self, wid: WordId) -> Option<&AHashMap<DocId, u32>> {
        self.postings.get(&wid)
    }

    /// Number of documents containing a word.
    pub fn doc_freq(&self, wid: WordId) -> usize {
        self.postings.get(&wid).map_or(0, |docs| docs.len())
    }

    /// Token count of a document.
    pub fn doc_length(&self, docid: DocId) -> Option<u32> {
        self.doc_lengths.get(&docid).copied()
    }

    /// Word ids of a document, in document order.
    pub fn doc_words(&self, docid: DocId) -> Option<&[WordId]> {
        self.doc_words.get(&docid).map(Vec::as_slice)
    }

    /// Whether a document is stored.
    pub fn contains(&self, docid: DocId) -> bool {
        self.doc_lengths.contains_key(&docid)
    }

    /// Stored document ids, in no particular order.
    pub fn docids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.doc_lengths.keys().copied()
    }

    /// Word ids referenced by postings or document word sequences.
    pub fn word_ids(&self) -> impl Iterator<Item = WordId> + '_ {
        self.postings
            .keys()
            .copied()
            .chain(self.doc_words.values().flatten().copied())
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Sum of all document lengths.
    pub fn word_count(&self) -> u64 {
        self.total_words
    }

    /// Number of words that currently have postings.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Average document length, `0.0` for an empty store.
    pub fn mean_doc_len(&self) -> f64 {
        match self.doc_lengths.len() {
            0 => 0.0,
            n => self.total_words as f64 / n as f64,
        }
    }
}
