//! Okapi BM25 relevance parameters and formulas.
//!
//! ```text
//!                        f(D, t) · (k1 + 1)
//!   TF(D, t) = -----------------------------------------
//!              f(D, t) + k1 · ((1 - b) + b · |D| / avgdl)
//!
//!   IDF(t)   = ln(1 + N / df(t))
//! ```
//!
//! `TF` is bounded above by `k1 + 1`, which gives the maximal score a single
//! term can contribute and therefore the query weight used for normalization.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Configuration for BM25 scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// K1 parameter (term frequency saturation).
    pub k1: f64,

    /// B parameter (document length normalization).
    pub b: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Bm25Config { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Config {
    /// Reject parameters outside their meaningful ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(FolioError::configuration(format!(
                "BM25 k1 must be a non-negative number, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(FolioError::configuration(format!(
                "BM25 b must lie in [0, 1], got {}",
                self.b
            )));
        }
        Ok(())
    }

    /// Inverse document frequency of a term found in `doc_freq` of `doc_count` documents.
    pub fn idf(&self, doc_freq: usize, doc_count: usize) -> f64 {
        if doc_freq == 0 {
            return 0.0;
        }
        (1.0 + doc_count as f64 / doc_freq as f64).ln()
    }

    /// Saturated term frequency of a term occurring `freq` times in a document.
    pub fn tf(&self, freq: u32, doc_len: u32, mean_doc_len: f64) -> f64 {
        let freq = freq as f64;
        let length_ratio = if mean_doc_len > 0.0 {
            doc_len as f64 / mean_doc_len
        } else {
            1.0
        };
        let length_weight = (1.0 - self.b) + self.b * length_ratio;
        freq * (self.k1 + 1.0) / (freq + self.k1 * length_weight)
    }

    /// Upper bound of [`tf`](Self::tf).
    pub fn max_tf(&self) -> f64 {
        self.k1 + 1.0
    }
}
