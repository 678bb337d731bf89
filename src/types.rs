//! Identifier and result types shared by the lexicon, the scoring engine and
//! the catalog layer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Caller-assigned document identifier. Negative ids are allowed.
pub type DocId = i64;

/// Vocabulary term identifier, assigned by the lexicon from 1 upward.
pub type WordId = u32;

/// Document id → relevance score.
pub type Scores = BTreeMap<DocId, f64>;

/// A plain set of document ids, without scores.
pub type DocIdSet = BTreeSet<DocId>;

/// The outcome of a query operator.
///
/// Free-text operators produce scores, set-like operators (such as
/// "does not contain") only produce ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultSet {
    /// Matching ids with their relevance scores.
    Scored(Scores),
    /// Matching ids only.
    Unscored(DocIdSet),
}

impl ResultSet {
    /// An empty scored result.
    pub fn empty() -> Self {
        ResultSet::Scored(Scores::new())
    }

    /// Number of matching documents.
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Scored(scores) => scores.len(),
            ResultSet::Unscored(ids) => ids.len(),
        }
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the given document matched.
    pub fn contains(&self, docid: DocId) -> bool {
        match self {
            ResultSet::Scored(scores) => scores.contains_key(&docid),
            ResultSet::Unscored(ids) => ids.contains(&docid),
        }
    }

    /// The matching ids, regardless of scoring.
    pub fn docids(&self) -> DocIdSet {
        match self {
            ResultSet::Scored(scores) => scores.keys().copied().collect(),
            ResultSet::Unscored(ids) => ids.clone(),
        }
    }

    /// The scores, if this result carries any.
    pub fn scores(&self) -> Option<&Scores> {
        match self {
            ResultSet::Scored(scores) => Some(scores),
            ResultSet::Unscored(_) => None,
        }
    }

    /// Consume the result, keeping the scores if there are any.
    pub fn into_scores(self) -> Option<Scores> {
        match self {
            ResultSet::Scored(scores) => Some(scores),
            ResultSet::Unscored(_) => None,
        }
    }
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Scores> for ResultSet {
    fn from(scores: Scores) -> Self {
        ResultSet::Scored(scores)
    }
}

impl From<DocIdSet> for ResultSet {
    fn from(ids: DocIdSet) -> Self {
        ResultSet::Unscored(ids)
    }
}

impl From<Vec<DocId>> for ResultSet {
    fn from(ids: Vec<DocId>) -> Self {
        ResultSet::Unscored(ids.into_iter().collect())
    }
}
