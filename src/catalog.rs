//! Catalog indexes.
//!
//! A catalog index maps application objects to indexed values through a
//! [`Discriminator`] and answers query operators over document ids.
//! [`CatalogIndex`] carries the behavior every index shares: value
//! extraction and validation, the default re-index policy, intersection with
//! candidate results, and the error every unsupported operator produces.

pub mod discriminator;
pub mod text;

use std::fmt;

use crate::error::{FolioError, Result};
use crate::types::{DocId, DocIdSet, ResultSet, Scores};

pub use discriminator::{Attributes, Discriminator, IndexValue, ObjectRef};
pub use text::{TextIndex, TextIndexBuilder, TextIndexConfig, TextIndexSnapshot};

/// Query operators a catalog index may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Contains,
    DoesNotContain,
    Eq,
    NotEq,
    Gt,
    Lt,
    Ge,
    Le,
    Any,
    All,
    Range,
    Sort,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 12] = [
        Operator::Contains,
        Operator::DoesNotContain,
        Operator::Eq,
        Operator::NotEq,
        Operator::Gt,
        Operator::Lt,
        Operator::Ge,
        Operator::Le,
        Operator::Any,
        Operator::All,
        Operator::Range,
        Operator::Sort,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Contains => "Contains",
            Operator::DoesNotContain => "DoesNotContain",
            Operator::Eq => "Eq",
            Operator::NotEq => "NotEq",
            Operator::Gt => "Gt",
            Operator::Lt => "Lt",
            Operator::Ge => "Ge",
            Operator::Le => "Le",
            Operator::Any => "Any",
            Operator::All => "All",
            Operator::Range => "Range",
            Operator::Sort => "Sort",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Intersect a result with a candidate result, combining weights.
///
/// Scores add up; a member of an unscored side contributes a weight of `1.0`.
/// Intersecting two unscored results stays unscored.
pub fn weighted_intersection(left: ResultSet, right: &ResultSet) -> ResultSet {
    match (left, right) {
        (ResultSet::Unscored(left), ResultSet::Unscored(right)) => {
            ResultSet::Unscored(left.intersection(right).copied().collect())
        }
        (ResultSet::Scored(left), ResultSet::Scored(right)) => ResultSet::Scored(
            left.into_iter()
                .filter_map(|(docid, score)| right.get(&docid).map(|other| (docid, score + other)))
                .collect(),
        ),
        (ResultSet::Scored(scores), ResultSet::Unscored(ids)) => {
            ResultSet::Scored(weight_members(scores.into_iter(), ids))
        }
        (ResultSet::Unscored(ids), ResultSet::Scored(scores)) => {
            ResultSet::Scored(weight_members(scores.clone().into_iter(), &ids))
        }
    }
}

fn weight_members(scores: impl Iterator<Item = (DocId, f64)>, ids: &DocIdSet) -> Scores {
    scores
        .filter(|(docid, _)| ids.contains(docid))
        .map(|(docid, score)| (docid, score + 1.0))
        .collect()
}

/// Behavior shared by every catalog index over objects of type `O`.
///
/// Implementors supply value storage ([`index_value`](Self::index_value),
/// [`unindex_doc`](Self::unindex_doc), [`clear`](Self::clear)) and
/// [`apply`](Self::apply). Every other query operator fails with
/// [`FolioError::Unsupported`] unless overridden.
pub trait CatalogIndex<O: ?Sized + Attributes> {
    /// The query value operators receive.
    type Query: ?Sized;

    /// Name used in error messages.
    fn type_name(&self) -> &'static str;

    fn discriminator(&self) -> &Discriminator<O>;

    /// Operators this index answers.
    fn supported_operators(&self) -> &'static [Operator] {
        &[]
    }

    fn supports(&self, operator: Operator) -> bool {
        self.supported_operators().contains(&operator)
    }

    /// The error for an operator this index does not answer.
    fn unsupported(&self, operator: Operator) -> FolioError {
        FolioError::unsupported(operator, self.type_name())
    }

    /// Extract `object`'s value, rejecting values a catalog cannot store.
    fn discriminate(&self, object: &O) -> Result<Option<IndexValue>> {
        match self.discriminator().extract(object) {
            None => Ok(None),
            Some(value) => {
                value.validate()?;
                Ok(Some(value))
            }
        }
    }

    /// Store an already-validated value for a document.
    fn index_value(&mut self, docid: DocId, value: IndexValue) -> Result<()>;

    /// Forget a document. Unknown ids are ignored.
    fn unindex_doc(&mut self, docid: DocId) -> Result<()>;

    /// Forget every document.
    fn clear(&mut self) -> Result<()>;

    /// Index an object. An absent value drops whatever was stored before.
    fn index_doc(&mut self, docid: DocId, object: &O) -> Result<()> {
        match self.discriminate(object)? {
            None => self.unindex_doc(docid),
            Some(value) => self.index_value(docid, value),
        }
    }

    /// Re-index an object: forget it, then index it again.
    fn reindex_doc(&mut self, docid: DocId, object: &O) -> Result<()> {
        self.unindex_doc(docid)?;
        self.index_doc(docid, object)
    }

    /// Answer the index's primary query.
    fn apply(&self, query: &Self::Query) -> Result<ResultSet>;

    /// [`apply`](Self::apply), narrowed to `candidates` when given.
    fn apply_intersect(
        &self,
        query: &Self::Query,
        candidates: Option<&ResultSet>,
    ) -> Result<ResultSet> {
        let result = self.apply(query)?;
        Ok(match candidates {
            None => result,
            Some(candidates) => weighted_intersection(result, candidates),
        })
    }

    fn apply_contains(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Contains))
    }

    fn apply_does_not_contain(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::DoesNotContain))
    }

    fn apply_eq(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Eq))
    }

    fn apply_not_eq(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::NotEq))
    }

    fn apply_gt(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Gt))
    }

    fn apply_lt(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Lt))
    }

    fn apply_ge(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Ge))
    }

    fn apply_le(&self, _query: &Self::Query) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Le))
    }

    fn apply_any(&self, _queries: &[&Self::Query]) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Any))
    }

    fn apply_all(&self, _queries: &[&Self::Query]) -> Result<ResultSet> {
        Err(self.unsupported(Operator::All))
    }

    fn apply_range(
        &self,
        _start: Option<&Self::Query>,
        _end: Option<&Self::Query>,
        _exclude_min: bool,
        _exclude_max: bool,
    ) -> Result<ResultSet> {
        Err(self.unsupported(Operator::Range))
    }

    /// Order result ids, best first unless `reverse`, keeping at most `limit`.
    fn sort(&self, _results: ResultSet, _limit: Option<usize>, _reverse: bool) -> Result<Vec<DocId>> {
        Err(self.unsupported(Operator::Sort))
    }
}
