//! # Folio
//!
//! Full-text catalog indexing with Okapi BM25 relevance scoring.
//!
//! ## Features
//!
//! - Pluggable text analysis pipeline feeding a shared vocabulary
//! - Inverted index with BM25 scoring, phrase and wildcard queries
//! - Catalog indexes that extract values from application objects
//! - Query weight normalization and relevance sorting
//! - Serializable configuration and index snapshots
//!
//! ## Example
//!
//! ```
//! use folio::prelude::*;
//!
//! let discriminator = Discriminator::<str>::callable(|text| Some(IndexValue::from(text)));
//! let mut index = TextIndex::new(discriminator)?;
//!
//! index.index_doc(1, "Am I rich yet?")?;
//! index.index_doc(2, "rich and famous")?;
//!
//! let results = index.apply("rich")?;
//! assert_eq!(index.sort(results, None, false)?.len(), 2);
//! # Ok::<(), folio::error::FolioError>(())
//! ```

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod scoring;
pub mod types;

pub mod prelude {
    pub use crate::analysis::{Lexicon, SharedLexicon};
    pub use crate::catalog::{
        CatalogIndex, Discriminator, IndexValue, Operator, TextIndex, TextIndexConfig,
    };
    pub use crate::error::{FolioError, Result};
    pub use crate::scoring::{Bm25Config, OkapiIndex, ScoringIndex};
    pub use crate::types::{DocId, DocIdSet, ResultSet, Scores};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
