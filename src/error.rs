//! Error types for the Folio library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`FolioError`] enum. Constructor helpers mirror the variants so call sites
//! stay short.
//!
//! # Examples
//!
//! ```
//! use folio::error::{FolioError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FolioError::configuration("discriminator name must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::catalog::Operator;

/// The main error type for Folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// I/O errors (reading configuration files, snapshots, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rejected construction input (bad discriminator, bad parameters).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An extracted value that the catalog refuses to index.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A query operator the concrete index type does not implement.
    #[error("{operator} is not supported for {index_type}")]
    Unsupported {
        operator: Operator,
        index_type: &'static str,
    },

    /// A value of the wrong shape was handed to an operation.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Analysis-related errors (tokenization, wildcard compilation, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Inconsistent index state, e.g. a snapshot referring to unknown words
    #[error("Index error: {0}")]
    Index(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with FolioError.
pub type Result<T> = std::result::Result<T, FolioError>;

impl FolioError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        FolioError::Configuration(msg.into())
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        FolioError::Validation(msg.into())
    }

    /// Create a new unsupported-operator error.
    pub fn unsupported(operator: Operator, index_type: &'static str) -> Self {
        FolioError::Unsupported {
            operator,
            index_type,
        }
    }

    /// Create a new type mismatch error.
    pub fn type_mismatch<S: Into<String>>(msg: S) -> Self {
        FolioError::TypeMismatch(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FolioError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        FolioError::Index(msg.into())
    }

    /// Whether this error reports an unsupported operator.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FolioError::Unsupported { .. })
    }
}
