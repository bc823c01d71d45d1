// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the sieve dashboard pipeline
//!
//! Failures are split by the stage that raises them, because each stage has its
//! own recovery policy:
//!
//! - [`LoadError`] is fatal: a session cannot start without its datasets.
//! - [`FilterError`] is recovered by the recomputation engine, which keeps the
//!   last published table.
//! - [`RenderError`] is recovered at the adapter boundary, which degrades to a
//!   placeholder artifact.
//!
//! [`SieveError`] wraps all of them for callers that only need one type.
//!
//! # Examples
//!
//! ```
//! use sieve_core::{FilterError, SieveError};
//!
//! let err: SieveError = FilterError::unknown_column("material").into();
//! assert!(err.is_recoverable());
//! ```

use std::path::PathBuf;

/// A dataset could not be materialized.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file does not exist
    #[error("Dataset source not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Reading the source failed at the OS level
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the source
    #[error("Malformed CSV in {}: {context}", path.display())]
    Csv {
        /// Path being read
        path: PathBuf,
        /// Reader diagnostic
        context: String,
    },

    /// The spreadsheet reader rejected the source
    #[error("Malformed workbook {}: {context}", path.display())]
    Workbook {
        /// Path being read
        path: PathBuf,
        /// Reader diagnostic
        context: String,
    },

    /// A cell or header could not be interpreted
    #[error("Malformed dataset {dataset}: {context}")]
    Malformed {
        /// Dataset name
        dataset: String,
        /// What was wrong
        context: String,
    },

    /// The source has no header row
    #[error("Dataset {dataset} is empty")]
    Empty {
        /// Dataset name
        dataset: String,
    },

    /// Two columns share a name
    #[error("Dataset {dataset} has duplicate column {column}")]
    DuplicateColumn {
        /// Dataset name
        dataset: String,
        /// Repeated column name
        column: String,
    },

    /// A column length disagrees with the others
    #[error("Column {column} has {actual} rows, expected {expected}")]
    RaggedColumn {
        /// Offending column
        column: String,
        /// Row count of the first column
        expected: usize,
        /// Row count of this column
        actual: usize,
    },
}

impl LoadError {
    /// Create a malformed-dataset error
    pub fn malformed(dataset: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Malformed {
            dataset: dataset.into(),
            context: context.into(),
        }
    }

    /// Create a workbook error
    pub fn workbook(path: impl Into<PathBuf>, context: impl Into<String>) -> Self {
        Self::Workbook {
            path: path.into(),
            context: context.into(),
        }
    }
}

/// A required input was absent or carried the wrong kind of value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// No value has been registered for the input
    #[error("Input {input} has no value")]
    Missing {
        /// Input identifier
        input: String,
    },

    /// The value does not have the expected shape
    #[error("Input {input} expected {expected}, got {actual}")]
    WrongKind {
        /// Input identifier
        input: String,
        /// Expected kind
        expected: &'static str,
        /// Actual kind
        actual: &'static str,
    },
}

/// A predicate set could not be applied to the base table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// A filter references a column the table does not have
    #[error("Filter references unknown column {column}")]
    UnknownColumn {
        /// Missing column
        column: String,
    },

    /// Lower bound above upper bound
    #[error("Invalid bounds on {column}: min {min} > max {max}")]
    InvalidBounds {
        /// Filtered column
        column: String,
        /// Rendered lower bound
        min: String,
        /// Rendered upper bound
        max: String,
    },

    /// Bound type does not match the column type
    #[error("Filter on {column} expects {expected} values, got {actual}")]
    TypeMismatch {
        /// Filtered column
        column: String,
        /// Column type
        expected: &'static str,
        /// Bound type
        actual: &'static str,
    },

    /// The input snapshot could not feed a binding
    #[error(transparent)]
    Input(#[from] InputError),

    /// A transient column reuses the name of a base or earlier transient column
    #[error("Transient column {column} collides with an existing column")]
    ColumnCollision {
        /// Colliding name
        column: String,
    },

    /// A transient column could not be computed
    #[error("Transient column {column} failed at row {row}: {context}")]
    Transient {
        /// Column being computed
        column: String,
        /// Base row index
        row: usize,
        /// What went wrong
        context: String,
    },
}

impl FilterError {
    /// Create an unknown column error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }
}

/// An adapter could not build its artifact from the current derived table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// A column the adapter maps is absent
    #[error("Output {output} needs column {column}")]
    MissingColumn {
        /// Output identifier
        output: String,
        /// Missing column
        column: String,
    },

    /// A value cannot be placed on the requested axis
    #[error("Output {output} cannot plot {value} from column {column}")]
    UnsupportedValue {
        /// Output identifier
        output: String,
        /// Column holding the value
        column: String,
        /// Rendered value
        value: String,
    },
}

impl RenderError {
    /// Create a missing column error
    pub fn missing_column(output: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            output: output.into(),
            column: column.into(),
        }
    }
}

/// Root error type for all sieve operations
#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    /// Dataset loading failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Filtering failed
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Rendering failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Input lookup failed
    #[error(transparent)]
    Input(#[from] InputError),
}

impl SieveError {
    /// Whether the session can keep running after this error
    ///
    /// Only load failures end a session.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Load(_))
    }
}

/// Specialized Result type for sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;
