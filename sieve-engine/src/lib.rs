// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reactive recomputation for sieve dashboards.
//!
//! - [`RecomputationEngine`]: applies a page's predicate set to its base table
//!   whenever one of its trigger inputs changes
//! - [`DerivedTableCache`]: the single slot holding the latest derived table
//! - [`InputStore`]: live input values and the ids changed since the last pass
//! - [`RefreshSubject`]: broadcasts which page just published
//! - [`drive`]: async loop that coalesces queued input changes into batches
//!
//! # Example
//!
//! ```
//! use sieve_core::{FilterBinding, InputSnapshot, InputValue, PredicateSet};
//! use sieve_engine::{RecomputationEngine, RecomputeOutcome};
//! # use sieve_core::{BaseTable, Column, ColumnType, Value};
//! # use std::sync::Arc;
//! # let hours = Column::new(
//! #     "hrs",
//! #     ColumnType::Numeric,
//! #     vec![Value::Number(1.0), Value::Number(4.0), Value::Number(8.0)],
//! # ).unwrap();
//! # let base = Arc::new(BaseTable::new("quantity", vec![hours]).unwrap());
//!
//! let engine = RecomputationEngine::new(
//!     "quantity",
//!     base,
//!     PredicateSet::new(vec![FilterBinding::range("hrs", "TIME_RANGE")]),
//! );
//! assert!(engine.current().is_none());
//!
//! let inputs = InputSnapshot::new().with("TIME_RANGE", InputValue::NumberRange(2.0, 6.0));
//! assert_eq!(
//!     engine.observe(&inputs),
//!     RecomputeOutcome::Published { generation: 1, rows: 1 }
//! );
//! assert_eq!(engine.observe(&inputs), RecomputeOutcome::Unchanged);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod cache;
pub mod driver;
pub mod engine;
pub mod input_store;
pub mod pipeline;
pub mod subject;

pub use self::cache::DerivedTableCache;
pub use self::driver::{coalesce, drive};
pub use self::engine::{EngineState, RecomputationEngine, RecomputeOutcome};
pub use self::input_store::InputStore;
pub use self::pipeline::apply_filters;
pub use self::subject::{Refresh, RefreshStream, RefreshSubject, SubjectError};
