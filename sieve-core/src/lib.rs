// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for reactive dashboard pipelines.
//!
//! - [`BaseTable`]: the immutable dataset loaded once per session
//! - [`DerivedTable`]: the row subset that passed the current filters
//! - [`FilterSpec`]: one declarative row-keep predicate
//! - [`FilterBinding`] / [`PredicateSet`]: how host inputs turn into specs, and
//!   which inputs trigger a recomputation
//! - [`InputSnapshot`]: typed view of the host's input values
//! - [`TransientColumn`]: columns computed while filtering
//!
//! Everything here is pure data; scheduling and caching live in `sieve-engine`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod binding;
pub mod derived;
pub mod error;
pub mod filter;
pub mod input;
pub mod table;
pub mod transient;
pub mod value;

pub use self::binding::{FilterBinding, PredicateSet};
pub use self::derived::{ColumnView, DerivedTable};
pub use self::error::{FilterError, InputError, LoadError, RenderError, Result, SieveError};
pub use self::filter::FilterSpec;
pub use self::input::{InputChange, InputId, InputSnapshot, InputValue};
pub use self::table::{BaseTable, Column};
pub use self::transient::TransientColumn;
pub use self::value::{ColumnType, Value};
