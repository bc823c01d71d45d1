// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Dataset loader for sieve dashboards.
//!
//! Reads a header-row tabular file (CSV or spreadsheet workbook) into an
//! immutable [`BaseTable`](sieve_core::BaseTable) with normalized column types:
//! numbers, dates, booleans, and everything else as categories.
//!
//! ```no_run
//! use sieve_io::{load_path, LoadOptions};
//!
//! let orders = load_path(
//!     "orders",
//!     "data/orders.xlsx",
//!     &LoadOptions::new().drop_leading_index(true),
//! )?;
//! println!("{} orders", orders.len());
//! # Ok::<(), sieve_core::LoadError>(())
//! ```
//!
//! Load failures are fatal to a session, so there is no partial result: a
//! single bad cell in a column forced to a type rejects the whole dataset.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

mod cells;
mod csv_source;
mod loader;
mod sheet;
mod source;
mod workbook;

pub use self::loader::{load, load_path};
pub use self::source::{DatasetSource, LoadOptions, SourceFormat};
