// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sieve
//!
//! Reactive filtering dashboards: a dataset is loaded once per session, and
//! every change of a host input re-filters it and fans the result out to
//! record counts, tables and charts.
//!
//! ## Overview
//!
//! - Dataset loading (`sieve-io`): CSV and spreadsheet files into an immutable
//!   [`BaseTable`]
//! - Filtering (`sieve-core`): declarative [`FilterSpec`]s bound to inputs
//!   through a [`PredicateSet`]
//! - Recomputation (`sieve-engine`): one engine per page publishing a fresh
//!   [`DerivedTable`] when a trigger input changes
//! - Presentation (`sieve-view`): pure adapters turning the derived table into
//!   [`ViewArtifact`]s
//!
//! A [`DashboardSession`] ties these together for one viewer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sieve::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::load("config.toml")?;
//! let mut session = DashboardSession::start(&config, dashboards::all())?;
//!
//! let report = session.set_input("QUANTITY_MAX", InputValue::Number(30000.0));
//! let mut rendered: Vec<(String, ViewArtifact)> = Vec::new();
//! session.render_into(&mut rendered, &report.outputs);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod config;
pub mod dashboards;
pub mod page;
pub mod session;

pub use self::config::{parse_input_literal, ConfigError, DashboardConfig, DatasetConfig, InputLiteral};
pub use self::page::PageSpec;
pub use self::session::{DashboardSession, FlushReport, OutputSink, SessionError};

// Re-export the pipeline types
pub use sieve_core::{
    BaseTable, ColumnType, DerivedTable, FilterBinding, FilterError, FilterSpec, InputChange,
    InputId, InputSnapshot, InputValue, LoadError, PredicateSet, TransientColumn, Value,
};
pub use sieve_engine::{RecomputationEngine, RecomputeOutcome, Refresh, RefreshStream};
pub use sieve_io::{DatasetSource, LoadOptions};
pub use sieve_view::{
    Axis, ChartBuilder, ChartSpec, CountFormatter, InputTextFormatter, PresentationAdapter,
    TableRenderer, TableView, ViewArtifact,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dashboards;
    pub use crate::{DashboardConfig, DashboardSession, OutputSink, PageSpec};
    pub use sieve_core::{FilterBinding, InputChange, InputValue};
    pub use sieve_view::{Axis, ChartBuilder, CountFormatter, TableRenderer, ViewArtifact};
}
