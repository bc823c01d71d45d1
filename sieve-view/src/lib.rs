// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Presentation adapters for sieve dashboards.
//!
//! Each adapter turns the current [`DerivedTable`](sieve_core::DerivedTable)
//! into a [`ViewArtifact`] for one named output:
//!
//! - [`CountFormatter`]: `"Showing 37 of 100 records"`
//! - [`TableRenderer`]: display rows, with helper columns hidden
//! - [`ChartBuilder`]: scatter, line and funnel chart specifications
//!
//! [`InputTextFormatter`] echoes a text input and does not read the table.
//!
//! Use [`render_output`] rather than calling [`PresentationAdapter::render`]
//! directly: it maps an unset table to [`ViewArtifact::Pending`] and a
//! [`RenderError`](sieve_core::RenderError) to [`ViewArtifact::Placeholder`].

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod adapter;
pub mod artifact;
pub mod chart;
pub mod count;
pub mod input_text;
pub mod table;

pub use self::adapter::{render_output, PresentationAdapter};
pub use self::artifact::{Axis, ChartKind, ChartSpec, Point, Series, TableView, ViewArtifact};
pub use self::chart::ChartBuilder;
pub use self::count::CountFormatter;
pub use self::input_text::InputTextFormatter;
pub use self::table::TableRenderer;
