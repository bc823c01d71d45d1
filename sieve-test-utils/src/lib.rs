// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the sieve workspace.
//!
//! This crate provides small, hand-checked datasets modelled on the production
//! dashboard pages, input snapshots matching their sidebar defaults, and
//! assertion helpers for derived tables. It is meant for development and testing
//! only, not for production code.
//!
//! # Fixtures
//!
//! | Fixture | Rows | Default inputs keep |
//! |---------|------|---------------------|
//! | [`quantity_table`] | 10 | 5 (rows 0, 2, 4, 6, 7) |
//! | [`orders_table`] | 7 | 7 |
//! | [`records_table`] | 6 | 6 |
//! | [`numbered_table`] | n | - |
//!
//! ```rust
//! use sieve_test_utils::{quantity_table, quantity_inputs};
//!
//! let table = quantity_table();
//! assert_eq!(table.len(), 10);
//! assert!(quantity_inputs().contains("TIME_RANGE"));
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fixtures;
pub mod helpers;
pub mod inputs;

pub use fixtures::{
    numbered_table, orders_table, quantity_table, records_table, write_fixture, ORDERS_CSV,
    QUANTITY_CSV, RECORDS_CSV,
};
pub use helpers::{assert_subset_of_base, numbers, texts};
pub use inputs::{orders_inputs, quantity_inputs, records_inputs};
