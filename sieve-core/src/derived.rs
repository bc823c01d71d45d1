// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtered views over a base table.
//!
//! A [`DerivedTable`] never copies base cells: it keeps the surviving base row
//! indices plus any transient columns computed during filtering, already
//! projected onto those rows. It is rebuilt wholesale on every recomputation and
//! is never patched in place.

use crate::{BaseTable, Column, ColumnType, Value};
use std::sync::Arc;

/// The row subset of a [`BaseTable`] that passed the current predicate set.
#[derive(Debug, Clone)]
pub struct DerivedTable {
    base: Arc<BaseTable>,
    rows: Vec<usize>,
    transient: Vec<Column>,
    generation: u64,
}

impl DerivedTable {
    /// Creates a derived table.
    ///
    /// `rows` must be strictly increasing base row indices and every transient
    /// column must have exactly `rows.len()` cells.
    #[must_use]
    pub fn new(
        base: Arc<BaseTable>,
        rows: Vec<usize>,
        transient: Vec<Column>,
        generation: u64,
    ) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(rows.last().map_or(true, |&r| r < base.len()));
        debug_assert!(transient.iter().all(|c| c.len() == rows.len()));
        Self {
            base,
            rows,
            transient,
            generation,
        }
    }

    /// A derived table holding every base row and no transient columns
    #[must_use]
    pub fn unfiltered(base: Arc<BaseTable>) -> Self {
        let rows = (0..base.len()).collect();
        Self::new(base, rows, Vec::new(), 0)
    }

    #[must_use]
    pub fn base(&self) -> &Arc<BaseTable> {
        &self.base
    }

    /// Base row indices, in base order
    #[must_use]
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Monotonic publish counter assigned by the engine (0 for hand-built tables)
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Transient columns added during filtering
    #[must_use]
    pub fn transient_columns(&self) -> &[Column] {
        &self.transient
    }

    #[must_use]
    pub fn is_transient(&self, name: &str) -> bool {
        self.transient.iter().any(|c| c.name() == name)
    }

    /// Base column names followed by transient column names
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.base
            .column_names()
            .chain(self.transient.iter().map(Column::name))
    }

    /// Looks a column up by name, base columns first.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ColumnView<'_>> {
        if let Some(column) = self.base.column(name) {
            return Some(ColumnView {
                column,
                rows: Some(&self.rows),
            });
        }
        self.transient
            .iter()
            .find(|c| c.name() == name)
            .map(|column| ColumnView { column, rows: None })
    }

    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|c| c.get(row))
    }
}

/// Read-only view of one column of a [`DerivedTable`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    column: &'a Column,
    // `None` when the column is already aligned with the derived rows.
    rows: Option<&'a [usize]>,
}

impl<'a> ColumnView<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.column.name()
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column.column_type()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.map_or(self.column.len(), <[usize]>::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at derived row `row`
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&'a Value> {
        match self.rows {
            Some(rows) => rows.get(row).and_then(|&base_row| self.column.get(base_row)),
            None => self.column.get(row),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let column = self.column;
        let rows = self.rows;
        (0..self.len()).filter_map(move |row| match rows {
            Some(rows) => column.get(rows[row]),
            None => column.get(row),
        })
    }
}
