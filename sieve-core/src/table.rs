// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Immutable base tables.
//!
//! A [`BaseTable`] is built once per dataset when a session starts and is then
//! shared read-only (behind an `Arc`) by the engine and every adapter. There is
//! no mutating API after construction.

use crate::{ColumnType, LoadError, Value};
use std::collections::HashSet;

/// A named, typed column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column, checking that every non-null cell fits `column_type`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Malformed`] naming the first offending row.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        values: Vec<Value>,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        if let Some((row, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.fits(column_type))
        {
            return Err(LoadError::malformed(
                name.clone(),
                format!(
                    "row {row} holds a {} value in a {column_type} column",
                    value.kind()
                ),
            ));
        }

        Ok(Self {
            name,
            column_type,
            values,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy holding only the cells at `rows`, in that order.
    ///
    /// Indices past the end yield nulls.
    #[must_use]
    pub fn select(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            column_type: self.column_type,
            values: rows
                .iter()
                .map(|&row| self.values.get(row).cloned().unwrap_or(Value::Null))
                .collect(),
        }
    }
}

/// The raw dataset of one dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTable {
    name: String,
    columns: Vec<Column>,
    row_count: usize,
}

impl BaseTable {
    /// Assembles a table from columns of equal length and distinct names.
    ///
    /// # Errors
    ///
    /// - [`LoadError::DuplicateColumn`] if two columns share a name
    /// - [`LoadError::RaggedColumn`] if the column lengths differ
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, LoadError> {
        let name = name.into();
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(LoadError::DuplicateColumn {
                    dataset: name,
                    column: column.name().to_string(),
                });
            }
        }

        let row_count = columns.first().map_or(0, Column::len);
        if let Some(column) = columns.iter().find(|c| c.len() != row_count) {
            return Err(LoadError::RaggedColumn {
                column: column.name().to_string(),
                expected: row_count,
                actual: column.len(),
            });
        }

        Ok(Self {
            name,
            columns,
            row_count,
        })
    }

    /// Dataset name, used in logs and diagnostics
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, fixed for the table's lifetime
    #[must_use]
    pub const fn len(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|c| c.get(row))
    }
}
