// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{PresentationAdapter, TableView, ViewArtifact};
use sieve_core::{DerivedTable, RenderError, Value};
use std::collections::BTreeSet;

/// Projects the derived table into display rows.
///
/// Base columns come first, then transient ones, minus any hidden column.
/// Hiding a column the table does not have is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRenderer {
    output_id: String,
    hidden: BTreeSet<String>,
}

impl TableRenderer {
    pub fn new(output_id: impl Into<String>) -> Self {
        Self {
            output_id: output_id.into(),
            hidden: BTreeSet::new(),
        }
    }

    /// Leaves `columns` out of the rendered view.
    #[must_use]
    pub fn hide<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden.extend(columns.into_iter().map(Into::into));
        self
    }
}

impl PresentationAdapter for TableRenderer {
    fn output_id(&self) -> &str {
        &self.output_id
    }

    fn render(&self, table: &DerivedTable) -> Result<ViewArtifact, RenderError> {
        let columns: Vec<String> = table
            .column_names()
            .filter(|name| !self.hidden.contains(*name))
            .map(ToString::to_string)
            .collect();

        let views = columns
            .iter()
            .map(|name| {
                table
                    .column(name)
                    .ok_or_else(|| RenderError::missing_column(&self.output_id, name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = (0..table.len())
            .map(|row| {
                views
                    .iter()
                    .map(|view| view.get(row).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(ViewArtifact::Table(TableView { columns, rows }))
    }
}
