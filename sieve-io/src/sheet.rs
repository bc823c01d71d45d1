// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cells::{build_column, RawCell};
use crate::LoadOptions;
use sieve_core::{BaseTable, LoadError};
use std::collections::BTreeSet;

/// Header plus body rows as read, before typing.
#[derive(Debug, Default)]
pub(crate) struct RawSheet {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<RawCell>>,
}

impl RawSheet {
    /// Removes the first column. Returns its header.
    pub(crate) fn drop_first_column(&mut self) -> Option<String> {
        if self.headers.is_empty() {
            return None;
        }
        for row in &mut self.rows {
            if !row.is_empty() {
                row.remove(0);
            }
        }
        Some(self.headers.remove(0))
    }

    /// Types every column and assembles the table.
    pub(crate) fn into_table(
        mut self,
        dataset: &str,
        options: &LoadOptions,
    ) -> Result<BaseTable, LoadError> {
        if self.headers.is_empty() {
            return Err(LoadError::Empty {
                dataset: dataset.to_string(),
            });
        }

        // Blank headers get the positional names spreadsheet tools use.
        for (i, header) in self.headers.iter_mut().enumerate() {
            if header.is_empty() {
                *header = format!("Unnamed: {i}");
            }
        }

        let mut seen = BTreeSet::new();
        for header in &self.headers {
            if !seen.insert(header.as_str()) {
                return Err(LoadError::DuplicateColumn {
                    dataset: dataset.to_string(),
                    column: header.clone(),
                });
            }
        }

        let width = self.headers.len();
        let mut columns: Vec<Vec<RawCell>> = vec![Vec::with_capacity(self.rows.len()); width];
        for (index, row) in self.rows.into_iter().enumerate() {
            // Workbook ranges trim trailing empty cells; anything wider is an error.
            if row.len() > width {
                return Err(LoadError::malformed(
                    dataset,
                    format!("row {} has {} cells, header has {width}", index + 1, row.len()),
                ));
            }
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.push(cells.next().unwrap_or(RawCell::Empty));
            }
        }

        let columns = self
            .headers
            .iter()
            .zip(&columns)
            .map(|(name, cells)| {
                build_column(dataset, name, cells, options.column_types.get(name).copied())
            })
            .collect::<Result<Vec<_>, _>>()?;

        BaseTable::new(dataset, columns)
    }
}
