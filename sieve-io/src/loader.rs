// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::source::{DatasetSource, LoadOptions, SourceFormat};
use crate::{csv_source, workbook};
use sieve_core::{BaseTable, LoadError};

/// Materializes a dataset into an immutable [`BaseTable`].
///
/// Called once per dataset when a session starts. Every column is typed from
/// its full contents (see [`SourceFormat`] for what can be read). When
/// `options.drop_leading_index` is set the first column is discarded before
/// typing.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if the file does not exist
/// - [`LoadError::Io`], [`LoadError::Csv`], [`LoadError::Workbook`] if the reader fails
/// - [`LoadError::Empty`] if there is no header row
/// - [`LoadError::DuplicateColumn`] or [`LoadError::Malformed`] on bad contents
pub fn load(
    name: &str,
    source: &DatasetSource,
    options: &LoadOptions,
) -> Result<BaseTable, LoadError> {
    let path = source.path();
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut sheet = match source.format() {
        SourceFormat::Csv => csv_source::read(path)?,
        SourceFormat::Workbook => workbook::read(path, options.sheet.as_deref())?,
    };

    if options.drop_leading_index {
        if let Some(header) = sheet.drop_first_column() {
            if !header.is_empty() {
                debug!(
                    "Dataset {}: dropped leading column '{}' as row index",
                    name, header
                );
            }
        }
    }

    let table = sheet.into_table(name, options)?;
    for column in table.columns() {
        debug!(
            "Dataset {}: column '{}' typed {}",
            name,
            column.name(),
            column.column_type()
        );
    }
    info!(
        "Loaded dataset {} from {}: {} rows, {} columns",
        name,
        path.display(),
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// [`load`] with the format inferred from the file extension.
///
/// # Errors
///
/// As [`load`], plus [`LoadError::Malformed`] for an unknown extension.
pub fn load_path(
    name: &str,
    path: impl Into<std::path::PathBuf>,
    options: &LoadOptions,
) -> Result<BaseTable, LoadError> {
    load(name, &DatasetSource::from_path(path)?, options)
}
