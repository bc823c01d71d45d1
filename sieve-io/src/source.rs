// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sieve_core::{ColumnType, LoadError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk layout of a dataset source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text with a header row
    Csv,
    /// Spreadsheet workbook (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`)
    Workbook,
}

impl SourceFormat {
    /// Infers the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Where a dataset lives and how it is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    path: PathBuf,
    format: SourceFormat,
}

impl DatasetSource {
    /// Source whose format is inferred from the path's extension.
    ///
    /// # Errors
    ///
    /// [`LoadError::Malformed`] if the extension is not a supported format.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let format = SourceFormat::from_path(&path).ok_or_else(|| {
            LoadError::malformed(
                path.display().to_string(),
                "unsupported file extension, expected csv or a spreadsheet",
            )
        })?;
        Ok(Self { path, format })
    }

    pub fn new(path: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> SourceFormat {
        self.format
    }
}

/// Per-dataset loading knobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Drop the first column (the unnamed row index spreadsheet exports carry)
    pub drop_leading_index: bool,
    /// Worksheet to read; the first sheet when `None`. Ignored for CSV.
    pub sheet: Option<String>,
    /// Column types that bypass inference
    pub column_types: BTreeMap<String, ColumnType>,
}

impl LoadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn drop_leading_index(mut self, drop: bool) -> Self {
        self.drop_leading_index = drop;
        self
    }

    #[must_use]
    pub fn sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn column_type(mut self, column: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_types.insert(column.into(), column_type);
        self
    }
}
