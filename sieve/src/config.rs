// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Dashboard configuration.
//!
//! ```toml
//! data_dir = "data"
//!
//! [datasets.orders]
//! file = "orders.xlsx"
//! drop_leading_index = true
//!
//! [datasets.quantity]
//! file = "quantity.csv"
//!
//! [inputs]
//! QUANTITY_MAX = 30000
//! TIME_RANGE = "1..8"
//! MEDICINE_C = false
//! ```
//!
//! Entries under `[inputs]` override the defaults the dashboards declare.
//! String values use the literal syntax of [`parse_input_literal`].

use chrono::NaiveDate;
use serde::Deserialize;
use sieve_core::{InputId, InputSnapshot, InputValue};
use sieve_io::{DatasetSource, LoadOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration could not be read or parsed
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where one dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// Path relative to `data_dir`, or absolute
    pub file: PathBuf,
    /// Worksheet for spreadsheet sources
    #[serde(default)]
    pub sheet: Option<String>,
    /// Drop the unnamed row index column spreadsheet exports carry
    #[serde(default)]
    pub drop_leading_index: bool,
}

impl DatasetConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            sheet: None,
            drop_leading_index: false,
        }
    }

    #[must_use]
    pub fn with_leading_index(mut self) -> Self {
        self.drop_leading_index = true;
        self
    }

    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::new().drop_leading_index(self.drop_leading_index);
        match &self.sheet {
            Some(sheet) => options.sheet(sheet.clone()),
            None => options,
        }
    }
}

/// An input value as written in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputLiteral {
    Toggle(bool),
    Number(f64),
    Selection(Vec<String>),
    Text(String),
}

impl InputLiteral {
    #[must_use]
    pub fn to_value(&self) -> InputValue {
        match self {
            Self::Toggle(on) => InputValue::Toggle(*on),
            Self::Number(n) => InputValue::Number(*n),
            Self::Selection(items) => InputValue::Selection(items.clone()),
            Self::Text(text) => parse_input_literal(text),
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory relative dataset paths are resolved against
    pub data_dir: PathBuf,
    pub datasets: BTreeMap<String, DatasetConfig>,
    /// Initial input values overriding the dashboards' defaults
    pub inputs: BTreeMap<String, InputLiteral>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let datasets = [
            ("orders", DatasetConfig::new("orders.csv").with_leading_index()),
            ("quantity", DatasetConfig::new("quantity.csv")),
            ("records", DatasetConfig::new("records.csv")),
        ]
        .into_iter()
        .map(|(name, config)| (name.to_string(), config))
        .collect();

        Self {
            data_dir: PathBuf::from("data"),
            datasets,
            inputs: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if `text` is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a TOML file. A relative `data_dir` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }
        Ok(config)
    }

    /// Uses `data_dir` for every dataset path.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Overrides one initial input value.
    #[must_use]
    pub fn with_input(mut self, id: impl Into<String>, literal: InputLiteral) -> Self {
        self.inputs.insert(id.into(), literal);
        self
    }

    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&DatasetConfig> {
        self.datasets.get(name)
    }

    /// Resolved source of a dataset, `None` if it is not configured.
    ///
    /// # Errors
    ///
    /// [`sieve_core::LoadError::Malformed`] if the file extension is unsupported.
    pub fn source(
        &self,
        name: &str,
    ) -> Option<Result<(DatasetSource, LoadOptions), sieve_core::LoadError>> {
        let dataset = self.dataset(name)?;
        let path = self.data_dir.join(&dataset.file);
        Some(DatasetSource::from_path(path).map(|source| (source, dataset.load_options())))
    }

    /// The `[inputs]` table as a snapshot
    #[must_use]
    pub fn input_overrides(&self) -> InputSnapshot {
        self.inputs
            .iter()
            .map(|(id, literal)| (InputId::new(id.clone()), literal.to_value()))
            .collect()
    }
}

/// Parses the textual input syntax used in config files and on the command line.
///
/// | Text | Value |
/// |------|-------|
/// | `true`, `false` | toggle |
/// | `43000`, `2.5` | number |
/// | `2..6` | number range |
/// | `2021-01-01..2023-12-31` | date range |
/// | `[MedicineA, MedicineB]` | selection |
/// | anything else | text |
#[must_use]
pub fn parse_input_literal(text: &str) -> InputValue {
    let trimmed = text.trim();
    match trimmed {
        "true" => return InputValue::Toggle(true),
        "false" => return InputValue::Toggle(false),
        _ => {}
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return InputValue::Number(n);
    }
    if let Some((min, max)) = trimmed.split_once("..") {
        let (min, max) = (min.trim(), max.trim());
        if let (Ok(min), Ok(max)) = (min.parse::<f64>(), max.parse::<f64>()) {
            return InputValue::NumberRange(min, max);
        }
        if let (Ok(min), Ok(max)) = (
            NaiveDate::parse_from_str(min, "%Y-%m-%d"),
            NaiveDate::parse_from_str(max, "%Y-%m-%d"),
        ) {
            return InputValue::DateRange(min, max);
        }
    }
    if let Some(inner) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect();
        return InputValue::Selection(items);
    }
    InputValue::Text(text.to_string())
}
