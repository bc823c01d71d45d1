// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Raw cells and column type normalization.
//!
//! Readers hand over cells as they found them. A column's type is decided
//! from all of its non-empty cells at once: numeric if every cell reads as a
//! number, else date, else boolean, else categorical. Empty cells become
//! [`Value::Null`] whatever the outcome.

use chrono::{NaiveDate, NaiveDateTime};
use sieve_core::{Column, ColumnType, LoadError, Value};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A cell as read from the source, before its column type is known.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

impl RawCell {
    /// Cell from CSV text; surrounding whitespace is ignored.
    pub(crate) fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text.to_string())
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => parse_date(text),
            _ => None,
        }
    }

    fn boolean(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(text) if text.eq_ignore_ascii_case("true") => Some(true),
            Self::Text(text) if text.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(n) => Value::Number(*n).to_string(),
            Self::Text(text) => text.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Date(date) => Value::Date(*date).to_string(),
        }
    }

    fn to_value(&self, column_type: ColumnType) -> Option<Value> {
        if *self == Self::Empty {
            return Some(Value::Null);
        }
        match column_type {
            ColumnType::Numeric => self.number().map(Value::Number),
            ColumnType::Date => self.date().map(Value::Date),
            ColumnType::Boolean => self.boolean().map(Value::Bool),
            ColumnType::Categorical => Some(Value::Text(self.text())),
        }
    }
}

/// Parses the date spellings found in spreadsheet exports.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Picks the narrowest type every non-empty cell converts to.
pub(crate) fn infer_type(cells: &[RawCell]) -> ColumnType {
    let mut present = cells.iter().filter(|c| **c != RawCell::Empty).peekable();
    if present.peek().is_none() {
        return ColumnType::Categorical;
    }
    let present: Vec<&RawCell> = present.collect();
    if present.iter().all(|c| c.number().is_some()) {
        ColumnType::Numeric
    } else if present.iter().all(|c| c.date().is_some()) {
        ColumnType::Date
    } else if present.iter().all(|c| c.boolean().is_some()) {
        ColumnType::Boolean
    } else {
        ColumnType::Categorical
    }
}

/// Converts a column of raw cells, inferring the type unless `forced`.
///
/// # Errors
///
/// [`LoadError::Malformed`] if a cell does not convert to a forced type.
pub(crate) fn build_column(
    dataset: &str,
    name: &str,
    cells: &[RawCell],
    forced: Option<ColumnType>,
) -> Result<Column, LoadError> {
    let column_type = forced.unwrap_or_else(|| infer_type(cells));
    let values = cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            cell.to_value(column_type).ok_or_else(|| {
                LoadError::malformed(
                    dataset,
                    format!(
                        "row {} of column {name}: {:?} is not {column_type}",
                        row + 1,
                        cell.text()
                    ),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Column::new(name, column_type, values)
}
