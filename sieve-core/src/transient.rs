// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Columns computed during recomputation.
//!
//! Transient columns exist only on a derived table. They let a page filter or
//! plot on values the source file does not hold directly, such as a date built
//! from separate year and month columns, without ever mutating the base table.

use crate::{BaseTable, Column, ColumnType, FilterError, Value};
use chrono::NaiveDate;

/// Recipe for one transient column, evaluated against every base row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransientColumn {
    /// Joins the rendered cells of `parts` with `separator` into a categorical column.
    Concat {
        name: String,
        parts: Vec<String>,
        separator: String,
    },
    /// Builds the first day of the month from a numeric year column and a month
    /// column holding a month name (`"January"`, `"Jan"`) or a month number.
    YearMonthDate {
        name: String,
        year: String,
        month: String,
    },
}

impl TransientColumn {
    pub fn concat<I, S>(name: impl Into<String>, parts: I, separator: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Concat {
            name: name.into(),
            parts: parts.into_iter().map(Into::into).collect(),
            separator: separator.into(),
        }
    }

    pub fn year_month_date(
        name: impl Into<String>,
        year: impl Into<String>,
        month: impl Into<String>,
    ) -> Self {
        Self::YearMonthDate {
            name: name.into(),
            year: year.into(),
            month: month.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Concat { name, .. } | Self::YearMonthDate { name, .. } => name,
        }
    }

    /// Base columns the recipe reads
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        match self {
            Self::Concat { parts, .. } => parts.iter().map(String::as_str).collect(),
            Self::YearMonthDate { year, month, .. } => vec![year.as_str(), month.as_str()],
        }
    }

    /// Evaluates the recipe for every base row.
    ///
    /// A null in any source cell yields a null cell.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnknownColumn`] if a source column is absent
    /// - [`FilterError::Transient`] if a year/month pair is not a valid date
    pub fn compute(&self, base: &BaseTable) -> Result<Column, FilterError> {
        let sources = self
            .sources()
            .into_iter()
            .map(|name| base.column(name).ok_or_else(|| FilterError::unknown_column(name)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(base.len());
        for row in 0..base.len() {
            let cells: Vec<&Value> = sources.iter().filter_map(|c| c.get(row)).collect();
            if cells.iter().any(|v| v.is_null()) {
                values.push(Value::Null);
                continue;
            }
            values.push(match self {
                Self::Concat { separator, .. } => Value::Text(
                    cells
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(separator),
                ),
                Self::YearMonthDate { name, .. } => {
                    Value::Date(first_of_month(cells[0], cells[1]).ok_or_else(|| {
                        FilterError::Transient {
                            column: name.clone(),
                            row,
                            context: format!("no date for year {} month {}", cells[0], cells[1]),
                        }
                    })?)
                }
            });
        }

        let column_type = match self {
            Self::Concat { .. } => ColumnType::Categorical,
            Self::YearMonthDate { .. } => ColumnType::Date,
        };
        // Every pushed cell matches `column_type`, so construction cannot fail.
        Column::new(self.name(), column_type, values).map_err(|e| FilterError::Transient {
            column: self.name().to_string(),
            row: 0,
            context: e.to_string(),
        })
    }
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number (1-12) from a name, a three-letter abbreviation or a number.
#[must_use]
pub fn parse_month(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) if n.fract() == 0.0 && (1.0..=12.0).contains(n) => Some(*n as u32),
        Value::Text(text) => {
            let text = text.trim().to_lowercase();
            if let Ok(n) = text.parse::<u32>() {
                return (1..=12).contains(&n).then_some(n);
            }
            if text.len() < 3 {
                return None;
            }
            MONTHS
                .iter()
                .position(|m| *m == text || (text.len() == 3 && m.starts_with(&text)))
                .map(|i| i as u32 + 1)
        }
        _ => None,
    }
}

fn first_of_month(year: &Value, month: &Value) -> Option<NaiveDate> {
    let year = match year {
        Value::Number(n) if n.fract() == 0.0 => *n as i32,
        Value::Text(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, parse_month(month)?, 1)
}
