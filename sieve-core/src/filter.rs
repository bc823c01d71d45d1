// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Declarative row-keep predicates.
//!
//! A [`FilterSpec`] names a column and a constraint. Specs are combined with
//! logical AND: a row survives only if every spec keeps it.
//!
//! # Empty membership sets
//!
//! A [`FilterSpec::SetMembership`] with no allowed values places **no
//! restriction** on the column. Unchecking every category box shows every
//! category instead of an empty table.

use crate::{ColumnType, FilterError, Value};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// One constraint on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Keep rows with `min <= value <= max`
    Range {
        column: String,
        min: Value,
        max: Value,
    },
    /// Keep rows with `value <= max`
    Max { column: String, max: Value },
    /// Keep rows whose value is one of `allowed`; an empty set keeps every row
    SetMembership {
        column: String,
        allowed: BTreeSet<String>,
    },
}

impl FilterSpec {
    pub fn range(column: impl Into<String>, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::Range {
            column: column.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn max(column: impl Into<String>, max: impl Into<Value>) -> Self {
        Self::Max {
            column: column.into(),
            max: max.into(),
        }
    }

    pub fn set_membership<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SetMembership {
            column: column.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Column the spec constrains
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Range { column, .. } | Self::Max { column, .. } | Self::SetMembership { column, .. } => {
                column
            }
        }
    }

    /// Whether the spec keeps every row regardless of data
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::SetMembership { allowed, .. } if allowed.is_empty())
    }

    /// Checks the spec against the type of the column it targets.
    ///
    /// # Errors
    ///
    /// - [`FilterError::TypeMismatch`] if a bound's kind differs from the column
    ///   type, a bound is null, or a membership filter targets a non-categorical column
    /// - [`FilterError::InvalidBounds`] if a range has `min > max` or a NaN bound
    pub fn validate(&self, column_type: ColumnType) -> Result<(), FilterError> {
        match self {
            Self::Range { column, min, max } => {
                check_bound(column, column_type, min)?;
                check_bound(column, column_type, max)?;
                match min.compare(max) {
                    Some(Ordering::Less | Ordering::Equal) => Ok(()),
                    _ => Err(FilterError::InvalidBounds {
                        column: column.clone(),
                        min: min.to_string(),
                        max: max.to_string(),
                    }),
                }
            }
            Self::Max { column, max } => {
                check_bound(column, column_type, max)?;
                if max.as_number().is_some_and(f64::is_nan) {
                    return Err(FilterError::InvalidBounds {
                        column: column.clone(),
                        min: String::new(),
                        max: max.to_string(),
                    });
                }
                Ok(())
            }
            Self::SetMembership { column, .. } => {
                if column_type == ColumnType::Categorical {
                    Ok(())
                } else {
                    Err(FilterError::type_mismatch(
                        column.clone(),
                        column_type.name(),
                        "categorical",
                    ))
                }
            }
        }
    }

    /// Whether a cell passes the spec.
    ///
    /// Assumes [`validate`](Self::validate) succeeded for the cell's column.
    /// Nulls fail range and max specs and fail non-empty membership specs.
    #[must_use]
    pub fn keeps(&self, value: &Value) -> bool {
        match self {
            Self::Range { min, max, .. } => {
                matches!(
                    value.compare(min),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(value.compare(max), Some(Ordering::Less | Ordering::Equal))
            }
            Self::Max { max, .. } => {
                matches!(value.compare(max), Some(Ordering::Less | Ordering::Equal))
            }
            Self::SetMembership { allowed, .. } => {
                allowed.is_empty() || value.as_text().is_some_and(|v| allowed.contains(v))
            }
        }
    }
}

fn check_bound(column: &str, column_type: ColumnType, bound: &Value) -> Result<(), FilterError> {
    let comparable = matches!(column_type, ColumnType::Numeric | ColumnType::Date);
    if comparable && !bound.is_null() && bound.fits(column_type) {
        Ok(())
    } else {
        Err(FilterError::type_mismatch(
            column,
            column_type.name(),
            bound.kind(),
        ))
    }
}
