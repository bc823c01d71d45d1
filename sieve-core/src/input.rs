// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Typed input snapshots.
//!
//! The host exposes the current value of every sidebar control under a
//! case-sensitive identifier. Identifiers follow `<DATASET>_<FIELD>` so that
//! pages mounted side by side do not collide. Lookups are typed: asking for a
//! date range on an input that holds a toggle is an [`InputError`], never a
//! silent coercion.

use crate::InputError;
use chrono::NaiveDate;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Case-sensitive identifier of a host input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InputId(String);

impl InputId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InputId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for InputId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Current value of one host input.
///
/// Equality treats NaN as equal to NaN, so an unchanged NaN entry never reads
/// as a change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InputValue {
    /// Inclusive date interval from a date-range picker
    DateRange(NaiveDate, NaiveDate),
    /// Inclusive numeric interval from a two-handled slider
    NumberRange(f64, f64),
    /// Single numeric entry
    Number(f64),
    /// Checkbox
    Toggle(bool),
    /// Multi-select
    Selection(Vec<String>),
    /// Free text
    Text(String),
}

impl InputValue {
    /// Kind name used in diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DateRange(..) => "date range",
            Self::NumberRange(..) => "number range",
            Self::Number(_) => "number",
            Self::Toggle(_) => "toggle",
            Self::Selection(_) => "selection",
            Self::Text(_) => "text",
        }
    }
}

impl PartialEq for InputValue {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        match (self, other) {
            (Self::DateRange(a0, a1), Self::DateRange(b0, b1)) => a0 == b0 && a1 == b1,
            (Self::NumberRange(a0, a1), Self::NumberRange(b0, b1)) => {
                same(*a0, *b0) && same(*a1, *b1)
            }
            (Self::Number(a), Self::Number(b)) => same(*a, *b),
            (Self::Toggle(a), Self::Toggle(b)) => a == b,
            (Self::Selection(a), Self::Selection(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// One observed change of a host input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputChange {
    pub id: InputId,
    pub value: InputValue,
}

impl InputChange {
    pub fn new(id: impl Into<InputId>, value: InputValue) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// The value of every registered input at one instant.
///
/// Snapshots are plain values: cloning one freezes the inputs a recomputation
/// was derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputSnapshot {
    values: BTreeMap<InputId, InputValue>,
}

impl InputSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, id: impl Into<InputId>, value: InputValue) -> Self {
        self.values.insert(id.into(), value);
        self
    }

    /// Stores `value`, returning `true` if it differs from the stored one.
    pub fn set(&mut self, id: impl Into<InputId>, value: InputValue) -> bool {
        let id = id.into();
        if self.values.get(&id) == Some(&value) {
            return false;
        }
        self.values.insert(id, value);
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&InputValue> {
        self.values.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InputId, &InputValue)> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of this snapshot restricted to `ids`.
    ///
    /// Ids without a value are left out, so two projections compare equal exactly
    /// when the watched inputs hold the same values.
    #[must_use]
    pub fn project<'a>(&self, ids: impl IntoIterator<Item = &'a InputId>) -> Self {
        let values = ids
            .into_iter()
            .filter_map(|id| self.values.get(id).map(|v| (id.clone(), v.clone())))
            .collect();
        Self { values }
    }

    fn require(&self, id: &str) -> Result<&InputValue, InputError> {
        self.values.get(id).ok_or_else(|| InputError::Missing {
            input: id.to_string(),
        })
    }

    fn wrong_kind(id: &str, expected: &'static str, actual: &InputValue) -> InputError {
        InputError::WrongKind {
            input: id.to_string(),
            expected,
            actual: actual.kind(),
        }
    }

    /// # Errors
    ///
    /// [`InputError`] if the input is missing or is not a date range.
    pub fn date_range(&self, id: &str) -> Result<(NaiveDate, NaiveDate), InputError> {
        match self.require(id)? {
            InputValue::DateRange(min, max) => Ok((*min, *max)),
            other => Err(Self::wrong_kind(id, "date range", other)),
        }
    }

    /// # Errors
    ///
    /// [`InputError`] if the input is missing or is not a number range.
    pub fn number_range(&self, id: &str) -> Result<(f64, f64), InputError> {
        match self.require(id)? {
            InputValue::NumberRange(min, max) => Ok((*min, *max)),
            other => Err(Self::wrong_kind(id, "number range", other)),
        }
    }

    /// # Errors
    ///
    /// [`InputError`] if the input is missing or is not a number.
    pub fn number(&self, id: &str) -> Result<f64, InputError> {
        match self.require(id)? {
            InputValue::Number(n) => Ok(*n),
            other => Err(Self::wrong_kind(id, "number", other)),
        }
    }

    /// # Errors
    ///
    /// [`InputError`] if the input is missing or is not a toggle.
    pub fn toggle(&self, id: &str) -> Result<bool, InputError> {
        match self.require(id)? {
            InputValue::Toggle(on) => Ok(*on),
            other => Err(Self::wrong_kind(id, "toggle", other)),
        }
    }

    /// # Errors
    ///
    /// [`InputError`] if the input is missing or is not a selection.
    pub fn selection(&self, id: &str) -> Result<&[String], InputError> {
        match self.require(id)? {
            InputValue::Selection(items) => Ok(items),
            other => Err(Self::wrong_kind(id, "selection", other)),
        }
    }

    /// # Errors
    ///
    /// [`InputError`] if the input is missing or is not text.
    pub fn text(&self, id: &str) -> Result<&str, InputError> {
        match self.require(id)? {
            InputValue::Text(text) => Ok(text),
            other => Err(Self::wrong_kind(id, "text", other)),
        }
    }
}

impl FromIterator<(InputId, InputValue)> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = (InputId, InputValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<InputChange> for InputSnapshot {
    fn extend<I: IntoIterator<Item = InputChange>>(&mut self, iter: I) {
        for change in iter {
            self.values.insert(change.id, change.value);
        }
    }
}
