// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filter bindings: how host inputs become filter specs.
//!
//! A [`FilterBinding`] ties one column constraint to the inputs that drive it.
//! A [`PredicateSet`] is the ordered list of bindings of one page. Because every
//! binding declares the inputs it reads, the set of recomputation triggers is
//! derived from the bindings themselves ([`PredicateSet::triggers`]) and can
//! never drift from the inputs the filters actually use.
//!
//! # Example
//!
//! ```
//! use sieve_core::{FilterBinding, InputSnapshot, InputValue, PredicateSet};
//!
//! let predicates = PredicateSet::new(vec![
//!     FilterBinding::range("time_to_complete_hrs", "TIME_RANGE"),
//!     FilterBinding::toggles(
//!         "material",
//!         [("MEDICINE_A", "MedicineA"), ("MEDICINE_B", "MedicineB")],
//!     ),
//! ]);
//!
//! let triggers: Vec<_> = predicates.triggers().iter().map(|id| id.as_str()).collect();
//! assert_eq!(triggers, ["MEDICINE_A", "MEDICINE_B", "TIME_RANGE"]);
//!
//! let inputs = InputSnapshot::new()
//!     .with("TIME_RANGE", InputValue::NumberRange(2.0, 6.0))
//!     .with("MEDICINE_A", InputValue::Toggle(false))
//!     .with("MEDICINE_B", InputValue::Toggle(false));
//!
//! let specs = predicates.resolve(&inputs).unwrap();
//! assert!(specs[1].is_unrestricted());
//! ```

use crate::{FilterError, FilterSpec, InputId, InputSnapshot, Value};
use std::collections::BTreeSet;

/// One column constraint and the inputs feeding it.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterBinding {
    /// Inclusive range from a date-range or number-range input
    Range { column: String, input: InputId },
    /// Upper bound from a number input
    Max { column: String, input: InputId },
    /// Membership where each checked toggle contributes one category
    Toggles {
        column: String,
        options: Vec<(InputId, String)>,
    },
    /// Membership from a multi-select input
    Selection { column: String, input: InputId },
}

impl FilterBinding {
    pub fn range(column: impl Into<String>, input: impl Into<InputId>) -> Self {
        Self::Range {
            column: column.into(),
            input: input.into(),
        }
    }

    pub fn max(column: impl Into<String>, input: impl Into<InputId>) -> Self {
        Self::Max {
            column: column.into(),
            input: input.into(),
        }
    }

    pub fn toggles<I, K, C>(column: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<InputId>,
        C: Into<String>,
    {
        Self::Toggles {
            column: column.into(),
            options: options
                .into_iter()
                .map(|(id, category)| (id.into(), category.into()))
                .collect(),
        }
    }

    pub fn selection(column: impl Into<String>, input: impl Into<InputId>) -> Self {
        Self::Selection {
            column: column.into(),
            input: input.into(),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Range { column, .. }
            | Self::Max { column, .. }
            | Self::Toggles { column, .. }
            | Self::Selection { column, .. } => column,
        }
    }

    /// Inputs read by [`resolve`](Self::resolve)
    pub fn inputs(&self) -> Box<dyn Iterator<Item = &InputId> + '_> {
        match self {
            Self::Range { input, .. } | Self::Max { input, .. } | Self::Selection { input, .. } => {
                Box::new(std::iter::once(input))
            }
            Self::Toggles { options, .. } => Box::new(options.iter().map(|(id, _)| id)),
        }
    }

    /// Builds the spec for the given inputs.
    ///
    /// Pure: the same snapshot always yields the same spec.
    ///
    /// # Errors
    ///
    /// [`FilterError::Input`] if an input is missing or has the wrong kind.
    pub fn resolve(&self, inputs: &InputSnapshot) -> Result<FilterSpec, FilterError> {
        Ok(match self {
            Self::Range { column, input } => {
                let (min, max) = match inputs.date_range(input.as_str()) {
                    Ok((min, max)) => (Value::Date(min), Value::Date(max)),
                    Err(_) => {
                        let (min, max) = inputs.number_range(input.as_str())?;
                        (Value::Number(min), Value::Number(max))
                    }
                };
                FilterSpec::Range {
                    column: column.clone(),
                    min,
                    max,
                }
            }
            Self::Max { column, input } => FilterSpec::Max {
                column: column.clone(),
                max: Value::Number(inputs.number(input.as_str())?),
            },
            Self::Toggles { column, options } => {
                let mut allowed = BTreeSet::new();
                for (id, category) in options {
                    if inputs.toggle(id.as_str())? {
                        allowed.insert(category.clone());
                    }
                }
                FilterSpec::SetMembership {
                    column: column.clone(),
                    allowed,
                }
            }
            Self::Selection { column, input } => FilterSpec::SetMembership {
                column: column.clone(),
                allowed: inputs.selection(input.as_str())?.iter().cloned().collect(),
            },
        })
    }
}

/// The ordered filter bindings of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    bindings: Vec<FilterBinding>,
    triggers: BTreeSet<InputId>,
}

impl PredicateSet {
    #[must_use]
    pub fn new(bindings: Vec<FilterBinding>) -> Self {
        let triggers = bindings
            .iter()
            .flat_map(FilterBinding::inputs)
            .cloned()
            .collect();
        Self { bindings, triggers }
    }

    #[must_use]
    pub fn bindings(&self) -> &[FilterBinding] {
        &self.bindings
    }

    /// Every input read by any binding
    #[must_use]
    pub fn triggers(&self) -> &BTreeSet<InputId> {
        &self.triggers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolves every binding, in order.
    ///
    /// # Errors
    ///
    /// The first [`FilterError`] raised by a binding.
    pub fn resolve(&self, inputs: &InputSnapshot) -> Result<Vec<FilterSpec>, FilterError> {
        self.bindings.iter().map(|b| b.resolve(inputs)).collect()
    }
}

impl FromIterator<FilterBinding> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = FilterBinding>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
