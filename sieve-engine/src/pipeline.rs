// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The filter pipeline: base table plus specs in, derived table out.

use sieve_core::{BaseTable, Column, DerivedTable, FilterError, FilterSpec, TransientColumn};
use std::sync::Arc;

/// Applies `specs` to `base` with logical AND.
///
/// Transient columns are computed first so specs may target them. Every spec
/// is validated against its column before any row is evaluated, so the
/// function either returns a fully filtered table or an error, never a
/// partially filtered one. Specs with an empty membership set are skipped.
///
/// # Errors
///
/// - [`FilterError::UnknownColumn`] if a spec or transient source names a missing column
/// - [`FilterError::InvalidBounds`] / [`FilterError::TypeMismatch`] from spec validation
/// - [`FilterError::ColumnCollision`] if a transient column reuses an existing name
/// - [`FilterError::Transient`] if a transient column cannot be computed
pub fn apply_filters(
    base: &Arc<BaseTable>,
    transient: &[TransientColumn],
    specs: &[FilterSpec],
    generation: u64,
) -> Result<DerivedTable, FilterError> {
    for (i, column) in transient.iter().enumerate() {
        let name = column.name();
        if base.column(name).is_some() || transient[..i].iter().any(|t| t.name() == name) {
            return Err(FilterError::ColumnCollision {
                column: name.to_string(),
            });
        }
    }

    let computed = transient
        .iter()
        .map(|t| t.compute(base))
        .collect::<Result<Vec<Column>, _>>()?;

    let lookup = |name: &str| {
        base.column(name)
            .or_else(|| computed.iter().find(|c| c.name() == name))
            .ok_or_else(|| FilterError::unknown_column(name))
    };

    let mut active = Vec::with_capacity(specs.len());
    for spec in specs {
        let column = lookup(spec.column())?;
        spec.validate(column.column_type())?;
        if !spec.is_unrestricted() {
            active.push((spec, column));
        }
    }

    let rows: Vec<usize> = (0..base.len())
        .filter(|&row| {
            active
                .iter()
                .all(|(spec, column)| column.get(row).is_some_and(|v| spec.keeps(v)))
        })
        .collect();

    let transient = computed.iter().map(|c| c.select(&rows)).collect();
    Ok(DerivedTable::new(Arc::clone(base), rows, transient, generation))
}
