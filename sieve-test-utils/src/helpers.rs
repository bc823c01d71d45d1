// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sieve_core::DerivedTable;

/// Asserts the derived rows are distinct, ordered base rows.
pub fn assert_subset_of_base(table: &DerivedTable) {
    let rows = table.row_indices();
    assert!(
        table.len() <= table.base().len(),
        "derived table has {} rows, base only {}",
        table.len(),
        table.base().len()
    );
    assert!(
        rows.windows(2).all(|w| w[0] < w[1]),
        "derived rows are not strictly increasing: {rows:?}"
    );
    assert!(
        rows.iter().all(|&r| r < table.base().len()),
        "derived rows reference rows outside the base table: {rows:?}"
    );
}

/// Numeric cells of `column`, panicking on anything else.
pub fn numbers(table: &DerivedTable, column: &str) -> Vec<f64> {
    table
        .column(column)
        .unwrap_or_else(|| panic!("no column {column}"))
        .iter()
        .map(|v| v.as_number().unwrap_or_else(|| panic!("{v:?} is not a number")))
        .collect()
}

/// Text cells of `column`, panicking on anything else.
pub fn texts(table: &DerivedTable, column: &str) -> Vec<String> {
    table
        .column(column)
        .unwrap_or_else(|| panic!("no column {column}"))
        .iter()
        .map(|v| {
            v.as_text()
                .unwrap_or_else(|| panic!("{v:?} is not text"))
                .to_string()
        })
        .collect()
}
