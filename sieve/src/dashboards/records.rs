// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::PageSpec;
use sieve_core::{FilterBinding, InputValue};
use sieve_view::{Axis, ChartBuilder, CountFormatter, TableRenderer};

const DEPARTMENTS: [(&str, &str); 4] = [
    ("DEPARTMENT_TYPE_AEROBES", "Aerobes"),
    ("DEPARTMENT_TYPE_ANAEROBES", "Anaerobes"),
    ("DEPARTMENT_TYPE_EUCS", "EUCS"),
    ("DEPARTMENT_TYPE_ROW", "ROW"),
];

/// Batch record errors per department.
#[must_use]
pub fn records() -> PageSpec {
    let mut page = PageSpec::new("records", "Records")
        .dataset("records")
        .filter(FilterBinding::range("Errors", "ERRORS_PER_RECORD_RANGE"))
        .filter(FilterBinding::toggles("Department", DEPARTMENTS))
        .input("ERRORS_PER_RECORD_RANGE", InputValue::NumberRange(0.0, 65.0))
        .output(CountFormatter::new("records_record_count_string"))
        .output(TableRenderer::new("records_filtered_table"))
        .output(
            ChartBuilder::funnel(
                "records_output_widget1",
                Axis::new("Errors"),
                Axis::new("Department"),
            )
            .title("Records with Plotly Express"),
        );

    for (toggle, _) in DEPARTMENTS {
        page = page.input(toggle, InputValue::Toggle(true));
    }
    page
}
