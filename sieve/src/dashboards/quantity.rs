// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::PageSpec;
use sieve_core::{FilterBinding, InputValue};
use sieve_view::{Axis, ChartBuilder, CountFormatter, TableRenderer};

const MATERIALS: [(&str, &str); 3] = [
    ("MEDICINE_A", "MedicineA"),
    ("MEDICINE_B", "MedicineB"),
    ("MEDICINE_C", "MedicineC"),
];

/// Material breakdown: order size against completion time.
#[must_use]
pub fn quantity() -> PageSpec {
    let mut page = PageSpec::new("quantity", "Material Breakdown")
        .dataset("quantity")
        .filter(FilterBinding::range("time_to_complete_hrs", "TIME_RANGE"))
        .filter(FilterBinding::max("order_size_units", "QUANTITY_MAX"))
        .filter(FilterBinding::toggles("material", MATERIALS))
        .input("TIME_RANGE", InputValue::NumberRange(2.0, 6.0))
        .input("QUANTITY_MAX", InputValue::Number(43000.0))
        .output(CountFormatter::new("quantity_record_count_string"))
        .output(TableRenderer::new("quantity_filtered_table"))
        .output(
            ChartBuilder::scatter(
                "quantity_output_widget1",
                Axis::new("order_size_units").labelled("Order Size"),
                Axis::new("time_to_complete_hrs").labelled("Time to Complete (hrs)"),
            )
            .color("material")
            .title("Quantity Plot (Plotly Express)"),
        );

    for (toggle, _) in MATERIALS {
        page = page.input(toggle, InputValue::Toggle(true));
    }
    page
}
