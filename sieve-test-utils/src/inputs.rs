// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::NaiveDate;
use sieve_core::{InputSnapshot, InputValue};

/// Sidebar defaults of the material breakdown page
pub fn quantity_inputs() -> InputSnapshot {
    InputSnapshot::new()
        .with("TIME_RANGE", InputValue::NumberRange(2.0, 6.0))
        .with("QUANTITY_MAX", InputValue::Number(43000.0))
        .with("MEDICINE_A", InputValue::Toggle(true))
        .with("MEDICINE_B", InputValue::Toggle(true))
        .with("MEDICINE_C", InputValue::Toggle(true))
}

/// Orders page with a date range covering every fixture row
pub fn orders_inputs() -> InputSnapshot {
    InputSnapshot::new().with(
        "ORDERS_DATE_RANGE",
        InputValue::DateRange(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        ),
    )
}

/// Sidebar defaults of the batch records page
pub fn records_inputs() -> InputSnapshot {
    InputSnapshot::new()
        .with("ERRORS_PER_RECORD_RANGE", InputValue::NumberRange(0.0, 65.0))
        .with("DEPARTMENT_TYPE_AEROBES", InputValue::Toggle(true))
        .with("DEPARTMENT_TYPE_ANAEROBES", InputValue::Toggle(true))
        .with("DEPARTMENT_TYPE_EUCS", InputValue::Toggle(true))
        .with("DEPARTMENT_TYPE_ROW", InputValue::Toggle(true))
}
