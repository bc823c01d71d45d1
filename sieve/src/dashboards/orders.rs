// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::PageSpec;
use chrono::NaiveDate;
use sieve_core::{FilterBinding, InputValue, TransientColumn};
use sieve_view::{Axis, ChartBuilder, CountFormatter, TableRenderer};

const DEFAULT_START: (i32, u32, u32) = (2021, 1, 1);
const DEFAULT_END: (i32, u32, u32) = (2023, 12, 31);

/// Monthly orders filtered by a date range over `Year` and `Month`.
#[must_use]
pub fn orders() -> PageSpec {
    let mut page = PageSpec::new("orders", "Orders")
        .dataset("orders")
        .transient(TransientColumn::year_month_date("Date", "Year", "Month"))
        .transient(TransientColumn::concat("year-mon", ["Year", "Month"], "-"))
        .filter(FilterBinding::range("Date", "ORDERS_DATE_RANGE"))
        .output(CountFormatter::new("orders_record_count_string"))
        .output(TableRenderer::new("orders_filtered_table").hide(["Date"]))
        .output(
            ChartBuilder::scatter(
                "orders_output_widget1",
                Axis::new("Year"),
                Axis::new("Number of Orders"),
            )
            .color("Month")
            .title("Orders Scatter Chart (Plotly Express)"),
        )
        .output(
            ChartBuilder::line(
                "orders_output_widget2",
                Axis::new("year-mon").labelled("Year-Mon"),
                Axis::new("Number of Orders").labelled("Orders"),
            )
            .title("Orders Line Chart (Plotly Express)"),
        );

    if let (Some(start), Some(end)) = (date(DEFAULT_START), date(DEFAULT_END)) {
        page = page.input("ORDERS_DATE_RANGE", InputValue::DateRange(start, end));
    }
    page
}

fn date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
