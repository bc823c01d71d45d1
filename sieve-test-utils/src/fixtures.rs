// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sieve_core::{BaseTable, Column, ColumnType, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn numeric(name: &str, values: &[f64]) -> Column {
    Column::new(
        name,
        ColumnType::Numeric,
        values.iter().copied().map(Value::Number).collect(),
    )
    .unwrap()
}

fn categorical(name: &str, values: &[&str]) -> Column {
    Column::new(
        name,
        ColumnType::Categorical,
        values.iter().map(|v| Value::from(*v)).collect(),
    )
    .unwrap()
}

/// Production-line quantities: `order_size_units`, `time_to_complete_hrs`, `material`.
pub fn quantity_table() -> Arc<BaseTable> {
    Arc::new(
        BaseTable::new(
            "quantity",
            vec![
                numeric(
                    "order_size_units",
                    &[
                        12000.0, 45000.0, 30000.0, 8000.0, 41000.0, 50000.0, 22000.0, 15000.0,
                        39000.0, 27000.0,
                    ],
                ),
                numeric(
                    "time_to_complete_hrs",
                    &[2.0, 3.5, 6.0, 1.5, 4.0, 7.5, 5.0, 2.5, 9.0, 6.5],
                ),
                categorical(
                    "material",
                    &[
                        "MedicineA", "MedicineB", "MedicineC", "MedicineA", "MedicineB",
                        "MedicineC", "MedicineA", "MedicineC", "MedicineB", "MedicineA",
                    ],
                ),
            ],
        )
        .unwrap(),
    )
}

/// Monthly order counts: `Year`, `Month` (month name), `Number of Orders`.
pub fn orders_table() -> Arc<BaseTable> {
    Arc::new(
        BaseTable::new(
            "orders",
            vec![
                numeric(
                    "Year",
                    &[2021.0, 2021.0, 2021.0, 2022.0, 2022.0, 2023.0, 2023.0],
                ),
                categorical(
                    "Month",
                    &[
                        "January", "February", "March", "January", "June", "March", "December",
                    ],
                ),
                numeric(
                    "Number of Orders",
                    &[120.0, 95.0, 143.0, 130.0, 160.0, 175.0, 190.0],
                ),
            ],
        )
        .unwrap(),
    )
}

/// Batch record errors: `Department`, `Errors`, `Material`, `Employee`.
pub fn records_table() -> Arc<BaseTable> {
    Arc::new(
        BaseTable::new(
            "records",
            vec![
                categorical(
                    "Department",
                    &["Aerobes", "Anaerobes", "EUCS", "ROW", "Aerobes", "EUCS"],
                ),
                numeric("Errors", &[5.0, 12.0, 0.0, 40.0, 65.0, 22.0]),
                categorical(
                    "Material",
                    &[
                        "MedicineA", "MedicineB", "MedicineC", "MedicineA", "MedicineB",
                        "MedicineA",
                    ],
                ),
                categorical("Employee", &["Ann", "Ben", "Cal", "Dee", "Eve", "Fay"]),
            ],
        )
        .unwrap(),
    )
}

/// `value` = 1..=n and `group` cycling through `A`, `B`, `C`.
pub fn numbered_table(n: usize) -> Arc<BaseTable> {
    let values: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    let groups: Vec<&str> = (0..n).map(|i| ["A", "B", "C"][i % 3]).collect();
    Arc::new(
        BaseTable::new(
            "numbered",
            vec![numeric("value", &values), categorical("group", &groups)],
        )
        .unwrap(),
    )
}

/// Orders export with the unnamed leading index column spreadsheets add.
pub const ORDERS_CSV: &str = "\
,Year,Month,Number of Orders
0,2021,January,120
1,2021,February,95
2,2021,March,143
3,2022,January,130
4,2022,June,160
5,2023,March,175
6,2023,December,190
";

pub const QUANTITY_CSV: &str = "\
order_size_units,time_to_complete_hrs,material
12000,2.0,MedicineA
45000,3.5,MedicineB
30000,6.0,MedicineC
8000,1.5,MedicineA
41000,4.0,MedicineB
50000,7.5,MedicineC
22000,5.0,MedicineA
15000,2.5,MedicineC
39000,9.0,MedicineB
27000,6.5,MedicineA
";

pub const RECORDS_CSV: &str = "\
Department,Errors,Material,Employee
Aerobes,5,MedicineA,Ann
Anaerobes,12,MedicineB,Ben
EUCS,0,MedicineC,Cal
ROW,40,MedicineA,Dee
Aerobes,65,MedicineB,Eve
EUCS,22,MedicineA,Fay
";

/// Writes `contents` to `name` inside a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn write_fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}
