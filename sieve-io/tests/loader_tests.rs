// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::NaiveDate;
use sieve_core::{ColumnType, LoadError, Value};
use sieve_io::{load, load_path, DatasetSource, LoadOptions, SourceFormat};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sieve_test_utils::{write_fixture, ORDERS_CSV, QUANTITY_CSV, RECORDS_CSV};

#[test]
fn test_quantity_csv_types_columns() -> anyhow::Result<()> {
    // Arrange
    let (_dir, path) = write_fixture("quantity.csv", QUANTITY_CSV);

    // Act
    let table = load_path("quantity", &path, &LoadOptions::new())?;

    // Assert
    assert_eq!(table.name(), "quantity");
    assert_eq!(table.len(), 10);
    let types: Vec<_> = table.columns().iter().map(|c| c.column_type()).collect();
    assert_eq!(
        types,
        [
            ColumnType::Numeric,
            ColumnType::Numeric,
            ColumnType::Categorical
        ]
    );
    assert_eq!(
        table.value(1, "order_size_units"),
        Some(&Value::Number(45000.0))
    );
    Ok(())
}

#[test]
fn test_leading_index_column_is_dropped() -> anyhow::Result<()> {
    // Arrange
    let (_dir, path) = write_fixture("orders.csv", ORDERS_CSV);

    // Act
    let table = load_path("orders", &path, &LoadOptions::new().drop_leading_index(true))?;

    // Assert
    let names: Vec<_> = table.column_names().collect();
    assert_eq!(names, ["Year", "Month", "Number of Orders"]);
    assert_eq!(table.len(), 7);
    Ok(())
}

#[test]
fn test_leading_index_column_is_kept_and_named_by_default() -> anyhow::Result<()> {
    // Arrange
    let (_dir, path) = write_fixture("orders.csv", ORDERS_CSV);

    // Act
    let table = load_path("orders", &path, &LoadOptions::new())?;

    // Assert
    assert_eq!(table.column_names().next(), Some("Unnamed: 0"));
    assert_eq!(table.columns().len(), 4);
    Ok(())
}

#[test]
fn test_date_column_is_parsed() -> anyhow::Result<()> {
    // Arrange
    let csv = "Shipped,Count\n2023-01-15,3\n03/02/2023,\n,5\n";
    let (_dir, path) = write_fixture("shipments.csv", csv);

    // Act
    let table = load_path("shipments", &path, &LoadOptions::new())?;

    // Assert
    let shipped = table.column("Shipped").unwrap();
    assert_eq!(shipped.column_type(), ColumnType::Date);
    assert_eq!(
        shipped.get(1),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2023, 3, 2).unwrap()))
    );
    assert_eq!(shipped.get(2), Some(&Value::Null));
    assert_eq!(table.value(1, "Count"), Some(&Value::Null));
    Ok(())
}

#[test]
fn test_forced_column_type_overrides_inference() -> anyhow::Result<()> {
    // Arrange
    let (_dir, path) = write_fixture("records.csv", RECORDS_CSV);
    let options = LoadOptions::new().column_type("Errors", ColumnType::Categorical);

    // Act
    let table = load_path("records", &path, &options)?;

    // Assert
    assert_eq!(
        table.column("Errors").unwrap().column_type(),
        ColumnType::Categorical
    );
    assert_eq!(table.value(0, "Errors"), Some(&Value::from("5")));
    Ok(())
}

#[test]
fn test_forced_type_with_bad_cell_fails() {
    // Arrange
    let (_dir, path) = write_fixture("records.csv", RECORDS_CSV);
    let options = LoadOptions::new().column_type("Department", ColumnType::Numeric);

    // Act
    let result = load_path("records", &path, &options);

    // Assert
    assert!(matches!(result, Err(LoadError::Malformed { .. })));
}

#[test]
fn test_missing_file_is_not_found() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    // Act
    let result = load_path("absent", &path, &LoadOptions::new());

    // Assert
    assert!(matches!(result, Err(LoadError::NotFound { path: p }) if p == path));
}

#[test]
fn test_ragged_row_is_rejected() {
    // Arrange
    let (_dir, path) = write_fixture("bad.csv", "a,b\n1,2\n3\n");

    // Act
    let result = load_path("bad", &path, &LoadOptions::new());

    // Assert
    assert!(matches!(result, Err(LoadError::Csv { .. })));
}

#[test]
fn test_duplicate_header_is_rejected() {
    // Arrange
    let (_dir, path) = write_fixture("dup.csv", "a,a\n1,2\n");

    // Act
    let result = load_path("dup", &path, &LoadOptions::new());

    // Assert
    assert!(matches!(
        result,
        Err(LoadError::DuplicateColumn { column, .. }) if column == "a"
    ));
}

#[test]
fn test_empty_file_is_rejected() {
    // Arrange
    let (_dir, path) = write_fixture("empty.csv", "");

    // Act
    let result = load_path("empty", &path, &LoadOptions::new());

    // Assert
    assert!(matches!(result, Err(LoadError::Empty { .. })));
}

#[test]
fn test_header_only_file_loads_zero_rows() -> anyhow::Result<()> {
    // Arrange
    let (_dir, path) = write_fixture("header.csv", "a,b\n");

    // Act
    let table = load_path("header", &path, &LoadOptions::new())?;

    // Assert
    assert!(table.is_empty());
    assert_eq!(table.columns().len(), 2);
    Ok(())
}

#[test]
fn test_unknown_extension_is_rejected() {
    // Act
    let result = DatasetSource::from_path("data/orders.parquet");

    // Assert
    assert!(matches!(result, Err(LoadError::Malformed { .. })));
}

#[test]
fn test_format_follows_extension() -> anyhow::Result<()> {
    // Act & Assert
    assert_eq!(
        DatasetSource::from_path("orders.XLSX")?.format(),
        SourceFormat::Workbook
    );
    assert_eq!(
        DatasetSource::from_path("orders.csv")?.format(),
        SourceFormat::Csv
    );
    Ok(())
}

#[test]
fn test_corrupt_workbook_is_a_workbook_error() {
    // Arrange
    let (_dir, path) = write_fixture("orders.xlsx", "not a zip archive");

    // Act
    let result = load("orders", &DatasetSource::from_path(&path).unwrap(), &LoadOptions::new());

    // Assert
    assert!(matches!(result, Err(LoadError::Workbook { .. })));
}

#[test]
fn test_named_sheet_loads_typed_columns() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Notes")?.write_string(0, 0, "ignored")?;
    let sheet = workbook.add_worksheet().set_name("Orders")?;
    for (col, header) in ["Shipped", "Year", "Material", "Number of Orders"].iter().enumerate() {
        sheet.write_string(0, col as u16 + 1, *header)?;
    }
    let rows = [(2022, 3, 1, "MedicineA", 120.0), (2022, 4, 15, "MedicineB", 95.5)];
    for (i, (year, month, day, material, orders)) in rows.into_iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, i as f64)?;
        let shipped = ExcelDateTime::from_ymd(year, month, day)?;
        sheet.write_datetime_with_format(row, 1, &shipped, &date_format)?;
        sheet.write_number(row, 2, f64::from(year))?;
        sheet.write_string(row, 3, material)?;
        sheet.write_number(row, 4, orders)?;
    }
    workbook.save(&path)?;
    let options = LoadOptions::new().sheet("Orders").drop_leading_index(true);

    // Act
    let table = load_path("orders", &path, &options)?;

    // Assert
    let names: Vec<_> = table.column_names().collect();
    assert_eq!(names, ["Shipped", "Year", "Material", "Number of Orders"]);
    let types: Vec<_> = table.columns().iter().map(|c| c.column_type()).collect();
    assert_eq!(
        types,
        [
            ColumnType::Date,
            ColumnType::Numeric,
            ColumnType::Categorical,
            ColumnType::Numeric
        ]
    );
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.value(1, "Shipped"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2022, 4, 15).unwrap()))
    );
    assert_eq!(table.value(0, "Material"), Some(&Value::from("MedicineA")));
    assert_eq!(table.value(1, "Number of Orders"), Some(&Value::Number(95.5)));
    Ok(())
}

#[test]
fn test_first_sheet_is_read_by_default() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quantity.xlsx");
    let mut workbook = Workbook::new();
    let first = workbook.add_worksheet();
    first.write_string(0, 0, "order_size_units")?;
    first.write_number(1, 0, 43000.0)?;
    workbook.add_worksheet().write_string(0, 0, "other")?;
    workbook.save(&path)?;

    // Act
    let table = load_path("quantity", &path, &LoadOptions::new())?;

    // Assert
    assert_eq!(table.column_names().collect::<Vec<_>>(), ["order_size_units"]);
    assert_eq!(
        table.value(0, "order_size_units"),
        Some(&Value::Number(43000.0))
    );
    Ok(())
}

#[test]
fn test_unknown_sheet_is_a_workbook_error() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().write_string(0, 0, "Year")?;
    workbook.save(&path)?;

    // Act
    let result = load_path("orders", &path, &LoadOptions::new().sheet("Missing"));

    // Assert
    assert!(matches!(result, Err(LoadError::Workbook { .. })));
    Ok(())
}
