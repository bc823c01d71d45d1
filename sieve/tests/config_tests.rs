// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::NaiveDate;
use sieve::{ConfigError, DashboardConfig, InputLiteral, InputValue};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_default_config_names_every_dataset() {
    // Arrange & Act
    let config = DashboardConfig::default();

    // Assert
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(
        config.datasets.keys().map(String::as_str).collect::<Vec<_>>(),
        ["orders", "quantity", "records"]
    );
    assert!(config.dataset("orders").is_some_and(|d| d.drop_leading_index));
    assert!(config.inputs.is_empty());
}

#[test]
fn test_toml_inputs_become_overrides() -> anyhow::Result<()> {
    // Arrange
    let text = r#"
        data_dir = "/srv/dashboard"

        [datasets.orders]
        file = "orders.xlsx"
        sheet = "Sheet1"
        drop_leading_index = true

        [inputs]
        QUANTITY_MAX = 30000
        MEDICINE_C = false
        TIME_RANGE = "1..8"
        ORDERS_DATE_RANGE = "2022-01-01..2022-06-30"
        name_input = "Ada"
        TAGS = ["EUCS", "ROW"]
    "#;

    // Act
    let config = DashboardConfig::from_toml_str(text)?;
    let overrides = config.input_overrides();

    // Assert
    assert_eq!(config.datasets.len(), 1);
    assert_eq!(overrides.number("QUANTITY_MAX")?, 30000.0);
    assert!(!overrides.toggle("MEDICINE_C")?);
    assert_eq!(overrides.number_range("TIME_RANGE")?, (1.0, 8.0));
    assert_eq!(
        overrides.date_range("ORDERS_DATE_RANGE")?,
        (
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 6, 30).unwrap()
        )
    );
    assert_eq!(overrides.text("name_input")?, "Ada");
    assert_eq!(overrides.selection("TAGS")?, ["EUCS", "ROW"]);
    Ok(())
}

#[test]
fn test_integer_literal_is_a_number() -> anyhow::Result<()> {
    // Arrange & Act
    let config = DashboardConfig::from_toml_str("[inputs]\nQUANTITY_MAX = 43000\n")?;

    // Assert
    assert_eq!(
        config.inputs.get("QUANTITY_MAX"),
        Some(&InputLiteral::Number(43000.0))
    );
    Ok(())
}

#[test]
fn test_source_resolves_against_data_dir() -> anyhow::Result<()> {
    // Arrange
    let config = DashboardConfig::default().with_data_dir("/srv/dashboard");

    // Act
    let (source, options) = config.source("orders").expect("orders is configured")?;

    // Assert
    assert_eq!(source.path(), PathBuf::from("/srv/dashboard/orders.csv"));
    assert!(options.drop_leading_index);
    assert!(config.source("unknown").is_none());
    Ok(())
}

#[test]
fn test_unsupported_extension_is_reported() -> anyhow::Result<()> {
    // Arrange
    let config = DashboardConfig::from_toml_str("[datasets.orders]\nfile = \"orders.parquet\"\n")?;

    // Act
    let source = config.source("orders");

    // Assert
    assert!(matches!(source, Some(Err(_))));
    Ok(())
}

#[test]
fn test_load_resolves_data_dir_next_to_the_file() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dashboard.toml");
    fs::write(&path, "data_dir = \"exports\"\n")?;

    // Act
    let config = DashboardConfig::load(&path)?;

    // Assert
    assert_eq!(config.data_dir, dir.path().join("exports"));
    assert_eq!(config.datasets.len(), 3);
    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() {
    // Arrange
    let path = PathBuf::from("/definitely/not/here.toml");

    // Act
    let result = DashboardConfig::load(&path);

    // Assert
    assert!(matches!(result, Err(ConfigError::Io { path: p, .. }) if p == path));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    // Arrange & Act
    let result = DashboardConfig::from_toml_str("data_dir = [");

    // Assert
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_cli_literals_override_config() {
    // Arrange
    let config = DashboardConfig::default()
        .with_input("MEDICINE_A", InputLiteral::Text("false".to_string()));

    // Act
    let overrides = config.input_overrides();

    // Assert
    assert_eq!(overrides.get("MEDICINE_A"), Some(&InputValue::Toggle(false)));
}
