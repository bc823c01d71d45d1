// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::NaiveDate;
use futures::StreamExt;
use sieve::prelude::*;
use sieve::{
    BaseTable, DatasetConfig, FlushReport, LoadError, Refresh, RecomputeOutcome, SessionError,
};
use sieve_core::InputSnapshot;
use sieve_test_utils::{
    orders_table, quantity_table, records_table, ORDERS_CSV, QUANTITY_CSV, RECORDS_CSV,
};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn fixture_tables() -> BTreeMap<String, Arc<BaseTable>> {
    [
        ("orders", orders_table()),
        ("quantity", quantity_table()),
        ("records", records_table()),
    ]
    .into_iter()
    .map(|(name, table)| (name.to_string(), table))
    .collect()
}

fn session() -> anyhow::Result<DashboardSession> {
    Ok(DashboardSession::with_tables(
        dashboards::all(),
        &fixture_tables(),
        &InputSnapshot::new(),
    )?)
}

fn text(session: &DashboardSession, output: &str) -> String {
    session
        .render(output)
        .and_then(|artifact| artifact.as_text().map(ToString::to_string))
        .unwrap_or_else(|| panic!("{output} did not render text"))
}

#[test]
fn test_default_inputs_drive_the_first_publish() -> anyhow::Result<()> {
    // Arrange & Act
    let session = session()?;

    // Assert
    assert_eq!(
        text(&session, "quantity_record_count_string"),
        "Showing 5 of 10 records"
    );
    assert_eq!(
        text(&session, "orders_record_count_string"),
        "Showing 7 of 7 records"
    );
    assert_eq!(
        text(&session, "records_record_count_string"),
        "Showing 6 of 6 records"
    );
    assert!(session.engine("home").is_none());
    Ok(())
}

#[test]
fn test_toggle_change_refreshes_only_its_page() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;

    // Act
    let report = session.set_input("MEDICINE_B", InputValue::Toggle(false));

    // Assert
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(
        report.outcome("quantity"),
        Some(&RecomputeOutcome::Published {
            generation: 2,
            rows: 4
        })
    );
    assert_eq!(
        report.outputs,
        [
            "quantity_record_count_string",
            "quantity_filtered_table",
            "quantity_output_widget1"
        ]
    );
    assert_eq!(
        text(&session, "quantity_record_count_string"),
        "Showing 4 of 10 records"
    );
    assert_eq!(session.engine("orders").map(|e| e.recomputations()), Some(1));
    Ok(())
}

#[test]
fn test_same_value_is_not_a_change() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;

    // Act
    let report = session.set_input("QUANTITY_MAX", InputValue::Number(43000.0));

    // Assert
    assert_eq!(report, FlushReport::default());
    assert_eq!(session.engine("quantity").map(|e| e.recomputations()), Some(1));
    Ok(())
}

#[test]
fn test_batched_changes_recompute_once() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;

    // Act
    let report = session.apply([
        InputChange::new("TIME_RANGE", InputValue::NumberRange(1.0, 10.0)),
        InputChange::new("QUANTITY_MAX", InputValue::Number(50000.0)),
        InputChange::new("MEDICINE_C", InputValue::Toggle(false)),
    ]);

    // Assert
    assert_eq!(
        report.outcome("quantity"),
        Some(&RecomputeOutcome::Published {
            generation: 2,
            rows: 7
        })
    );
    assert_eq!(session.engine("quantity").map(|e| e.recomputations()), Some(2));
    Ok(())
}

#[test]
fn test_date_range_filters_orders() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();

    // Act
    session.set_input("ORDERS_DATE_RANGE", InputValue::DateRange(start, end));

    // Assert
    assert_eq!(
        text(&session, "orders_record_count_string"),
        "Showing 2 of 7 records"
    );
    let Some(ViewArtifact::Table(table)) = session.render("orders_filtered_table") else {
        panic!("orders table did not render");
    };
    assert_eq!(table.columns, ["Year", "Month", "Number of Orders", "year-mon"]);
    let labels: Vec<String> = table
        .column("year-mon")
        .unwrap()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(labels, ["2022-January", "2022-June"]);
    Ok(())
}

#[test]
fn test_failed_recompute_keeps_previous_outputs() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;

    // Act
    let report = session.set_input("TIME_RANGE", InputValue::NumberRange(6.0, 2.0));

    // Assert
    assert!(matches!(
        report.outcome("quantity"),
        Some(RecomputeOutcome::Failed(_))
    ));
    assert!(report.outputs.is_empty());
    assert_eq!(
        text(&session, "quantity_record_count_string"),
        "Showing 5 of 10 records"
    );
    assert!(session.diagnostic("quantity").is_some());
    assert!(session.diagnostic("records").is_none());
    Ok(())
}

#[test]
fn test_recovery_clears_the_diagnostic() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;
    session.set_input("TIME_RANGE", InputValue::Text("soon".to_string()));

    // Act
    let report = session.set_input("TIME_RANGE", InputValue::NumberRange(1.0, 10.0));

    // Assert
    assert!(report
        .outcome("quantity")
        .is_some_and(RecomputeOutcome::is_published));
    assert!(session.diagnostic("quantity").is_none());
    Ok(())
}

#[test]
fn test_failed_first_recompute_leaves_outputs_pending() -> anyhow::Result<()> {
    // Arrange
    let overrides =
        InputSnapshot::new().with("ERRORS_PER_RECORD_RANGE", InputValue::Toggle(true));

    // Act
    let session =
        DashboardSession::with_tables(dashboards::all(), &fixture_tables(), &overrides)?;

    // Assert
    assert_eq!(
        session.render("records_record_count_string"),
        Some(ViewArtifact::Pending)
    );
    assert_eq!(
        session.render("records_output_widget1"),
        Some(ViewArtifact::Pending)
    );
    assert!(session.diagnostic("records").is_some());
    assert_eq!(
        text(&session, "quantity_record_count_string"),
        "Showing 5 of 10 records"
    );
    Ok(())
}

#[test]
fn test_text_outputs_follow_their_input() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;

    // Act
    let report = session.apply([
        InputChange::new("name_input", InputValue::Text("Ada".to_string())),
        InputChange::new("color_input", InputValue::Text("EUCS".to_string())),
    ]);

    // Assert
    assert!(report.outcomes.is_empty());
    assert_eq!(report.outputs, ["welcome_output", "color_output"]);
    assert_eq!(
        text(&session, "welcome_output"),
        "Ada is viewing operational reports. "
    );
    assert_eq!(text(&session, "color_output"), "Your department is EUCS.");
    Ok(())
}

#[test]
fn test_department_toggles_shape_the_funnel() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;

    // Act
    session.set_input("DEPARTMENT_TYPE_ROW", InputValue::Toggle(false));

    // Assert
    let Some(ViewArtifact::Chart(chart)) = session.render("records_output_widget1") else {
        panic!("funnel did not render");
    };
    let stages: Vec<(String, f64)> = chart.series[0]
        .points
        .iter()
        .map(|p| (p.y.to_string(), p.x.as_number().unwrap()))
        .collect();
    assert_eq!(
        stages,
        [
            ("Aerobes".to_string(), 70.0),
            ("Anaerobes".to_string(), 12.0),
            ("EUCS".to_string(), 22.0)
        ]
    );
    Ok(())
}

#[test]
fn test_broken_output_does_not_affect_siblings() -> anyhow::Result<()> {
    // Arrange
    let page = PageSpec::new("weights", "Weights")
        .dataset("quantity")
        .output(CountFormatter::new("weights_count"))
        .output(ChartBuilder::scatter(
            "weights_chart",
            Axis::new("weight"),
            Axis::new("time_to_complete_hrs"),
        ));
    let session = DashboardSession::with_tables(vec![page], &fixture_tables(), &InputSnapshot::new())?;

    // Act
    let mut rendered: BTreeMap<String, ViewArtifact> = BTreeMap::new();
    session.render_all_into(&mut rendered);

    // Assert
    assert_eq!(
        rendered.get("weights_count").and_then(ViewArtifact::as_text),
        Some("Showing 10 of 10 records")
    );
    assert!(rendered
        .get("weights_chart")
        .is_some_and(ViewArtifact::is_placeholder));
    Ok(())
}

#[test]
fn test_render_into_skips_unknown_outputs() -> anyhow::Result<()> {
    // Arrange
    let session = session()?;
    let mut rendered: Vec<(String, ViewArtifact)> = Vec::new();

    // Act
    session.render_into(&mut rendered, &["records_record_count_string", "nowhere"]);

    // Assert
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].0, "records_record_count_string");
    assert!(session.render("nowhere").is_none());
    Ok(())
}

#[test]
fn test_duplicate_output_ids_are_rejected() {
    // Arrange
    let pages = vec![
        PageSpec::new("a", "A")
            .dataset("quantity")
            .output(CountFormatter::new("count")),
        PageSpec::new("b", "B")
            .dataset("records")
            .output(CountFormatter::new("count")),
    ];

    // Act
    let result = DashboardSession::with_tables(pages, &fixture_tables(), &InputSnapshot::new());

    // Assert
    assert!(matches!(
        result,
        Err(SessionError::DuplicateOutput { output }) if output == "count"
    ));
}

#[test]
fn test_unknown_dataset_is_rejected() {
    // Arrange
    let pages = vec![PageSpec::new("ghost", "Ghost").dataset("nothing")];

    // Act
    let result = DashboardSession::with_tables(pages, &fixture_tables(), &InputSnapshot::new());

    // Assert
    assert!(matches!(
        result,
        Err(SessionError::UnknownDataset { page, dataset }) if page == "ghost" && dataset == "nothing"
    ));
}

#[test]
fn test_start_loads_configured_files() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("orders.csv"), ORDERS_CSV)?;
    fs::write(dir.path().join("quantity.csv"), QUANTITY_CSV)?;
    fs::write(dir.path().join("records.csv"), RECORDS_CSV)?;
    let config = DashboardConfig::default()
        .with_data_dir(dir.path())
        .with_input("QUANTITY_MAX", sieve::InputLiteral::Number(50000.0));

    // Act
    let session = DashboardSession::start(&config, dashboards::all())?;

    // Assert
    assert_eq!(
        text(&session, "orders_record_count_string"),
        "Showing 7 of 7 records"
    );
    assert_eq!(
        text(&session, "quantity_record_count_string"),
        "Showing 6 of 10 records"
    );
    assert_eq!(
        session.pages().collect::<Vec<_>>(),
        ["home", "orders", "quantity", "records"]
    );
    assert_eq!(session.page_title("quantity"), Some("Material Breakdown"));
    Ok(())
}

#[test]
fn test_start_reports_missing_files() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let mut config = DashboardConfig::default().with_data_dir(dir.path());
    config
        .datasets
        .insert("orders".to_string(), DatasetConfig::new("absent.csv"));

    // Act
    let result = DashboardSession::start(&config, vec![dashboards::orders()]);

    // Assert
    assert!(matches!(
        result,
        Err(SessionError::Load(LoadError::NotFound { .. }))
    ));
    Ok(())
}

#[test]
fn test_dashboard_output_ids_are_unique() {
    // Arrange
    let pages = dashboards::all();

    // Act
    let ids: Vec<&str> = pages.iter().flat_map(PageSpec::output_ids).collect();
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();

    // Assert
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids.len(), 12);
}

#[tokio::test]
async fn test_run_coalesces_queued_changes() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;
    let changes = futures::stream::iter(vec![
        InputChange::new("MEDICINE_A", InputValue::Toggle(false)),
        InputChange::new("MEDICINE_B", InputValue::Toggle(false)),
    ]);
    let mut sink: Vec<(String, ViewArtifact)> = Vec::new();

    // Act
    let batches = session
        .run(changes, &mut sink, CancellationToken::new())
        .await;

    // Assert
    assert_eq!(batches, 1);
    assert_eq!(session.engine("quantity").map(|e| e.recomputations()), Some(2));
    assert_eq!(sink.len(), 3);
    assert_eq!(
        sink[0],
        (
            "quantity_record_count_string".to_string(),
            ViewArtifact::text("Showing 2 of 10 records")
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_run_stops_when_cancelled() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;
    let cancel = CancellationToken::new();
    cancel.cancel();
    let changes = futures::stream::pending::<InputChange>();
    let mut sink: Vec<(String, ViewArtifact)> = Vec::new();

    // Act
    let batches = session.run(changes, &mut sink, cancel).await;

    // Assert
    assert_eq!(batches, 0);
    assert!(sink.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_subscribers_see_each_publish() -> anyhow::Result<()> {
    // Arrange
    let mut session = session()?;
    let refreshes = session.subscribe()?;

    // Act
    session.set_input("DEPARTMENT_TYPE_EUCS", InputValue::Toggle(false));
    session.set_input("QUANTITY_MAX", InputValue::Number(10000.0));
    drop(session);

    // Assert
    let received: Vec<Refresh> = refreshes.collect().await;
    assert_eq!(
        received,
        [Refresh::new("records", 2), Refresh::new("quantity", 2)]
    );
    Ok(())
}
