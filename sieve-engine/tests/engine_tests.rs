// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use parking_lot::Mutex;
use sieve_core::{
    FilterBinding, FilterError, InputChange, InputSnapshot, InputValue, PredicateSet,
};
use sieve_engine::{EngineState, InputStore, RecomputationEngine, RecomputeOutcome, Refresh};
use sieve_test_utils::{assert_subset_of_base, quantity_inputs, quantity_table};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn quantity_engine() -> RecomputationEngine {
    RecomputationEngine::new(
        "quantity",
        quantity_table(),
        PredicateSet::new(vec![
            FilterBinding::range("time_to_complete_hrs", "TIME_RANGE"),
            FilterBinding::max("order_size_units", "QUANTITY_MAX"),
            FilterBinding::toggles(
                "material",
                [
                    ("MEDICINE_A", "MedicineA"),
                    ("MEDICINE_B", "MedicineB"),
                    ("MEDICINE_C", "MedicineC"),
                ],
            ),
        ]),
    )
}

#[test]
fn test_cache_is_unset_before_first_observation() {
    // Arrange
    let engine = quantity_engine();

    // Assert
    assert!(engine.current().is_none());
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(engine.recomputations(), 0);
}

#[test]
fn test_first_observation_publishes() -> anyhow::Result<()> {
    // Arrange
    let engine = quantity_engine();

    // Act
    let outcome = engine.observe(&quantity_inputs());

    // Assert
    assert_eq!(
        outcome,
        RecomputeOutcome::Published {
            generation: 1,
            rows: 5
        }
    );
    let current = engine.current().ok_or_else(|| anyhow::anyhow!("not published"))?;
    assert_eq!(current.row_indices(), [0, 2, 4, 6, 7]);
    assert_subset_of_base(&current);
    assert_eq!(engine.state(), EngineState::Idle);
    Ok(())
}

#[test]
fn test_unchanged_triggers_do_not_recompute() {
    // Arrange
    let engine = quantity_engine();
    engine.observe(&quantity_inputs());

    // Act
    let same = engine.observe(&quantity_inputs());
    let unrelated = engine.observe(
        &quantity_inputs().with("name_input", InputValue::Text("Ada".to_string())),
    );

    // Assert
    assert_eq!(same, RecomputeOutcome::Unchanged);
    assert_eq!(unrelated, RecomputeOutcome::Unchanged);
    assert_eq!(engine.recomputations(), 1);
}

#[test]
fn test_repeated_nan_input_does_not_recompute() {
    // Arrange
    let engine = quantity_engine();
    let inputs = quantity_inputs().with("QUANTITY_MAX", InputValue::Number(f64::NAN));
    engine.observe(&inputs);

    // Act
    let outcome = engine.observe(&inputs);

    // Assert
    assert_eq!(outcome, RecomputeOutcome::Unchanged);
    assert_eq!(engine.recomputations(), 1);
}

#[test]
fn test_every_binding_input_is_a_trigger() {
    // Arrange
    let engine = quantity_engine();
    engine.observe(&quantity_inputs());

    // Act
    let outcome =
        engine.observe(&quantity_inputs().with("MEDICINE_B", InputValue::Toggle(false)));

    // Assert
    assert_eq!(
        outcome,
        RecomputeOutcome::Published {
            generation: 2,
            rows: 4
        }
    );
}

#[test]
fn test_recompute_with_same_inputs_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let engine = quantity_engine();
    engine.recompute(&quantity_inputs());
    let first = engine.current().ok_or_else(|| anyhow::anyhow!("not published"))?;

    // Act
    engine.recompute(&quantity_inputs());
    let second = engine.current().ok_or_else(|| anyhow::anyhow!("not published"))?;

    // Assert
    assert_eq!(first.row_indices(), second.row_indices());
    assert_eq!(second.generation(), first.generation() + 1);
    Ok(())
}

#[test]
fn test_all_toggles_off_falls_back_to_all_categories() -> anyhow::Result<()> {
    // Arrange
    let engine = quantity_engine();
    let inputs = quantity_inputs()
        .with("MEDICINE_A", InputValue::Toggle(false))
        .with("MEDICINE_B", InputValue::Toggle(false))
        .with("MEDICINE_C", InputValue::Toggle(false));

    // Act
    engine.observe(&inputs);

    // Assert
    let current = engine.current().ok_or_else(|| anyhow::anyhow!("not published"))?;
    assert_eq!(current.row_indices(), [0, 2, 4, 6, 7]);
    Ok(())
}

#[test]
fn test_failed_recompute_keeps_previous_table() -> anyhow::Result<()> {
    // Arrange
    let engine = quantity_engine();
    engine.observe(&quantity_inputs());
    let bad = quantity_inputs().with("TIME_RANGE", InputValue::NumberRange(6.0, 2.0));

    // Act
    let outcome = engine.observe(&bad);

    // Assert
    assert!(matches!(
        outcome,
        RecomputeOutcome::Failed(FilterError::InvalidBounds { .. })
    ));
    let current = engine.current().ok_or_else(|| anyhow::anyhow!("table lost"))?;
    assert_eq!(current.generation(), 1);
    assert_eq!(current.len(), 5);
    assert!(engine.last_error().is_some());
    assert_eq!(engine.state(), EngineState::Idle);
    Ok(())
}

#[test]
fn test_next_success_clears_diagnostic() {
    // Arrange
    let engine = quantity_engine();
    engine.observe(&quantity_inputs().with("TIME_RANGE", InputValue::NumberRange(6.0, 2.0)));
    assert!(engine.current().is_none());

    // Act
    let outcome = engine.observe(&quantity_inputs());

    // Assert
    assert!(outcome.is_published());
    assert_eq!(engine.last_error(), None);
    assert_eq!(engine.cache().generation(), Some(1));
}

#[test]
fn test_missing_input_is_a_filter_error() {
    // Arrange
    let engine = quantity_engine();

    // Act
    let outcome = engine.observe(&InputSnapshot::new());

    // Assert
    assert!(matches!(
        outcome,
        RecomputeOutcome::Failed(FilterError::Input(_))
    ));
}

#[test]
fn test_publish_callbacks_run_in_order() {
    // Arrange
    let engine = quantity_engine();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second"] {
        let seen = seen.clone();
        engine.on_publish(move |table| seen.lock().push((tag, table.generation())));
    }

    // Act
    engine.observe(&quantity_inputs());

    // Assert
    assert_eq!(*seen.lock(), [("first", 1), ("second", 1)]);
}

#[test]
fn test_publish_callback_can_read_the_engine() {
    // Arrange
    let engine = Arc::new(quantity_engine());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let weak = Arc::downgrade(&engine);
    let sink = seen.clone();
    engine.on_publish(move |table| {
        if let Some(engine) = weak.upgrade() {
            sink.lock()
                .push((table.generation(), engine.recomputations(), engine.state()));
        }
    });

    // Act
    engine.observe(&quantity_inputs());
    engine.recompute(&quantity_inputs());

    // Assert
    assert_eq!(
        *seen.lock(),
        [(1, 1, EngineState::Idle), (2, 2, EngineState::Idle)]
    );
}

#[test]
fn test_batched_changes_recompute_once() {
    // Arrange
    let engine = quantity_engine();
    let mut store = InputStore::new(quantity_inputs());
    engine.observe(store.snapshot());

    // Act
    store.apply_all([
        InputChange::new("MEDICINE_A", InputValue::Toggle(false)),
        InputChange::new("QUANTITY_MAX", InputValue::Number(30000.0)),
        InputChange::new("TIME_RANGE", InputValue::NumberRange(1.0, 5.0)),
    ]);
    let dirty = store.take_dirty();
    if engine.is_triggered_by(&dirty) {
        engine.observe(store.snapshot());
    }

    // Assert
    assert_eq!(engine.recomputations(), 2);
    assert_eq!(engine.cache().generation(), Some(2));
}

#[tokio::test]
async fn test_publish_emits_refresh() -> anyhow::Result<()> {
    // Arrange
    let engine = quantity_engine();
    let refreshes = engine.subject().subscribe()?;

    // Act
    engine.observe(&quantity_inputs());
    engine.observe(&quantity_inputs().with("TIME_RANGE", InputValue::NumberRange(6.0, 2.0)));
    engine.observe(&quantity_inputs().with("QUANTITY_MAX", InputValue::Number(1.0)));
    engine.subject().close();

    // Assert
    let received: Vec<Refresh> = refreshes.collect().await;
    assert_eq!(
        received,
        [Refresh::new("quantity", 1), Refresh::new("quantity", 2)]
    );
    Ok(())
}

#[test]
fn test_readers_never_observe_partial_publish() {
    // Arrange
    let engine = Arc::new(quantity_engine());
    let wide = quantity_inputs();
    let narrow = quantity_inputs()
        .with("MEDICINE_B", InputValue::Toggle(false))
        .with("MEDICINE_C", InputValue::Toggle(false));
    engine.observe(&wide);
    let wide_rows = engine.current().unwrap().row_indices().to_vec();
    engine.observe(&narrow);
    let narrow_rows = engine.current().unwrap().row_indices().to_vec();
    let done = AtomicBool::new(false);

    // Act
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..500 {
                engine.observe(if i % 2 == 0 { &wide } else { &narrow });
            }
            done.store(true, Ordering::Release);
        });
        for _ in 0..3 {
            scope.spawn(|| {
                let mut last_generation = 0;
                while !done.load(Ordering::Acquire) {
                    let table = engine.current().unwrap();
                    // Assert
                    let rows = table.row_indices();
                    assert!(rows == wide_rows.as_slice() || rows == narrow_rows.as_slice());
                    assert!(table.generation() >= last_generation);
                    last_generation = table.generation();
                }
            });
        }
    });
    assert_eq!(engine.cache().generation(), Some(502));
}
