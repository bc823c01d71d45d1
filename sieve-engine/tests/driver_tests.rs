// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::mpsc::unbounded;
use futures::StreamExt;
use sieve_core::{InputChange, InputValue};
use sieve_engine::{coalesce, drive};
use tokio_util::sync::CancellationToken;

fn toggle(id: &str, on: bool) -> InputChange {
    InputChange::new(id, InputValue::Toggle(on))
}

#[tokio::test]
async fn test_changes_queued_together_form_one_batch() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = unbounded();
    tx.unbounded_send(toggle("MEDICINE_A", false))?;
    tx.unbounded_send(toggle("MEDICINE_B", false))?;
    tx.unbounded_send(toggle("MEDICINE_C", false))?;
    drop(tx);

    // Act
    let batches: Vec<Vec<InputChange>> = coalesce(rx).collect().await;

    // Assert
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
    assert_eq!(batches[0][2], toggle("MEDICINE_C", false));
    Ok(())
}

#[tokio::test]
async fn test_drive_hands_each_batch_over_until_stream_ends() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = unbounded();
    let cancel = CancellationToken::new();
    let feeder = tokio::spawn(async move {
        tx.unbounded_send(toggle("MEDICINE_A", false)).unwrap();
        tx.unbounded_send(toggle("MEDICINE_A", true)).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        tx.unbounded_send(toggle("MEDICINE_B", false)).unwrap();
    });
    let mut sizes = Vec::new();

    // Act
    let handled = drive(rx, cancel, |batch| sizes.push(batch.len())).await;
    feeder.await?;

    // Assert
    assert_eq!(handled, sizes.len());
    assert_eq!(sizes.iter().sum::<usize>(), 3);
    assert!(handled <= 3);
    Ok(())
}

#[tokio::test]
async fn test_drive_stops_on_cancellation() {
    // Arrange
    let (_tx, rx) = unbounded::<InputChange>();
    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        stopper.cancel();
    });

    // Act
    let handled = drive(rx, cancel, |_| {}).await;

    // Assert
    assert_eq!(handled, 0);
}
