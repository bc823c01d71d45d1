// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Async input driver with per-tick coalescing.
//!
//! Input changes arrive as a stream. Every change already queued when the
//! driver wakes up is handed over as one batch, so a burst of changes within
//! one scheduling tick costs a single recomputation pass instead of one per
//! change. The driver never waits for more changes to fill a batch.

use futures::{Stream, StreamExt};
use sieve_core::InputChange;
use tokio_util::sync::CancellationToken;

/// Upper bound on changes folded into one batch
pub const MAX_BATCH: usize = 256;

/// Groups every change that is ready at the same time.
pub fn coalesce<S>(changes: S) -> impl Stream<Item = Vec<InputChange>>
where
    S: Stream<Item = InputChange>,
{
    changes.ready_chunks(MAX_BATCH)
}

/// Feeds coalesced batches to `on_batch` until the stream ends or `cancel` fires.
///
/// A batch being handled is always finished; cancellation is observed between
/// batches. Returns the number of batches handled.
pub async fn drive<S, F>(changes: S, cancel: CancellationToken, mut on_batch: F) -> usize
where
    S: Stream<Item = InputChange>,
    F: FnMut(Vec<InputChange>),
{
    let batches = coalesce(changes);
    futures::pin_mut!(batches);

    let mut handled = 0;
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            batch = batches.next() => match batch {
                Some(batch) => {
                    on_batch(batch);
                    handled += 1;
                }
                None => break,
            },
        }
    }
    debug!("Input driver stopped after {} batches", handled);
    handled
}
