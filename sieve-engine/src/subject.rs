// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber broadcast of refresh events.
//!
//! Every successful publish emits one [`Refresh`] naming the page and the new
//! generation. The host subscribes to learn which outputs to re-render.
//!
//! - **Hot**: late subscribers only see refreshes sent after subscribing.
//! - **Unbounded**: no backpressure; a slow subscriber only grows its own queue.
//! - **Shared**: clones share state, so several engines can feed one subject.
//!
//! ```
//! use futures::StreamExt;
//! use sieve_engine::{Refresh, RefreshSubject};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = RefreshSubject::new();
//! let mut refreshes = subject.subscribe().unwrap();
//!
//! subject.send(Refresh::new("quantity", 1)).unwrap();
//! subject.close();
//!
//! assert_eq!(refreshes.next().await, Some(Refresh::new("quantity", 1)));
//! assert_eq!(refreshes.next().await, None);
//! # }
//! ```

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A page published a new derived table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub page: Arc<str>,
    pub generation: u64,
}

impl Refresh {
    pub fn new(page: impl Into<Arc<str>>, generation: u64) -> Self {
        Self {
            page: page.into(),
            generation,
        }
    }
}

/// Subject lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    #[error("Subject is closed")]
    Closed,
}

struct SubjectState {
    closed: bool,
    senders: Vec<UnboundedSender<Refresh>>,
}

/// Subscription returned by [`RefreshSubject::subscribe`].
///
/// Ends when the subject is closed or dropped by every owner.
pub struct RefreshStream {
    rx: UnboundedReceiver<Refresh>,
}

impl Stream for RefreshStream {
    type Item = Refresh;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

/// Broadcasts each [`Refresh`] to every live subscriber.
#[derive(Clone)]
pub struct RefreshSubject {
    state: Arc<Mutex<SubjectState>>,
}

impl RefreshSubject {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// # Errors
    ///
    /// [`SubjectError::Closed`] after [`close`](Self::close).
    pub fn subscribe(&self) -> Result<RefreshStream, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        Ok(RefreshStream { rx })
    }

    /// Sends to every subscriber, pruning the ones that went away.
    ///
    /// # Errors
    ///
    /// [`SubjectError::Closed`] after [`close`](Self::close).
    pub fn send(&self, refresh: Refresh) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(refresh.clone()).is_ok());
        Ok(())
    }

    /// Completes every subscription. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Live subscribers; dropped ones are pruned lazily on the next send.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl Default for RefreshSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RefreshSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("RefreshSubject")
            .field("closed", &state.closed)
            .field("subscribers", &state.senders.len())
            .finish()
    }
}
