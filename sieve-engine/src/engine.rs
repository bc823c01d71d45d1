// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-page recomputation engine.
//!
//! The engine owns one page's predicate set, its transient column recipes and
//! the single cache slot its adapters read from. It is driven explicitly: the
//! host hands it the current input snapshot through [`observe`], and the
//! engine recomputes only if an input it is triggered by changed since the
//! last observation.
//!
//! ## States
//!
//! ```text
//! Idle --(trigger changed)--> Recomputing --(ok)----> Idle (new table published)
//!                                         \--(error)-> Idle (previous table kept)
//! ```
//!
//! A failed recomputation logs its [`FilterError`], keeps the previous table in
//! the cache and stores the error as the page's diagnostic until the next
//! successful publish.
//!
//! [`observe`]: RecomputationEngine::observe

use crate::pipeline::apply_filters;
use crate::{DerivedTableCache, Refresh, RefreshSubject};
use parking_lot::{Mutex, RwLock};
use sieve_core::{
    BaseTable, DerivedTable, FilterError, InputId, InputSnapshot, PredicateSet, TransientColumn,
};
use std::collections::BTreeSet;
use std::sync::Arc;

type PublishCallback = Box<dyn Fn(&Arc<DerivedTable>) + Send + Sync>;

/// Whether a recomputation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Recomputing,
}

/// Result of one [`RecomputationEngine::observe`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeOutcome {
    /// A new table was published
    Published { generation: u64, rows: usize },
    /// No trigger changed; nothing ran
    Unchanged,
    /// Recomputation failed; the previous table is still published
    Failed(FilterError),
}

impl RecomputeOutcome {
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

#[derive(Debug, Default)]
struct Progress {
    observed: Option<InputSnapshot>,
    generation: u64,
    recomputations: u64,
}

/// Recomputes one page's derived table when its triggers change.
pub struct RecomputationEngine {
    page: Arc<str>,
    base: Arc<BaseTable>,
    predicates: PredicateSet,
    transient: Vec<TransientColumn>,
    cache: DerivedTableCache,
    state: RwLock<EngineState>,
    progress: Mutex<Progress>,
    last_error: RwLock<Option<FilterError>>,
    callbacks: RwLock<Vec<PublishCallback>>,
    subject: RefreshSubject,
}

impl RecomputationEngine {
    /// An idle engine with an unset cache.
    pub fn new(page: impl Into<Arc<str>>, base: Arc<BaseTable>, predicates: PredicateSet) -> Self {
        Self {
            page: page.into(),
            base,
            predicates,
            transient: Vec::new(),
            cache: DerivedTableCache::new(),
            state: RwLock::new(EngineState::Idle),
            progress: Mutex::new(Progress::default()),
            last_error: RwLock::new(None),
            callbacks: RwLock::new(Vec::new()),
            subject: RefreshSubject::new(),
        }
    }

    /// Adds transient column recipes evaluated on every recomputation.
    #[must_use]
    pub fn with_transient(mut self, transient: impl IntoIterator<Item = TransientColumn>) -> Self {
        self.transient.extend(transient);
        self
    }

    /// Publishes refreshes on a shared subject instead of a private one.
    #[must_use]
    pub fn with_subject(mut self, subject: RefreshSubject) -> Self {
        self.subject = subject;
        self
    }

    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    #[must_use]
    pub fn base(&self) -> &Arc<BaseTable> {
        &self.base
    }

    #[must_use]
    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// Inputs whose change triggers a recomputation.
    ///
    /// Derived from the predicate bindings, so every input a filter reads is a
    /// trigger and nothing else is.
    #[must_use]
    pub fn triggers(&self) -> &BTreeSet<InputId> {
        self.predicates.triggers()
    }

    /// Whether any of `changed` is a trigger of this engine
    #[must_use]
    pub fn is_triggered_by<'a>(&self, changed: impl IntoIterator<Item = &'a InputId>) -> bool {
        changed.into_iter().any(|id| self.triggers().contains(id))
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    #[must_use]
    pub fn cache(&self) -> &DerivedTableCache {
        &self.cache
    }

    /// The latest published table, `None` before the first publish
    #[must_use]
    pub fn current(&self) -> Option<Arc<DerivedTable>> {
        self.cache.get()
    }

    /// Error of the latest recomputation, cleared by the next successful one
    #[must_use]
    pub fn last_error(&self) -> Option<FilterError> {
        self.last_error.read().clone()
    }

    /// Number of recomputations run, successful or not
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.progress.lock().recomputations
    }

    #[must_use]
    pub fn subject(&self) -> &RefreshSubject {
        &self.subject
    }

    /// Registers a callback run after every publish, in registration order.
    ///
    /// Callbacks run on the publishing thread after the cache slot is updated
    /// and the engine's locks are released, so they may read the engine. They
    /// must not register further callbacks.
    pub fn on_publish<F>(&self, callback: F)
    where
        F: Fn(&Arc<DerivedTable>) + Send + Sync + 'static,
    {
        self.callbacks.write().push(Box::new(callback));
    }

    /// Recomputes if a trigger value differs from the last observation.
    ///
    /// The first observation always recomputes.
    pub fn observe(&self, inputs: &InputSnapshot) -> RecomputeOutcome {
        let run = {
            let mut progress = self.progress.lock();
            let projected = inputs.project(self.triggers());
            if progress.observed.as_ref() == Some(&projected) {
                return RecomputeOutcome::Unchanged;
            }
            self.run(&mut progress, projected)
        };
        self.finish(run)
    }

    /// Recomputes unconditionally.
    pub fn recompute(&self, inputs: &InputSnapshot) -> RecomputeOutcome {
        let run = {
            let mut progress = self.progress.lock();
            let projected = inputs.project(self.triggers());
            self.run(&mut progress, projected)
        };
        self.finish(run)
    }

    // Runs after the progress lock is released so callbacks may query the engine.
    fn finish(
        &self,
        (outcome, published): (RecomputeOutcome, Option<Arc<DerivedTable>>),
    ) -> RecomputeOutcome {
        if let Some(table) = published {
            self.notify(&table);
        }
        outcome
    }

    fn run(
        &self,
        progress: &mut Progress,
        inputs: InputSnapshot,
    ) -> (RecomputeOutcome, Option<Arc<DerivedTable>>) {
        *self.state.write() = EngineState::Recomputing;
        progress.recomputations += 1;
        let generation = progress.generation + 1;

        let result = self
            .predicates
            .resolve(&inputs)
            .and_then(|specs| apply_filters(&self.base, &self.transient, &specs, generation));
        progress.observed = Some(inputs);

        match result {
            Ok(table) => {
                let table = Arc::new(table);
                let rows = table.len();
                progress.generation = generation;
                self.cache.set(Arc::clone(&table));
                *self.last_error.write() = None;
                *self.state.write() = EngineState::Idle;
                debug!(
                    "Page {} published generation {} ({} of {} rows)",
                    self.page,
                    generation,
                    rows,
                    self.base.len()
                );
                (RecomputeOutcome::Published { generation, rows }, Some(table))
            }
            Err(err) => {
                warn!(
                    "Page {} recompute failed, keeping generation {}: {}",
                    self.page, progress.generation, err
                );
                *self.last_error.write() = Some(err.clone());
                *self.state.write() = EngineState::Idle;
                (RecomputeOutcome::Failed(err), None)
            }
        }
    }

    fn notify(&self, table: &Arc<DerivedTable>) {
        for callback in self.callbacks.read().iter() {
            callback(table);
        }
        if let Err(err) = self
            .subject
            .send(Refresh::new(Arc::clone(&self.page), table.generation()))
        {
            debug!("Page {} refresh not sent: {}", self.page, err);
        }
    }
}

impl std::fmt::Debug for RecomputationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecomputationEngine")
            .field("page", &self.page)
            .field("base_rows", &self.base.len())
            .field("triggers", self.triggers())
            .field("state", &self.state())
            .field("generation", &self.cache.generation())
            .finish_non_exhaustive()
    }
}
