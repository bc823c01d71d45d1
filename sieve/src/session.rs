// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-session dashboard context.
//!
//! A [`DashboardSession`] owns everything one viewer's dashboard needs: the
//! loaded base tables, one recomputation engine per page, the live input
//! values and the outputs. Nothing is shared between sessions except the
//! immutable base tables a caller chooses to share through
//! [`DashboardSession::with_tables`].
//!
//! Input changes are applied in batches. Each batch triggers at most one
//! recomputation per affected page, then reports which outputs are stale so
//! the host re-renders only those.

use crate::config::DashboardConfig;
use crate::page::{PageParts, PageSpec};
use futures::Stream;
use sieve_core::{
    BaseTable, DerivedTable, FilterError, InputChange, InputId, InputSnapshot, InputValue,
    LoadError,
};
use sieve_engine::{
    drive, InputStore, RecomputationEngine, RecomputeOutcome, RefreshStream, RefreshSubject,
    SubjectError,
};
use sieve_view::{render_output, ViewArtifact};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Receives rendered outputs.
///
/// The host implements this to route each artifact to the screen region bound
/// to its output id.
pub trait OutputSink {
    fn update(&mut self, output_id: &str, artifact: ViewArtifact);
}

impl OutputSink for Vec<(String, ViewArtifact)> {
    fn update(&mut self, output_id: &str, artifact: ViewArtifact) {
        self.push((output_id.to_string(), artifact));
    }
}

impl OutputSink for BTreeMap<String, ViewArtifact> {
    fn update(&mut self, output_id: &str, artifact: ViewArtifact) {
        self.insert(output_id.to_string(), artifact);
    }
}

/// A session could not be set up
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Page {page} filters dataset {dataset}, which is not configured")]
    UnknownDataset { page: String, dataset: String },

    #[error("Output {output} is declared more than once")]
    DuplicateOutput { output: String },
}

/// What one batch of input changes did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlushReport {
    /// Recomputation outcome per triggered page, in page order
    pub outcomes: Vec<(String, RecomputeOutcome)>,
    /// Outputs whose artifact may have changed
    pub outputs: Vec<String>,
}

impl FlushReport {
    #[must_use]
    pub fn outcome(&self, page: &str) -> Option<&RecomputeOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == page)
            .map(|(_, outcome)| outcome)
    }
}

struct Page {
    parts: PageParts,
    engine: Option<RecomputationEngine>,
}

/// One viewer's dashboard.
pub struct DashboardSession {
    pages: Vec<Page>,
    inputs: InputStore,
    subject: RefreshSubject,
}

impl DashboardSession {
    /// Loads every dataset the pages use and runs the first recomputation.
    ///
    /// # Errors
    ///
    /// [`SessionError`] if a dataset is missing from the configuration or
    /// fails to load, or if two outputs share an id. Nothing else can stop a
    /// session from starting.
    pub fn start(config: &DashboardConfig, pages: Vec<PageSpec>) -> Result<Self, SessionError> {
        let mut tables = BTreeMap::new();
        for spec in &pages {
            let Some(dataset) = spec.dataset_name() else {
                continue;
            };
            if tables.contains_key(dataset) {
                continue;
            }
            let (source, options) =
                config
                    .source(dataset)
                    .ok_or_else(|| SessionError::UnknownDataset {
                        page: spec.name().to_string(),
                        dataset: dataset.to_string(),
                    })??;
            let table = sieve_io::load(dataset, &source, &options)?;
            tables.insert(dataset.to_string(), Arc::new(table));
        }
        Self::with_tables(pages, &tables, &config.input_overrides())
    }

    /// Builds a session over already loaded tables.
    ///
    /// Initial inputs are every page's defaults, then `overrides`.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownDataset`] if a page's dataset is not in `tables`,
    /// [`SessionError::DuplicateOutput`] if two outputs share an id.
    pub fn with_tables(
        pages: Vec<PageSpec>,
        tables: &BTreeMap<String, Arc<BaseTable>>,
        overrides: &InputSnapshot,
    ) -> Result<Self, SessionError> {
        let mut seen = BTreeSet::new();
        for output in pages.iter().flat_map(PageSpec::output_ids) {
            if !seen.insert(output) {
                return Err(SessionError::DuplicateOutput {
                    output: output.to_string(),
                });
            }
        }

        let mut initial = InputSnapshot::new();
        for spec in &pages {
            initial.extend(
                spec.defaults()
                    .iter()
                    .map(|(id, value)| InputChange::new(id.clone(), value.clone())),
            );
        }
        initial.extend(
            overrides
                .iter()
                .map(|(id, value)| InputChange::new(id.clone(), value.clone())),
        );

        let subject = RefreshSubject::new();
        let mut built = Vec::with_capacity(pages.len());
        for spec in pages {
            let engine = match spec.dataset_name() {
                Some(dataset) => {
                    let base = tables.get(dataset).ok_or_else(|| SessionError::UnknownDataset {
                        page: spec.name().to_string(),
                        dataset: dataset.to_string(),
                    })?;
                    Some(
                        RecomputationEngine::new(spec.name(), Arc::clone(base), spec.predicates())
                            .with_transient(spec.transient_columns().iter().cloned())
                            .with_subject(subject.clone()),
                    )
                }
                None => None,
            };
            built.push(Page {
                parts: spec.into_parts(),
                engine,
            });
        }

        let session = Self {
            pages: built,
            inputs: InputStore::new(initial),
            subject,
        };
        for page in &session.pages {
            if let Some(engine) = &page.engine {
                engine.observe(session.inputs.snapshot());
            }
        }
        info!(
            "Dashboard session started: {} pages, {} inputs",
            session.pages.len(),
            session.inputs.snapshot().len()
        );
        Ok(session)
    }

    /// Page names in declaration order
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.parts.name.as_str())
    }

    #[must_use]
    pub fn page_title(&self, page: &str) -> Option<&str> {
        self.page(page).map(|p| p.parts.title.as_str())
    }

    /// Every output id in page order
    pub fn output_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| {
            page.parts
                .outputs
                .iter()
                .map(|o| o.output_id())
                .chain(page.parts.text_outputs.iter().map(|t| t.output_id()))
        })
    }

    #[must_use]
    pub fn inputs(&self) -> &InputSnapshot {
        self.inputs.snapshot()
    }

    #[must_use]
    pub fn engine(&self, page: &str) -> Option<&RecomputationEngine> {
        self.page(page).and_then(|p| p.engine.as_ref())
    }

    /// The page's current derived table
    #[must_use]
    pub fn table(&self, page: &str) -> Option<Arc<DerivedTable>> {
        self.engine(page).and_then(RecomputationEngine::current)
    }

    /// The page's last recomputation error, if the last attempt failed
    #[must_use]
    pub fn diagnostic(&self, page: &str) -> Option<FilterError> {
        self.engine(page).and_then(RecomputationEngine::last_error)
    }

    /// Refresh events of every page
    ///
    /// # Errors
    ///
    /// [`SubjectError::Closed`] once the session is being dropped.
    pub fn subscribe(&self) -> Result<RefreshStream, SubjectError> {
        self.subject.subscribe()
    }

    /// Applies one change and recomputes what it affects.
    pub fn set_input(&mut self, id: impl Into<InputId>, value: InputValue) -> FlushReport {
        self.apply([InputChange::new(id, value)])
    }

    /// Applies a batch of changes, then recomputes each affected page once.
    pub fn apply(&mut self, changes: impl IntoIterator<Item = InputChange>) -> FlushReport {
        self.inputs.apply_all(changes);
        self.flush()
    }

    /// Recomputes every page triggered by inputs changed since the last flush.
    pub fn flush(&mut self) -> FlushReport {
        let dirty = self.inputs.take_dirty();
        let mut report = FlushReport::default();
        if dirty.is_empty() {
            return report;
        }

        for page in &self.pages {
            if let Some(engine) = &page.engine {
                if engine.is_triggered_by(&dirty) {
                    let outcome = engine.observe(self.inputs.snapshot());
                    if outcome.is_published() {
                        report
                            .outputs
                            .extend(page.parts.outputs.iter().map(|o| o.output_id().to_string()));
                    }
                    report.outcomes.push((page.parts.name.clone(), outcome));
                }
            }
            report.outputs.extend(
                page.parts
                    .text_outputs
                    .iter()
                    .filter(|t| dirty.contains(t.input()))
                    .map(|t| t.output_id().to_string()),
            );
        }
        report
    }

    /// Renders one output, `None` for an unknown id.
    #[must_use]
    pub fn render(&self, output_id: &str) -> Option<ViewArtifact> {
        for page in &self.pages {
            if let Some(adapter) = page
                .parts
                .outputs
                .iter()
                .find(|o| o.output_id() == output_id)
            {
                let table = page.engine.as_ref().and_then(RecomputationEngine::current);
                return Some(render_output(adapter.as_ref(), table.as_deref()));
            }
            if let Some(text) = page
                .parts
                .text_outputs
                .iter()
                .find(|t| t.output_id() == output_id)
            {
                return Some(text.render(self.inputs.snapshot()));
            }
        }
        None
    }

    /// Renders every output of one page against a single table snapshot.
    pub fn render_page(&self, page: &str, sink: &mut (impl OutputSink + ?Sized)) {
        if let Some(page) = self.page(page) {
            self.render_parts(page, None, sink);
        }
    }

    /// Renders every output of every page.
    pub fn render_all_into(&self, sink: &mut (impl OutputSink + ?Sized)) {
        for page in &self.pages {
            self.render_parts(page, None, sink);
        }
    }

    /// Renders the listed outputs; unknown ids are skipped.
    pub fn render_into<S: AsRef<str>>(
        &self,
        sink: &mut (impl OutputSink + ?Sized),
        outputs: &[S],
    ) {
        let wanted: BTreeSet<&str> = outputs.iter().map(AsRef::as_ref).collect();
        for page in &self.pages {
            self.render_parts(page, Some(&wanted), sink);
        }
    }

    fn render_parts(
        &self,
        page: &Page,
        wanted: Option<&BTreeSet<&str>>,
        sink: &mut (impl OutputSink + ?Sized),
    ) {
        let keep = |id: &str| wanted.map_or(true, |w| w.contains(id));
        // One snapshot for all of the page's outputs.
        let table = page.engine.as_ref().and_then(RecomputationEngine::current);
        for adapter in page.parts.outputs.iter().filter(|o| keep(o.output_id())) {
            sink.update(
                adapter.output_id(),
                render_output(adapter.as_ref(), table.as_deref()),
            );
        }
        for text in page.parts.text_outputs.iter().filter(|t| keep(t.output_id())) {
            sink.update(text.output_id(), text.render(self.inputs.snapshot()));
        }
    }

    /// Consumes input changes until the stream ends or `cancel` fires.
    ///
    /// Changes queued together are applied as one batch; after each batch the
    /// outputs it made stale are rendered into `sink`. Returns the number of
    /// batches handled.
    pub async fn run<S, K>(&mut self, changes: S, sink: &mut K, cancel: CancellationToken) -> usize
    where
        S: Stream<Item = InputChange>,
        K: OutputSink + ?Sized,
    {
        drive(changes, cancel, |batch| {
            let report = self.apply(batch);
            self.render_into(&mut *sink, &report.outputs);
        })
        .await
    }

    fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.parts.name == name)
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.subject.close();
    }
}

impl std::fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardSession")
            .field("pages", &self.pages().collect::<Vec<_>>())
            .field("inputs", self.inputs())
            .finish_non_exhaustive()
    }
}
