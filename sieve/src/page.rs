// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Declarative description of one dashboard page.

use sieve_core::{FilterBinding, InputId, InputSnapshot, InputValue, PredicateSet, TransientColumn};
use sieve_view::{InputTextFormatter, PresentationAdapter};

/// One page: the dataset it filters, its inputs with defaults, and its outputs.
///
/// A page without a dataset has no engine and can only hold input-text
/// outputs. Recomputation triggers are never declared here: they follow from
/// the filter bindings.
pub struct PageSpec {
    name: String,
    title: String,
    dataset: Option<String>,
    bindings: Vec<FilterBinding>,
    transient: Vec<TransientColumn>,
    defaults: InputSnapshot,
    outputs: Vec<Box<dyn PresentationAdapter>>,
    text_outputs: Vec<InputTextFormatter>,
}

impl PageSpec {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            dataset: None,
            bindings: Vec::new(),
            transient: Vec::new(),
            defaults: InputSnapshot::new(),
            outputs: Vec::new(),
            text_outputs: Vec::new(),
        }
    }

    /// Filters the named dataset.
    #[must_use]
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, binding: FilterBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    #[must_use]
    pub fn transient(mut self, column: TransientColumn) -> Self {
        self.transient.push(column);
        self
    }

    /// Declares an input and its initial value.
    #[must_use]
    pub fn input(mut self, id: impl Into<InputId>, default: InputValue) -> Self {
        self.defaults.set(id, default);
        self
    }

    #[must_use]
    pub fn output(mut self, adapter: impl PresentationAdapter + 'static) -> Self {
        self.outputs.push(Box::new(adapter));
        self
    }

    #[must_use]
    pub fn text_output(mut self, formatter: InputTextFormatter) -> Self {
        self.text_outputs.push(formatter);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn dataset_name(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    #[must_use]
    pub fn defaults(&self) -> &InputSnapshot {
        &self.defaults
    }

    /// Predicate set built from the page's bindings
    #[must_use]
    pub fn predicates(&self) -> PredicateSet {
        PredicateSet::new(self.bindings.clone())
    }

    #[must_use]
    pub fn transient_columns(&self) -> &[TransientColumn] {
        &self.transient
    }

    /// Every output id, table outputs first
    pub fn output_ids(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .map(|o| o.output_id())
            .chain(self.text_outputs.iter().map(InputTextFormatter::output_id))
    }

    pub(crate) fn into_parts(self) -> PageParts {
        PageParts {
            name: self.name,
            title: self.title,
            outputs: self.outputs,
            text_outputs: self.text_outputs,
        }
    }
}

impl std::fmt::Debug for PageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSpec")
            .field("name", &self.name)
            .field("dataset", &self.dataset)
            .field("bindings", &self.bindings)
            .field("outputs", &self.output_ids().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// What the session keeps of a spec once its engine is built.
pub(crate) struct PageParts {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) outputs: Vec<Box<dyn PresentationAdapter>>,
    pub(crate) text_outputs: Vec<InputTextFormatter>,
}
