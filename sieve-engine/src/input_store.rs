// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sieve_core::{InputChange, InputId, InputSnapshot};
use std::collections::BTreeSet;

/// Live input values plus the ids changed since the last [`take_dirty`].
///
/// Several changes may land between two recomputation passes; the dirty set
/// collapses them so each affected page recomputes once per pass.
///
/// [`take_dirty`]: InputStore::take_dirty
#[derive(Debug, Clone, Default)]
pub struct InputStore {
    snapshot: InputSnapshot,
    dirty: BTreeSet<InputId>,
}

impl InputStore {
    #[must_use]
    pub fn new(initial: InputSnapshot) -> Self {
        Self {
            snapshot: initial,
            dirty: BTreeSet::new(),
        }
    }

    /// Records one change. Returns `false` if the value was already current.
    pub fn apply(&mut self, change: InputChange) -> bool {
        let InputChange { id, value } = change;
        let changed = self.snapshot.set(id.clone(), value);
        if changed {
            self.dirty.insert(id);
        }
        changed
    }

    /// Records a batch, returning how many entries changed a value.
    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = InputChange>) -> usize {
        changes
            .into_iter()
            .map(|change| self.apply(change))
            .filter(|changed| *changed)
            .count()
    }

    #[must_use]
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drains the ids changed since the previous call.
    pub fn take_dirty(&mut self) -> BTreeSet<InputId> {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_core::InputValue;

    #[test]
    fn repeated_value_is_not_dirty() {
        let mut store =
            InputStore::new(InputSnapshot::new().with("MEDICINE_A", InputValue::Toggle(true)));

        assert!(!store.apply(InputChange::new("MEDICINE_A", InputValue::Toggle(true))));
        assert!(!store.is_dirty());

        assert!(store.apply(InputChange::new("MEDICINE_A", InputValue::Toggle(false))));
        let dirty = store.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert!(!store.is_dirty());
    }
}
