// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-slot cache for the latest derived table.
//!
//! Publishing swaps an `Arc` under a write lock that is held only for the
//! pointer swap; the table itself is fully built before [`set`] is called.
//! Readers clone the `Arc` out, so a reader always holds one complete
//! published table for as long as it needs it, even while a newer one is
//! being published.
//!
//! [`set`]: DerivedTableCache::set

use parking_lot::RwLock;
use sieve_core::DerivedTable;
use std::sync::Arc;

/// Holds the latest published [`DerivedTable`], if any.
#[derive(Debug, Default)]
pub struct DerivedTableCache {
    slot: RwLock<Option<Arc<DerivedTable>>>,
}

impl DerivedTableCache {
    /// An unset cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest published table, `None` before the first publish
    #[must_use]
    pub fn get(&self) -> Option<Arc<DerivedTable>> {
        self.slot.read().clone()
    }

    /// Replaces the slot, returning the table it held.
    pub(crate) fn set(&self, table: Arc<DerivedTable>) -> Option<Arc<DerivedTable>> {
        self.slot.write().replace(table)
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Generation of the held table
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        self.slot.read().as_ref().map(|t| t.generation())
    }
}
