// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{PresentationAdapter, ViewArtifact};
use sieve_core::{DerivedTable, RenderError};

/// `"Showing {filtered} of {total} records"`, where `total` is the base table size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountFormatter {
    output_id: String,
}

impl CountFormatter {
    pub fn new(output_id: impl Into<String>) -> Self {
        Self {
            output_id: output_id.into(),
        }
    }

    #[must_use]
    pub fn format(filtered: usize, total: usize) -> String {
        format!("Showing {filtered} of {total} records")
    }
}

impl PresentationAdapter for CountFormatter {
    fn output_id(&self) -> &str {
        &self.output_id
    }

    fn render(&self, table: &DerivedTable) -> Result<ViewArtifact, RenderError> {
        Ok(ViewArtifact::text(Self::format(
            table.len(),
            table.base().len(),
        )))
    }
}
