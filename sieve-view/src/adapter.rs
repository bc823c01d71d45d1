// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ViewArtifact;
use sieve_core::{DerivedTable, RenderError};

/// A read-only consumer of the derived table that produces one output.
///
/// Implementations must be pure: they never cache between calls and never
/// ask for a recomputation.
pub trait PresentationAdapter: Send + Sync {
    /// Stable identifier the host binds to a screen region
    fn output_id(&self) -> &str;

    /// Builds the artifact for `table`.
    ///
    /// # Errors
    ///
    /// [`RenderError`] if the table cannot be mapped onto this output.
    fn render(&self, table: &DerivedTable) -> Result<ViewArtifact, RenderError>;
}

/// Renders one output, absorbing every failure.
///
/// An unset table yields [`ViewArtifact::Pending`]; a [`RenderError`] is
/// logged and yields [`ViewArtifact::Placeholder`], so one broken output never
/// affects its siblings.
pub fn render_output(
    adapter: &(impl PresentationAdapter + ?Sized),
    table: Option<&DerivedTable>,
) -> ViewArtifact {
    let Some(table) = table else {
        return ViewArtifact::Pending;
    };
    match adapter.render(table) {
        Ok(artifact) => artifact,
        Err(err) => {
            warn!("Output {} degraded to placeholder: {}", adapter.output_id(), err);
            ViewArtifact::Placeholder {
                reason: err.to_string(),
            }
        }
    }
}
