// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ViewArtifact;
use sieve_core::{InputId, InputSnapshot, InputValue};

/// Echoes one text input through a template.
///
/// Every `{}` in the template is replaced by the input's current text. An
/// input with no value yet renders as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTextFormatter {
    output_id: String,
    input: InputId,
    template: String,
}

impl InputTextFormatter {
    pub fn new(
        output_id: impl Into<String>,
        input: impl Into<InputId>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            output_id: output_id.into(),
            input: input.into(),
            template: template.into(),
        }
    }

    #[must_use]
    pub fn output_id(&self) -> &str {
        &self.output_id
    }

    #[must_use]
    pub fn input(&self) -> &InputId {
        &self.input
    }

    #[must_use]
    pub fn render(&self, inputs: &InputSnapshot) -> ViewArtifact {
        let value = match inputs.get(self.input.as_str()) {
            Some(InputValue::Text(text)) => text.clone(),
            Some(InputValue::Selection(items)) => items.join(", "),
            Some(InputValue::Number(n)) => sieve_core::Value::Number(*n).to_string(),
            Some(InputValue::Toggle(on)) => on.to_string(),
            Some(InputValue::DateRange(..) | InputValue::NumberRange(..)) | None => String::new(),
        };
        ViewArtifact::text(self.template.replace("{}", &value))
    }
}
