// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::PageSpec;
use sieve_core::InputValue;
use sieve_view::InputTextFormatter;

/// Operator greeting. Filters nothing.
#[must_use]
pub fn home() -> PageSpec {
    PageSpec::new("home", "Home")
        .input("name_input", InputValue::Text(String::new()))
        .input("color_input", InputValue::Text(String::new()))
        .text_output(InputTextFormatter::new(
            "welcome_output",
            "name_input",
            "{} is viewing operational reports. ",
        ))
        .text_output(InputTextFormatter::new(
            "color_output",
            "color_input",
            "Your department is {}.",
        ))
}
