// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The production dashboard's pages.
//!
//! Each page uses the dataset of the same name in [`crate::DashboardConfig`].

mod home;
mod orders;
mod quantity;
mod records;

pub use self::home::home;
pub use self::orders::orders;
pub use self::quantity::quantity;
pub use self::records::records;

use crate::PageSpec;

/// Every page in navigation order
#[must_use]
pub fn all() -> Vec<PageSpec> {
    vec![home(), orders(), quantity(), records()]
}
