// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use items_core::prelude::*;
//! ```

pub use crate::{
    DEFAULT_PAGE_SIZE, Outcome, OutcomeKind, Page, Repository, SortDirection, async_trait
};
