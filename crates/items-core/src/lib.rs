// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for the items API.
//!
//! This crate holds the storage-agnostic vocabulary shared by every
//! repository backend and by the HTTP layer.
//!
//! # Overview
//!
//! - [`Repository`]: Base trait for all storage backends
//! - [`Outcome`]: Three-way classification of a data-access call
//! - [`Page`]: 1-indexed pagination parameters
//! - [`SortDirection`]: Ordering for list queries
//! - [`prelude`]: Convenient re-exports
//!
//! # Usage
//!
//! ```rust,ignore
//! use items_core::prelude::*;
//!
//! #[async_trait]
//! impl ItemRepository for MyStore {
//!     // ...
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod outcome;
pub mod prelude;

use std::{fmt, str::FromStr};

pub use outcome::{Outcome, OutcomeKind};

/// Re-export async_trait for repository implementations.
pub use async_trait::async_trait;

/// Base repository trait.
///
/// Every entity repository trait extends this one, so the error type and
/// a backend label are available to generic code such as the data-access
/// layer, which logs failures with the backend name.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// pub trait ItemRepository: Repository {
///     async fn find_by_id(&self, id: i64) -> Result<Option<Item>, Self::Error>;
///     // ...
/// }
/// ```
pub trait Repository: Send + Sync {
    /// Error type for repository operations.
    ///
    /// Must implement `std::error::Error + Send + Sync` for async
    /// compatibility.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short backend label used in log records (`"postgres"`, `"in_memory"`).
    fn backend(&self) -> &'static str;
}

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Pagination parameters for list operations.
///
/// Pages are 1-indexed. There is no upper bound on `size`; callers that
/// accept untrusted input are responsible for capping it.
///
/// # Example
///
/// ```rust
/// use items_core::Page;
///
/// let first = Page::new(1, 15);
/// assert_eq!(first.offset(), 0);
///
/// let third = Page::new(3, 15);
/// assert_eq!(third.offset(), 30);
/// assert_eq!(third.limit(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// Page number, starting at 1.
    pub number: u32,

    /// Maximum number of rows on the page.
    pub size: u32
}

impl Page {
    /// Create pagination for a specific page.
    ///
    /// # Arguments
    ///
    /// * `number`: Page number (1-indexed)
    /// * `size`: Rows per page
    pub const fn new(number: u32, size: u32) -> Self {
        Self {
            number,
            size
        }
    }

    /// Number of rows to skip: `(number - 1) * size`.
    ///
    /// Saturates at `i64::MAX`, which no table reaches. A page number of
    /// zero is treated as the first page.
    pub const fn offset(&self) -> i64 {
        let skipped = self.number.saturating_sub(1) as i64;
        skipped.saturating_mul(self.size as i64)
    }

    /// Maximum rows to return.
    pub const fn limit(&self) -> i64 {
        self.size as i64
    }

    /// Next page with the same size.
    pub const fn next(&self) -> Self {
        Self {
            number: self.number.saturating_add(1),
            size:   self.size
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size:   DEFAULT_PAGE_SIZE
        }
    }
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0).
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }

    /// Lowercase wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc"
        }
    }

    /// Apply the direction to an ascending comparison.
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse()
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortDirectionError(String);

impl fmt::Display for ParseSortDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort direction `{}`, expected `asc` or `desc`", self.0)
    }
}

impl std::error::Error for ParseSortDirectionError {}

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortDirectionError(s.to_string()))
        }
    }
}
