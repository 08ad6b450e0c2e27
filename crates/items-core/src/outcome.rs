// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Three-way classification of data-access calls.
//!
//! Repository backends report `Result<T, E>`; the data-access layer folds
//! that into an [`Outcome`] so the HTTP layer only has to map three cases.
//! The underlying error is logged where the fold happens and is not carried
//! further.

/// Result of a single data-access operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// Operation succeeded with a payload.
    Success(T),

    /// No row matched the key.
    NotFound,

    /// Storage or I/O failure.
    InternalFailure
}

/// Payload-free tag of an [`Outcome`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// See [`Outcome::Success`].
    Success,

    /// See [`Outcome::NotFound`].
    NotFound,

    /// See [`Outcome::InternalFailure`].
    InternalFailure
}

impl<T> Outcome<T> {
    /// Classify an optional lookup: `None` becomes [`Outcome::NotFound`].
    pub fn found(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Success(v),
            None => Self::NotFound
        }
    }

    /// Payload-free tag.
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::NotFound => OutcomeKind::NotFound,
            Self::InternalFailure => OutcomeKind::InternalFailure
        }
    }

    /// Check if this is a success.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if no row matched.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if the storage layer failed.
    pub const fn is_internal_failure(&self) -> bool {
        matches!(self, Self::InternalFailure)
    }

    /// Transform the success payload.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(v) => Outcome::Success(f(v)),
            Self::NotFound => Outcome::NotFound,
            Self::InternalFailure => Outcome::InternalFailure
        }
    }

    /// Chain another classified step on success.
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(v) => f(v),
            Self::NotFound => Outcome::NotFound,
            Self::InternalFailure => Outcome::InternalFailure
        }
    }

    /// Success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            _ => None
        }
    }
}

/// Row counts from `UPDATE`/`DELETE`: zero matched rows is [`Outcome::NotFound`].
impl From<u64> for Outcome<u64> {
    fn from(count: u64) -> Self {
        if count == 0 {
            Self::NotFound
        } else {
            Self::Success(count)
        }
    }
}
