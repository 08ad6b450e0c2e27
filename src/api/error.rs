// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transport-level failures and the mapping from [`Outcome`] to responses.
//!
//! | Variant | Status |
//! |---------|--------|
//! | `Validation` | 422 Unprocessable Entity |
//! | `NotFound` | 404 Not Found |
//! | `Internal` | 500 Internal Server Error |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response}
};
use items_core::Outcome;

use super::response::{Envelope, Messages, VALIDATION_FAILED};

/// A failed request, rendered as an [`Envelope`] without `data`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input rejected before reaching a handler; carries the joined field
    /// messages.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No row matched; carries the operation's message.
    #[error("{0}")]
    NotFound(&'static str),

    /// `error` is a client-safe description, never raw fault text.
    #[error("{message}")]
    Internal {
        /// Fixed per-operation message.
        message: &'static str,
        /// Optional detail for the `error` field.
        error:   Option<String>
    }
}

impl ApiError {
    /// Status code of the rendered response.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal {
                ..
            } => StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope: Envelope<()> = match self {
            Self::Validation(error) => Envelope::failure(status, VALIDATION_FAILED, Some(error)),
            Self::NotFound(message) => Envelope::failure(status, message, None),
            Self::Internal {
                message,
                error
            } => Envelope::failure(status, message, error)
        };
        envelope.into_response()
    }
}

/// Map a classified data-access result onto a response for one operation.
pub fn respond<T>(outcome: Outcome<T>, messages: Messages) -> Result<Envelope<T>, ApiError> {
    match outcome {
        Outcome::Success(data) => Ok(Envelope::ok(messages.success, data)),
        Outcome::NotFound => Err(ApiError::NotFound(messages.not_found)),
        Outcome::InternalFailure => Err(ApiError::Internal {
            message: messages.failure,
            error:   None
        })
    }
}
