// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! JSON envelope shared by every endpoint, and the fixed per-operation
//! messages.
//!
//! ```json
//! { "status": 200, "success": true, "message": "Item added successfully.", "data": { ... } }
//! { "status": 404, "success": false, "message": "Item not found." }
//! { "status": 422, "success": false, "message": "Validation failed.", "error": "..." }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response}
};
use serde::Serialize;

/// Response body wrapper. `data` and `error` are omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// HTTP status code, repeated in the body.
    pub status:  u16,
    /// True only for 2xx responses.
    pub success: bool,
    /// Fixed human-readable message.
    pub message: &'static str,
    /// Operation result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data:    Option<T>,
    /// Failure detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>
}

impl<T> Envelope<T> {
    /// `200 OK` carrying `data`.
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            success: true,
            message,
            data: Some(data),
            error: None
        }
    }

    /// Non-success envelope with an optional error description.
    pub fn failure(status: StatusCode, message: &'static str, error: Option<String>) -> Self {
        Self {
            status: status.as_u16(),
            success: false,
            message,
            data: None,
            error
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Messages for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// Sent with `200`.
    pub success:   &'static str,
    /// Sent with `404`.
    pub not_found: &'static str,
    /// Sent with `500`.
    pub failure:   &'static str
}

const ITEM_NOT_FOUND: &str = "Item not found.";

/// `POST /items/add-new-item`.
pub const CREATE: Messages = Messages {
    success:   "Item added successfully.",
    not_found: ITEM_NOT_FOUND,
    failure:   "Internal server error while adding item."
};

/// `GET /items/fetch-item-list`.
pub const LIST: Messages = Messages {
    success:   "Fetched items successfully.",
    not_found: ITEM_NOT_FOUND,
    failure:   "Internal server error while fetching items."
};

/// `GET /items/fetch-item-by-id`.
pub const GET: Messages = Messages {
    success:   "Fetched item details successfully.",
    not_found: ITEM_NOT_FOUND,
    failure:   "Internal server error while fetching item details."
};

/// `PUT /items/update-item-by-id`.
pub const UPDATE: Messages = Messages {
    success:   "Item updated successfully.",
    not_found: ITEM_NOT_FOUND,
    failure:   "Internal server error while updating item."
};

/// `DELETE /items/delete-item-by-id`.
pub const DELETE: Messages = Messages {
    success:   "Item deleted successfully.",
    not_found: ITEM_NOT_FOUND,
    failure:   "Internal server error while deleting item."
};

/// CSV endpoint success.
pub const DATASET_SUCCESS: &str = "Data retrieved successfully.";
/// CSV endpoint failure.
pub const DATASET_FAILURE: &str = "Error retrieving data.";
/// Every `422`.
pub const VALIDATION_FAILED: &str = "Validation failed.";
