// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CSV dataset handler.

use axum::extract::State;

use super::{
    error::ApiError,
    response::{DATASET_FAILURE, DATASET_SUCCESS, Envelope}
};
use crate::csv_source::{CsvSource, Row};

/// Return every row of the configured CSV file.
///
/// On failure `error` carries the ingestion error's message; the path and
/// any OS error text are only logged.
#[utoipa::path(
    get,
    path = "/api/fetch-csv-data",
    tag = "Dataset",
    responses(
        (status = 200, description = "`data` is an array of objects keyed by CSV header"),
        (status = 500, description = "File missing or malformed; `error` describes the failure")
    )
)]
pub async fn fetch_csv_data(
    State(source): State<CsvSource>
) -> Result<Envelope<Vec<Row>>, ApiError> {
    match source.read_all().await {
        Ok(rows) => Ok(Envelope::ok(DATASET_SUCCESS, rows)),
        Err(e) => {
            tracing::error!(
                operation = "fetch_csv_data",
                path = %source.path().display(),
                error = ?e,
                "CSV ingestion failed"
            );
            Err(ApiError::Internal {
                message: DATASET_FAILURE,
                error:   Some(e.to_string())
            })
        }
    }
}
