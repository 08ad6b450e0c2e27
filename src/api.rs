// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP surface.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/items/add-new-item` | [`items::create_item`] |
//! | GET | `/items/fetch-item-list` | [`items::list_items`] |
//! | GET | `/items/fetch-item-by-id` | [`items::get_item`] |
//! | PUT | `/items/update-item-by-id` | [`items::update_item`] |
//! | DELETE | `/items/delete-item-by-id` | [`items::delete_item`] |
//! | GET | `/api/fetch-csv-data` | [`dataset::fetch_csv_data`] |
//! | GET | `/api-docs/openapi.json` | OpenAPI document |
//!
//! # Usage
//!
//! ```rust,ignore
//! let state = AppState::new(InMemoryItemRepository::new(), CsvSource::new("data.csv"));
//! let app = api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod dataset;
pub mod dto;
mod error;
pub mod items;
pub mod response;
pub mod validation;

use std::sync::Arc;

use axum::{Json, Router, extract::FromRef, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use error::{ApiError, respond};
pub use response::Envelope;

use crate::{
    csv_source::CsvSource,
    item::{Item, SortField},
    repository::ItemRepository,
    service::ItemService
};

/// Shared handler state.
#[derive(Debug)]
pub struct AppState<R> {
    /// Item operations.
    pub items: ItemService<R>,
    /// File behind `/api/fetch-csv-data`.
    pub csv:   CsvSource
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            csv:   self.csv.clone()
        }
    }
}

impl<R: ItemRepository> AppState<R> {
    /// State owning `repo`.
    pub fn new(repo: R, csv: CsvSource) -> Self {
        Self {
            items: ItemService::new(repo),
            csv
        }
    }

    /// State sharing `repo`.
    pub fn from_arc(repo: Arc<R>, csv: CsvSource) -> Self {
        Self {
            items: ItemService::from_arc(repo),
            csv
        }
    }
}

impl<R> FromRef<AppState<R>> for ItemService<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        state.items.clone()
    }
}

impl<R> FromRef<AppState<R>> for CsvSource {
    fn from_ref(state: &AppState<R>) -> Self {
        state.csv.clone()
    }
}

/// OpenAPI document for every route.
#[derive(OpenApi)]
#[openapi(
    info(title = "Items API", description = "Item CRUD and CSV dataset endpoints"),
    paths(
        items::create_item,
        items::list_items,
        items::get_item,
        items::update_item,
        items::delete_item,
        dataset::fetch_csv_data
    ),
    components(schemas(
        Item,
        SortField,
        dto::CreateItemRequest,
        dto::UpdateItemRequest,
        dto::ItemIdRequest
    )),
    tags(
        (name = "Items", description = "Item management"),
        (name = "Dataset", description = "CSV file contents")
    )
)]
/// OpenAPI document for every route.
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router.
pub fn router<R>(state: AppState<R>) -> Router
where
    R: ItemRepository + 'static
{
    Router::new()
        .nest("/items", items::routes::<R>())
        .route("/api/fetch-csv-data", get(dataset::fetch_csv_data))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
