// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Item CRUD handlers.
//!
//! Each handler receives an already validated request, makes one
//! [`ItemService`] call and maps the [`Outcome`](items_core::Outcome) with
//! [`respond`]:
//!
//! | Outcome | Status |
//! |---------|--------|
//! | `Success` | 200 |
//! | `NotFound` | 404 |
//! | `InternalFailure` | 500 |

use axum::{
    Router,
    extract::State,
    routing::{delete, get, post, put}
};

use super::{
    AppState,
    dto::{CreateItemRequest, ItemIdRequest, ListItemsRequest, UpdateItemRequest},
    error::{ApiError, respond},
    response::{CREATE, DELETE, Envelope, GET, LIST, UPDATE},
    validation::Validated
};
use crate::{item::Item, repository::ItemRepository, service::ItemService};

/// Routes mounted under `/items`.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ItemRepository + 'static
{
    Router::new()
        .route("/add-new-item", post(create_item::<R>))
        .route("/fetch-item-list", get(list_items::<R>))
        .route("/fetch-item-by-id", get(get_item::<R>))
        .route("/update-item-by-id", put(update_item::<R>))
        .route("/delete-item-by-id", delete(delete_item::<R>))
}

/// Create an item.
#[utoipa::path(
    post,
    path = "/items/add-new-item",
    tag = "Items",
    request_body(content = CreateItemRequest, description = "Fields of the new item"),
    responses(
        (status = 200, description = "Item added; `data` is the stored item", body = Item),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_item<R>(
    State(service): State<ItemService<R>>,
    Validated(item): Validated<CreateItemRequest>
) -> Result<Envelope<Item>, ApiError>
where
    R: ItemRepository + 'static
{
    respond(service.create(item).await, CREATE)
}

/// List items with optional filters, sorting and pagination.
#[utoipa::path(
    get,
    path = "/items/fetch-item-list",
    tag = "Items",
    params(
        ("id" = Option<i64>, Query, description = "Exact id"),
        ("title" = Option<String>, Query, description = "Case-sensitive title substring"),
        ("sort_by" = Option<String>, Query, description = "id, title, description or price"),
        ("sort_order" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("page_size" = Option<u32>, Query, description = "Rows per page, default 15")
    ),
    responses(
        (status = 200, description = "Page of items; `data` is an array", body = [Item]),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_items<R>(
    State(service): State<ItemService<R>>,
    Validated(query): Validated<ListItemsRequest>
) -> Result<Envelope<Vec<Item>>, ApiError>
where
    R: ItemRepository + 'static
{
    respond(service.list(&query).await, LIST)
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/items/fetch-item-by-id",
    tag = "Items",
    params(("id" = i64, Query, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_item<R>(
    State(service): State<ItemService<R>>,
    Validated(id): Validated<ItemIdRequest>
) -> Result<Envelope<Item>, ApiError>
where
    R: ItemRepository + 'static
{
    respond(service.get_by_id(id).await, GET)
}

/// Partially update an item. `data` is the matched row count.
#[utoipa::path(
    put,
    path = "/items/update-item-by-id",
    tag = "Items",
    request_body(content = UpdateItemRequest, description = "Id plus the fields to change"),
    responses(
        (status = 200, description = "Item updated", body = u64),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_item<R>(
    State(service): State<ItemService<R>>,
    Validated((id, changes)): Validated<UpdateItemRequest>
) -> Result<Envelope<u64>, ApiError>
where
    R: ItemRepository + 'static
{
    respond(service.update_by_id(id, &changes).await, UPDATE)
}

/// Delete an item. `data` is the deleted row count.
#[utoipa::path(
    delete,
    path = "/items/delete-item-by-id",
    tag = "Items",
    params(("id" = Option<i64>, Query, description = "Item id, if not given in the body")),
    request_body(content = ItemIdRequest, description = "Item id, if not given in the query"),
    responses(
        (status = 200, description = "Item deleted", body = u64),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_item<R>(
    State(service): State<ItemService<R>>,
    Validated(id): Validated<ItemIdRequest>
) -> Result<Envelope<u64>, ApiError>
where
    R: ItemRepository + 'static
{
    respond(service.delete_by_id(id).await, DELETE)
}
