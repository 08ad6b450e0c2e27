// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request schemas for the item endpoints.
//!
//! | Schema | Endpoint | Output |
//! |--------|----------|--------|
//! | [`CreateItemRequest`] | `POST /items/add-new-item` | [`NewItem`] |
//! | [`UpdateItemRequest`] | `PUT /items/update-item-by-id` | `(id, ItemChanges)` |
//! | [`ItemIdRequest`] | `GET /items/fetch-item-by-id`, `DELETE /items/delete-item-by-id` | `id` |
//! | [`ListItemsRequest`] | `GET /items/fetch-item-list` | [`ItemQuery`] |

use items_core::{DEFAULT_PAGE_SIZE, Page, SortDirection};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{Schema, lenient};
use crate::item::{ItemChanges, ItemQuery, NewItem, SortField};

/// Body of `POST /items/add-new-item`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    /// Required, non-empty.
    #[validate(
        required(message = "\"title\" is required"),
        length(min = 1, message = "\"title\" is not allowed to be empty")
    )]
    #[schema(example = "Desk lamp")]
    pub title: Option<String>,

    /// Required, non-empty.
    #[validate(
        required(message = "\"description\" is required"),
        length(min = 1, message = "\"description\" is not allowed to be empty")
    )]
    pub description: Option<String>,

    /// Positive number, or a string holding one.
    #[serde(default, deserialize_with = "lenient::number")]
    #[validate(
        required(message = "\"price\" is required"),
        range(exclusive_min = 0.0, message = "\"price\" must be a positive number")
    )]
    #[schema(example = 24.5)]
    pub price: Option<f64>
}

impl Schema for CreateItemRequest {
    const FIELDS: &'static [&'static str] = &["title", "description", "price"];

    type Output = NewItem;

    fn into_output(self) -> Option<NewItem> {
        Some(NewItem {
            title:       self.title?,
            description: self.description?,
            price:       self.price?
        })
    }
}

/// Body of `PUT /items/update-item-by-id`. Absent fields stay unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
    /// Integer id, as a number or a string.
    #[serde(default, deserialize_with = "lenient::integer")]
    #[validate(required(message = "\"id\" is required"))]
    #[schema(value_type = String, example = "1")]
    pub id: Option<i64>,

    /// New title, non-empty when present.
    #[validate(length(min = 1, message = "\"title\" is not allowed to be empty"))]
    pub title: Option<String>,

    /// New description, non-empty when present.
    #[validate(length(min = 1, message = "\"description\" is not allowed to be empty"))]
    pub description: Option<String>,

    /// New price, positive when present.
    #[serde(default, deserialize_with = "lenient::number")]
    #[validate(range(exclusive_min = 0.0, message = "\"price\" must be a positive number"))]
    pub price: Option<f64>
}

impl Schema for UpdateItemRequest {
    const FIELDS: &'static [&'static str] = &["id", "title", "description", "price"];

    type Output = (i64, ItemChanges);

    fn into_output(self) -> Option<Self::Output> {
        let changes = ItemChanges {
            title:       self.title,
            description: self.description,
            price:       self.price
        };
        Some((self.id?, changes))
    }
}

/// Lookup by id, from the query string or the body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ItemIdRequest {
    /// Integer id, as a number or a string.
    #[serde(default, deserialize_with = "lenient::integer")]
    #[validate(required(message = "\"id\" is required"))]
    #[schema(value_type = String, example = "1")]
    pub id: Option<i64>
}

impl Schema for ItemIdRequest {
    const FIELDS: &'static [&'static str] = &["id"];

    type Output = i64;

    fn into_output(self) -> Option<i64> {
        self.id
    }
}

/// Query string of `GET /items/fetch-item-list`.
#[derive(Debug, Deserialize, Validate)]
pub struct ListItemsRequest {
    /// Blank means no id filter.
    #[serde(default, deserialize_with = "lenient::optional_integer")]
    pub id: Option<i64>,

    /// Title substring; blank means no filter.
    pub title: Option<String>,

    /// Column to sort by, `id` by default.
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub sort_by: Option<SortField>,

    /// `asc` (default) or `desc`.
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub sort_order: Option<SortDirection>,

    /// 1-based page number.
    #[serde(default, deserialize_with = "lenient::integer")]
    #[validate(range(min = 1, message = "\"page\" must be greater than or equal to 1"))]
    pub page: Option<i64>,

    /// Rows per page, 15 by default.
    #[serde(default, deserialize_with = "lenient::integer")]
    #[validate(range(min = 1, message = "\"page_size\" must be greater than or equal to 1"))]
    pub page_size: Option<i64>
}

impl Schema for ListItemsRequest {
    const FIELDS: &'static [&'static str] =
        &["id", "title", "sort_by", "sort_order", "page", "page_size"];

    type Output = ItemQuery;

    fn into_output(self) -> Option<ItemQuery> {
        Some(ItemQuery {
            id:        self.id,
            title:     self.title.filter(|title| !title.is_empty()),
            sort:      self.sort_by.unwrap_or_default(),
            direction: self.sort_order.unwrap_or_default(),
            page:      Page::new(
                saturate(self.page, 1),
                saturate(self.page_size, DEFAULT_PAGE_SIZE)
            )
        })
    }
}

/// Validated positive value as `u32`, saturating above `u32::MAX`.
fn saturate(value: Option<i64>, default: u32) -> u32 {
    value.map_or(default, |v| u32::try_from(v).unwrap_or(u32::MAX))
}
