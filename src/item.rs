// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The `Item` entity and the value objects used to create, change and query
//! it.
//!
//! | Type | Role |
//! |------|------|
//! | [`Item`] | Persisted row, also the response body |
//! | [`NewItem`] | Validated insert payload |
//! | [`ItemChanges`] | Validated partial update |
//! | [`ItemQuery`] | Filter, sort and page for list queries |

use std::{fmt, str::FromStr};

use items_core::prelude::{Page, SortDirection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the backing table.
pub const TABLE: &str = "items";

/// Column list in select order, matching the field order of [`Item`].
pub const COLUMNS: &str = "id, title, description, price";

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Item {
    /// Auto-assigned primary key.
    pub id: i64,

    /// Non-empty title.
    pub title: String,

    /// Non-empty description.
    pub description: String,

    /// Positive price.
    pub price: f64
}

/// Insert payload. Fields have already passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Non-empty title.
    pub title:       String,
    /// Non-empty description.
    pub description: String,
    /// Positive, finite price.
    pub price:       f64
}

impl NewItem {
    /// Materialize the row the store would hold under `id`.
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            title: self.title,
            description: self.description,
            price: self.price
        }
    }
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    /// New title.
    pub title:       Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price:       Option<f64>
}

/// A value bound to one column of an `UPDATE ... SET` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue<'a> {
    /// `TEXT` column.
    Text(&'a str),
    /// `DOUBLE PRECISION` column.
    Float(f64)
}

impl ItemChanges {
    /// True when the update would touch no column.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.price.is_none()
    }

    /// Present columns in table order, paired with their new values.
    pub fn columns(&self) -> Vec<(&'static str, ColumnValue<'_>)> {
        let mut columns = Vec::with_capacity(3);
        if let Some(title) = &self.title {
            columns.push(("title", ColumnValue::Text(title)));
        }
        if let Some(description) = &self.description {
            columns.push(("description", ColumnValue::Text(description)));
        }
        if let Some(price) = self.price {
            columns.push(("price", ColumnValue::Float(price)));
        }
        columns
    }

    /// Apply the present fields to `item` in place.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(price) = self.price {
            item.price = price;
        }
    }
}

/// Sortable columns. Anything else is rejected before SQL is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Primary key, the default order.
    #[default]
    Id,
    /// `title` column.
    Title,
    /// `description` column.
    Description,
    /// `price` column.
    Price
}

impl SortField {
    /// Column name in the items table.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Price => "price"
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Error returned when parsing an unknown sort field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field `{0}`, expected one of id, title, description, price")]
pub struct ParseSortFieldError(String);

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "price" => Ok(Self::Price),
            _ => Err(ParseSortFieldError(s.to_string()))
        }
    }
}

/// Filters, order and page for list queries.
///
/// Filters combine with AND. Results are ordered by `sort` in `direction`;
/// rows with equal keys are ordered by `id` ascending so pages never
/// overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    /// Exact id match.
    pub id: Option<i64>,

    /// Substring match on title.
    pub title: Option<String>,

    /// Primary sort column.
    pub sort: SortField,

    /// Direction of the primary sort.
    pub direction: SortDirection,

    /// Page to return.
    pub page: Page
}

impl ItemQuery {
    /// Same filters and order, different page.
    pub fn with_page(&self, page: Page) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// True when `item` passes both filters.
    pub fn matches(&self, item: &Item) -> bool {
        self.id.is_none_or(|id| item.id == id)
            && self
                .title
                .as_deref()
                .is_none_or(|needle| item.title.contains(needle))
    }

    /// Ordering of two items under this query, including the id tie-break.
    pub fn compare(&self, a: &Item, b: &Item) -> std::cmp::Ordering {
        let primary = match self.sort {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Price => a.price.total_cmp(&b.price)
        };
        self.direction.apply(primary).then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn item(id: i64, title: &str, price: f64) -> Item {
        Item {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            price
        }
    }

    #[test]
    fn changes_empty() {
        assert!(ItemChanges::default().is_empty());
        let changes = ItemChanges {
            price: Some(1.0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn changes_columns_in_table_order() {
        let changes = ItemChanges {
            title:       Some("t".into()),
            description: None,
            price:       Some(2.5)
        };
        let columns = changes.columns();
        assert_eq!(
            columns,
            vec![("title", ColumnValue::Text("t")), ("price", ColumnValue::Float(2.5))]
        );
    }

    #[test]
    fn changes_apply() {
        let mut target = item(1, "old", 1.0);
        ItemChanges {
            title:       Some("new".into()),
            description: None,
            price:       None
        }
        .apply_to(&mut target);
        assert_eq!(target.title, "new");
        assert_eq!(target.description, "old description");
        assert_eq!(target.price, 1.0);
    }

    #[rstest]
    #[case("id", SortField::Id)]
    #[case("title", SortField::Title)]
    #[case("Description", SortField::Description)]
    #[case(" price ", SortField::Price)]
    fn sort_field_parse(#[case] input: &str, #[case] expected: SortField) {
        assert_eq!(input.parse::<SortField>(), Ok(expected));
    }

    #[test]
    fn sort_field_rejects_unknown() {
        let err = "id; DROP TABLE items".parse::<SortField>().unwrap_err();
        assert!(err.to_string().contains("unknown sort field"));
    }

    #[test]
    fn query_matches_filters() {
        let query = ItemQuery {
            title: Some("ab".into()),
            ..Default::default()
        };
        assert!(query.matches(&item(1, "cabin", 1.0)));
        assert!(!query.matches(&item(2, "AB", 1.0)));

        let query = ItemQuery {
            id: Some(2),
            title: Some("ab".into()),
            ..Default::default()
        };
        assert!(!query.matches(&item(1, "cabin", 1.0)));
        assert!(query.matches(&item(2, "abc", 1.0)));
    }

    #[test]
    fn query_compare_tie_breaks_on_id() {
        let query = ItemQuery {
            sort: SortField::Price,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let a = item(1, "a", 5.0);
        let b = item(2, "b", 5.0);
        let c = item(3, "c", 9.0);
        assert_eq!(query.compare(&a, &b), std::cmp::Ordering::Less);
        assert_eq!(query.compare(&c, &a), std::cmp::Ordering::Less);
    }

    #[test]
    fn query_with_page_keeps_filters() {
        let query = ItemQuery {
            title: Some("x".into()),
            ..Default::default()
        };
        let next = query.with_page(Page::new(2, 5));
        assert_eq!(next.title.as_deref(), Some("x"));
        assert_eq!(next.page, Page::new(2, 5));
    }
}
