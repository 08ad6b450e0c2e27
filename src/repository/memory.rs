// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-process backend with the same filter, sort and paging rules as the
//! PostgreSQL one. Used for local runs (`STORAGE_MODE=in_memory`) and tests.
//!
//! Text columns compare by byte order, not by a database collation, so
//! mixed-case titles can sort differently than under PostgreSQL.

use std::{collections::BTreeMap, convert::Infallible};

use tokio::sync::RwLock;

use super::{ItemRepository, Repository};
use crate::item::{Item, ItemChanges, ItemQuery, NewItem};

#[derive(Debug, Default)]
struct Table {
    /// Last assigned id; ids are never reused, like a sequence.
    last_id: i64,
    rows:    BTreeMap<i64, Item>
}

/// Items held in process memory behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    table: RwLock<Table>
}

impl InMemoryItemRepository {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// True when no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

/// Apply `query` to `rows`: filter, order with id tie-break, then page.
pub fn select<'a>(rows: impl IntoIterator<Item = &'a Item>, query: &ItemQuery) -> Vec<Item> {
    let mut matched: Vec<&Item> = rows.into_iter().filter(|item| query.matches(item)).collect();
    matched.sort_by(|a, b| query.compare(a, b));

    let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
    matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

impl Repository for InMemoryItemRepository {
    type Error = Infallible;

    fn backend(&self) -> &'static str {
        "in_memory"
    }
}

#[items_core::async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: NewItem) -> Result<Item, Self::Error> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let row = item.into_item(table.last_id);
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, Self::Error> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, query: &ItemQuery) -> Result<Vec<Item>, Self::Error> {
        let table = self.table.read().await;
        Ok(select(table.rows.values(), query))
    }

    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<u64, Self::Error> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                changes.apply_to(row);
                Ok(1)
            }
            None => Ok(0)
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, Self::Error> {
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use items_core::{Page, SortDirection};
    use proptest::prelude::*;

    use super::*;
    use crate::item::SortField;

    fn new_item(title: &str, price: f64) -> NewItem {
        NewItem {
            title:       title.to_string(),
            description: format!("about {title}"),
            price
        }
    }

    fn rows(specs: &[(&str, f64)]) -> Vec<Item> {
        specs
            .iter()
            .enumerate()
            .map(|(i, (title, price))| new_item(title, *price).into_item(i as i64 + 1))
            .collect()
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = InMemoryItemRepository::new();
        let a = repo.create(new_item("a", 1.0)).await.unwrap();
        let b = repo.create(new_item("b", 2.0)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryItemRepository::new();
        let a = repo.create(new_item("a", 1.0)).await.unwrap();
        assert_eq!(repo.delete(a.id).await.unwrap(), 1);
        let b = repo.create(new_item("b", 1.0)).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn update_counts_matched_rows() {
        let repo = InMemoryItemRepository::new();
        let a = repo.create(new_item("a", 1.0)).await.unwrap();
        let same = ItemChanges {
            title: Some("a".into()),
            ..Default::default()
        };
        assert_eq!(repo.update(a.id, &same).await.unwrap(), 1);
        assert_eq!(repo.update(99, &same).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_missing_is_zero() {
        let repo = InMemoryItemRepository::new();
        assert_eq!(repo.delete(5).await.unwrap(), 0);
        assert!(repo.is_empty().await);
    }

    #[test]
    fn select_filters_by_title_substring() {
        let rows = rows(&[("abc", 1.0), ("xyz", 2.0), ("cab", 3.0), ("ABC", 4.0)]);
        let query = ItemQuery {
            title: Some("ab".into()),
            ..Default::default()
        };
        let titles: Vec<_> = select(&rows, &query).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["abc", "cab"]);
    }

    #[test]
    fn select_filter_by_id_matches_at_most_one() {
        let rows = rows(&[("a", 1.0), ("b", 2.0)]);
        let query = ItemQuery {
            id: Some(2),
            ..Default::default()
        };
        assert_eq!(select(&rows, &query).len(), 1);
        let query = ItemQuery {
            id: Some(3),
            ..Default::default()
        };
        assert!(select(&rows, &query).is_empty());
    }

    #[test]
    fn select_sorts_desc_with_id_tie_break() {
        let rows = rows(&[("a", 5.0), ("b", 9.0), ("c", 5.0)]);
        let query = ItemQuery {
            sort: SortField::Price,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let ids: Vec<_> = select(&rows, &query).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn select_pages() {
        let rows = rows(&[("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0), ("e", 1.0)]);
        let page = |number| {
            select(
                &rows,
                &ItemQuery {
                    page: Page::new(number, 2),
                    ..Default::default()
                }
            )
            .into_iter()
            .map(|i| i.id)
            .collect::<Vec<_>>()
        };
        assert_eq!(page(1), vec![1, 2]);
        assert_eq!(page(2), vec![3, 4]);
        assert_eq!(page(3), vec![5]);
        assert!(page(4).is_empty());
    }

    fn sort_field() -> impl Strategy<Value = SortField> {
        prop_oneof![
            Just(SortField::Id),
            Just(SortField::Title),
            Just(SortField::Description),
            Just(SortField::Price)
        ]
    }

    fn direction() -> impl Strategy<Value = SortDirection> {
        prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
    }

    proptest! {
        #[test]
        fn consecutive_pages_reproduce_full_result(
            specs in prop::collection::vec(("[ab]{0,2}", 0u8..4), 0..30),
            size in 1u32..7,
            sort in sort_field(),
            direction in direction(),
            needle in prop::option::of("[ab]")
        ) {
            let rows: Vec<Item> = specs
                .iter()
                .enumerate()
                .map(|(i, (title, price))| new_item(title, f64::from(*price)).into_item(i as i64 + 1))
                .collect();
            let base = ItemQuery {
                title: needle,
                sort,
                direction,
                page: Page::new(1, u32::MAX),
                ..Default::default()
            };
            let full = select(&rows, &base);

            let mut stitched = Vec::new();
            let mut page = Page::new(1, size);
            loop {
                let chunk = select(&rows, &base.with_page(page));
                prop_assert!(chunk.len() <= size as usize);
                if chunk.is_empty() {
                    break;
                }
                stitched.extend(chunk);
                page = page.next();
            }

            prop_assert_eq!(stitched, full);
        }
    }
}
