// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Data-access layer: classifies every repository call into an [`Outcome`].
//!
//! | Operation | Success | NotFound | InternalFailure |
//! |-----------|---------|----------|-----------------|
//! | `create` | inserted row | never | store error |
//! | `get_by_id` | the row | no such id | store error |
//! | `list` | page of rows (may be empty) | never | store error |
//! | `update_by_id` | matched row count | 0 rows matched | store error |
//! | `delete_by_id` | deleted row count | 0 rows deleted | store error |
//!
//! Store errors are logged here with the operation and backend name and
//! never leave this layer.

use std::sync::Arc;

use items_core::Outcome;

use crate::{
    item::{Item, ItemChanges, ItemQuery, NewItem},
    repository::ItemRepository
};

/// Item operations over a shared repository.
#[derive(Debug)]
pub struct ItemService<R> {
    repo: Arc<R>
}

impl<R> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo)
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    /// Take ownership of `repo`.
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo)
        }
    }

    /// Share an existing repository.
    pub const fn from_arc(repo: Arc<R>) -> Self {
        Self {
            repo
        }
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Insert a row and return it with its assigned id.
    pub async fn create(&self, item: NewItem) -> Outcome<Item> {
        self.classify("create", self.repo.create(item).await)
            .map_or(Outcome::InternalFailure, Outcome::Success)
    }

    /// Row with `id`.
    pub async fn get_by_id(&self, id: i64) -> Outcome<Item> {
        self.classify("get_by_id", self.repo.find_by_id(id).await)
            .map_or(Outcome::InternalFailure, Outcome::found)
    }

    /// One page of rows matching `query`, possibly empty.
    pub async fn list(&self, query: &ItemQuery) -> Outcome<Vec<Item>> {
        self.classify("list", self.repo.list(query).await)
            .map_or(Outcome::InternalFailure, Outcome::Success)
    }

    /// Zero matched rows is `NotFound`; a row rewritten with identical
    /// values still counts as matched.
    pub async fn update_by_id(&self, id: i64, changes: &ItemChanges) -> Outcome<u64> {
        self.classify("update_by_id", self.repo.update(id, changes).await)
            .map_or(Outcome::InternalFailure, Outcome::from)
    }

    /// Zero deleted rows is `NotFound`.
    pub async fn delete_by_id(&self, id: i64) -> Outcome<u64> {
        self.classify("delete_by_id", self.repo.delete(id).await)
            .map_or(Outcome::InternalFailure, Outcome::from)
    }

    fn classify<T>(&self, operation: &'static str, result: Result<T, R::Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(
                    operation,
                    backend = self.repo.backend(),
                    error = %e,
                    "item store call failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use items_core::{OutcomeKind, Repository};

    use super::*;
    use crate::repository::InMemoryItemRepository;

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("store unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    struct FailingRepository;

    impl Repository for FailingRepository {
        type Error = Unavailable;

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    #[items_core::async_trait]
    impl ItemRepository for FailingRepository {
        async fn create(&self, _: NewItem) -> Result<Item, Self::Error> {
            Err(Unavailable)
        }

        async fn find_by_id(&self, _: i64) -> Result<Option<Item>, Self::Error> {
            Err(Unavailable)
        }

        async fn list(&self, _: &ItemQuery) -> Result<Vec<Item>, Self::Error> {
            Err(Unavailable)
        }

        async fn update(&self, _: i64, _: &ItemChanges) -> Result<u64, Self::Error> {
            Err(Unavailable)
        }

        async fn delete(&self, _: i64) -> Result<u64, Self::Error> {
            Err(Unavailable)
        }
    }

    fn widget() -> NewItem {
        NewItem {
            title:       "Widget".into(),
            description: "A widget".into(),
            price:       9.99
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let created = service.create(widget()).await.success().unwrap();
        assert_eq!(created.title, "Widget");

        let fetched = service.get_by_id(created.id).await;
        assert_eq!(fetched, Outcome::Success(created));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let service = ItemService::new(InMemoryItemRepository::new());
        assert!(service.get_by_id(42).await.is_not_found());
    }

    #[tokio::test]
    async fn list_empty_is_success() {
        let service = ItemService::new(InMemoryItemRepository::new());
        assert_eq!(
            service.list(&ItemQuery::default()).await,
            Outcome::Success(Vec::new())
        );
    }

    #[tokio::test]
    async fn update_classifies_matched_rows() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let created = service.create(widget()).await.success().unwrap();
        let changes = ItemChanges {
            price: Some(1.5),
            ..Default::default()
        };

        assert_eq!(service.update_by_id(created.id, &changes).await, Outcome::Success(1));
        assert!(service.update_by_id(created.id + 1, &changes).await.is_not_found());

        let updated = service.get_by_id(created.id).await.success().unwrap();
        assert_eq!(updated.price, 1.5);
        assert_eq!(updated.title, "Widget");
    }

    #[tokio::test]
    async fn update_with_same_values_is_success() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let created = service.create(widget()).await.success().unwrap();
        let same = ItemChanges {
            title: Some(created.title.clone()),
            ..Default::default()
        };
        assert!(service.update_by_id(created.id, &same).await.is_success());
    }

    #[tokio::test]
    async fn delete_twice() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let created = service.create(widget()).await.success().unwrap();
        assert_eq!(service.delete_by_id(created.id).await, Outcome::Success(1));
        assert!(service.delete_by_id(created.id).await.is_not_found());
        assert!(service.get_by_id(created.id).await.is_not_found());
    }

    #[tokio::test]
    async fn store_errors_become_internal_failure() {
        let service = ItemService::new(FailingRepository);
        assert_eq!(service.create(widget()).await.kind(), OutcomeKind::InternalFailure);
        assert!(service.get_by_id(1).await.is_internal_failure());
        assert!(service.list(&ItemQuery::default()).await.is_internal_failure());
        assert!(
            service
                .update_by_id(1, &ItemChanges::default())
                .await
                .is_internal_failure()
        );
        assert!(service.delete_by_id(1).await.is_internal_failure());
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let other = service.clone();
        let _ = service.create(widget()).await;
        assert_eq!(other.repository().len().await, 1);
    }
}
