// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage backends for items.
//!
//! | Backend | Type | Error |
//! |---------|------|-------|
//! | PostgreSQL | [`PgItemRepository`] | [`RepositoryError`] |
//! | Process memory | [`InMemoryItemRepository`] | [`std::convert::Infallible`] |
//!
//! Both implement [`ItemRepository`]. Backends report raw results; the
//! classification into [`items_core::Outcome`] happens in
//! [`crate::service::ItemService`].

mod memory;
mod postgres;
pub mod query;

pub use items_core::Repository;
pub use memory::InMemoryItemRepository;
pub use postgres::PgItemRepository;

use crate::item::{Item, ItemChanges, ItemQuery, NewItem};

/// Errors raised by the PostgreSQL backend.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Query or connection failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError)
}

/// Item storage operations. Each method issues exactly one statement.
///
/// # Example
///
/// ```rust,ignore
/// let repo = PgItemRepository::connect(&config.database).await?;
/// let item = repo.create(NewItem { title, description, price }).await?;
/// let same = repo.find_by_id(item.id).await?;
/// ```
#[items_core::async_trait]
pub trait ItemRepository: Repository {
    /// Insert a row and return it with its assigned id.
    async fn create(&self, item: NewItem) -> Result<Item, Self::Error>;

    /// Fetch one row by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, Self::Error>;

    /// Filtered, ordered, paginated rows.
    async fn list(&self, query: &ItemQuery) -> Result<Vec<Item>, Self::Error>;

    /// Apply a partial update; returns the number of matched rows.
    ///
    /// With no changes this only checks that the row exists.
    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<u64, Self::Error>;

    /// Delete by primary key; returns the number of deleted rows.
    async fn delete(&self, id: i64) -> Result<u64, Self::Error>;
}
