// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL backend.
//!
//! | Method | SQL Operation |
//! |--------|---------------|
//! | `create` | `INSERT INTO items ... RETURNING ...` |
//! | `find_by_id` | `SELECT ... WHERE id = $1` |
//! | `list` | `SELECT ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...` |
//! | `update` | `UPDATE items SET ... WHERE id = $n` |
//! | `delete` | `DELETE FROM items WHERE id = $1` |
//!
//! `UPDATE` row counts in PostgreSQL are matched rows, so an update that
//! rewrites a row with identical values still reports 1.

use std::str::FromStr;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions}
};

use super::{
    ItemRepository, Repository, RepositoryError,
    query::{self, Bind, Statement}
};
use crate::{
    config::DatabaseConfig,
    item::{Item, ItemChanges, ItemQuery, NewItem}
};

/// Items stored in PostgreSQL through a shared connection pool.
///
/// The pool is opened once by [`connect`](Self::connect) and closed by
/// [`close`](Self::close); clones share the same pool.
#[derive(Debug, Clone)]
pub struct PgItemRepository {
    pool: PgPool
}

impl PgItemRepository {
    /// Open a pool using `config`.
    ///
    /// `DATABASE_URL`, when set, wins over the individual host/user/password
    /// parts.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let options = connect_options(config)?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        Ok(Self {
            pool
        })
    }

    /// Wrap an existing pool.
    pub const fn from_pool(pool: PgPool) -> Self {
        Self {
            pool
        }
    }

    /// Get reference to the underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection. Pending acquires fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    match &config.url {
        Some(url) => PgConnectOptions::from_str(url),
        None => Ok(PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name))
    }
}

impl Repository for PgItemRepository {
    type Error = RepositoryError;

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[items_core::async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: NewItem) -> Result<Item, Self::Error> {
        let row: Item = sqlx::query_as(&query::insert_item())
            .bind(item.title)
            .bind(item.description)
            .bind(item.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, Self::Error> {
        let row: Option<Item> = sqlx::query_as(&query::select_item_by_id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, item_query: &ItemQuery) -> Result<Vec<Item>, Self::Error> {
        let Statement {
            sql,
            binds
        } = query::select_items(item_query);

        let mut q = sqlx::query_as::<_, Item>(&sql);
        for bind in binds {
            q = match bind {
                Bind::Int(v) => q.bind(v),
                Bind::Float(v) => q.bind(v),
                Bind::Text(v) => q.bind(v)
            };
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<u64, Self::Error> {
        let Some(Statement {
            sql,
            binds
        }) = query::update_item(id, changes)
        else {
            let exists = self.find_by_id(id).await?.is_some();
            return Ok(u64::from(exists));
        };

        let mut q = sqlx::query(&sql);
        for bind in binds {
            q = match bind {
                Bind::Int(v) => q.bind(v),
                Bind::Float(v) => q.bind(v),
                Bind::Text(v) => q.bind(v)
            };
        }

        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, Self::Error> {
        let result = sqlx::query(&query::delete_item())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
