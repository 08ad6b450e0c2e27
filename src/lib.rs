// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # items-api
//!
//! CRUD HTTP API over an `items` table plus an endpoint that serves a CSV
//! file as JSON.
//!
//! ## Layers
//!
//! ```text
//! HTTP request
//!   -> api::validation::Validated   (merge body + query, decode, validate)
//!   -> api::items handler           (one service call)
//!   -> service::ItemService         (Outcome: Success / NotFound / InternalFailure)
//!   -> repository::ItemRepository   (PostgreSQL or in-memory)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use items_api::{api, config::Config, csv_source::CsvSource, repository::PgItemRepository};
//!
//! let config = Config::from_env()?;
//! let repo = PgItemRepository::connect(&config.database).await?;
//! repo.migrate().await?;
//!
//! let app = api::router(api::AppState::new(repo, CsvSource::new(&config.csv_path)));
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`item`] | `Item`, `NewItem`, `ItemChanges`, `ItemQuery`, `SortField` |
//! | [`repository`] | `ItemRepository` and its PostgreSQL and in-memory backends |
//! | [`service`] | `ItemService`, which classifies results into `Outcome` |
//! | [`csv_source`] | CSV ingestion |
//! | [`api`] | Router, handlers, validation, response envelope |
//! | [`config`] | Environment configuration |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod csv_source;
pub mod item;
pub mod repository;
pub mod service;

pub use items_core::{Outcome, OutcomeKind, Page, SortDirection};
