// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Server entry point.

use std::process::ExitCode;

use axum::Router;
use items_api::{
    api::{self, AppState},
    config::{Config, StorageMode},
    csv_source::CsvSource,
    repository::{InMemoryItemRepository, PgItemRepository, RepositoryError}
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error)
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("failed to load .env: {e}");
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "items_api=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "configuration loaded");

    match run(config).await {
        Ok(()) => {
            tracing::info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), StartupError> {
    let csv = CsvSource::new(&config.csv_path);

    match config.storage {
        StorageMode::Postgres => {
            let repo = PgItemRepository::connect(&config.database).await?;
            tracing::info!(max_connections = config.database.max_connections, "database pool opened");
            if config.database.run_migrations {
                repo.migrate().await?;
                tracing::info!("migrations applied");
            }

            let result = serve(&config, api::router(AppState::new(repo.clone(), csv))).await;
            repo.close().await;
            tracing::info!("database pool closed");
            result
        }
        StorageMode::InMemory => {
            tracing::warn!("using in-memory storage, items are lost on exit");
            serve(&config, api::router(AppState::new(InMemoryItemRepository::new(), csv))).await
        }
    }
}

async fn serve(config: &Config, app: Router) -> Result<(), StartupError> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(address = %config.bind_addr(), "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
