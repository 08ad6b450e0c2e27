// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Process configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `HOST` | `0.0.0.0` | Bind address |
//! | `PORT` | `3000` | Listening port |
//! | `STORAGE_MODE` | `postgres` | `postgres` or `in_memory` |
//! | `DATABASE_URL` | unset | Full URL, overrides the `DB_*` parts |
//! | `DB_HOST` | `localhost` | Database host |
//! | `DB_PORT` | `5432` | Database port |
//! | `DB_USER` | `postgres` | Database user |
//! | `DB_PASS` | empty | Database password |
//! | `DB_NAME` | `items` | Database name |
//! | `DB_MAX_CONNECTIONS` | `10` | Pool size |
//! | `RUN_MIGRATIONS` | `true` | Apply `migrations/` on startup |
//! | `CSV_PATH` | `data.csv` | File served by the CSV endpoint |
//!
//! Empty or whitespace-only values count as unset.

use std::{
    env, fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr
};

/// Configuration errors, each naming the offending variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Value could not be parsed into the expected type.
    #[error("invalid value for {key}: `{value}` ({reason})")]
    Invalid {
        /// Variable name.
        key:    &'static str,
        /// Raw value.
        value:  String,
        /// Parser message.
        reason: String
    },

    /// Value is present but not valid UTF-8.
    #[error("{0} is not valid UTF-8")]
    NotUnicode(&'static str)
}

/// Where items are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// PostgreSQL through a connection pool.
    #[default]
    Postgres,
    /// Process memory; contents are lost on exit.
    InMemory
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "in_memory" | "in-memory" | "memory" => Ok(Self::InMemory),
            _ => Err("expected `postgres` or `in_memory`".to_string())
        }
    }
}

/// Database connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`; when set, the parts below are ignored.
    pub url:             Option<String>,
    /// `DB_HOST`.
    pub host:            String,
    /// `DB_PORT`.
    pub port:            u16,
    /// `DB_USER`.
    pub user:            String,
    /// `DB_PASS`.
    pub password:        String,
    /// `DB_NAME`.
    pub name:            String,
    /// `DB_MAX_CONNECTIONS`.
    pub max_connections: u32,
    /// `RUN_MIGRATIONS`.
    pub run_migrations:  bool
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `HOST`.
    pub host:     IpAddr,
    /// `PORT`.
    pub port:     u16,
    /// `STORAGE_MODE`.
    pub storage:  StorageMode,
    /// Used only in [`StorageMode::Postgres`].
    pub database: DatabaseConfig,
    /// `CSV_PATH`.
    pub csv_path: PathBuf
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key))
        })
    }

    /// Read configuration through `lookup`, which returns the raw value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigError>
    {
        let vars = Vars {
            lookup
        };

        Ok(Self {
            host:     vars.parse_or("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port:     vars.parse_or("PORT", 3000)?,
            storage:  vars.parse_or("STORAGE_MODE", StorageMode::default())?,
            database: DatabaseConfig {
                url:             vars.get("DATABASE_URL")?,
                host:            vars.get("DB_HOST")?.unwrap_or_else(|| "localhost".into()),
                port:            vars.parse_or("DB_PORT", 5432)?,
                user:            vars.get("DB_USER")?.unwrap_or_else(|| "postgres".into()),
                password:        vars.get("DB_PASS")?.unwrap_or_default(),
                name:            vars.get("DB_NAME")?.unwrap_or_else(|| "items".into()),
                max_connections: vars.parse_or("DB_MAX_CONNECTIONS", 10)?,
                run_migrations:  vars.flag_or("RUN_MIGRATIONS", true)?
            },
            csv_path: vars
                .get("CSV_PATH")?
                .map_or_else(|| PathBuf::from("data.csv"), PathBuf::from)
        })
    }

    /// Socket address to bind.
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

struct Vars<F> {
    lookup: F
}

impl<F> Vars<F>
where
    F: Fn(&'static str) -> Result<Option<String>, ConfigError>
{
    fn get(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        Ok((self.lookup)(key)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display
    {
        match self.get(key)? {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value
            }),
            None => Ok(default)
        }
    }

    fn flag_or(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key)? {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::Invalid {
                    key,
                    value,
                    reason: "expected a boolean".to_string()
                })
            },
            None => Ok(default)
        }
    }
}
