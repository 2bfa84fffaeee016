//! Grantstore Storage Layer
//!
//! SQLite implementations of the grantstore row stores.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │   Services (RegisteredClientService, ...)            │
//! ├──────────────────────────────────────────────────────┤
//! │   Store Traits                                       │
//! │   (ClientStore, AuthorizationStore, ConsentStore)    │
//! ├──────────────────────────────────────────────────────┤
//! │   SQLite Implementations                             │
//! │   (SqliteClientStore, SqliteAuthorizationStore, ...) │
//! ├──────────────────────────────────────────────────────┤
//! │   Database (SQLite + migrations)                     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use grantstore_core::{AuthorizationService, RegisteredClientService};
//! use grantstore_storage::{
//!     Database, SqliteAuthorizationStore, SqliteClientStore, StorageConfig,
//! };
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let config = StorageConfig::from_env()?;
//! let db = Arc::new(Mutex::new(Database::open(&config.database_path)?));
//!
//! let clients = Arc::new(RegisteredClientService::new(Arc::new(
//!     SqliteClientStore::new(db.clone()),
//! )));
//! let authorizations = AuthorizationService::new(
//!     Arc::new(SqliteAuthorizationStore::new(db.clone())),
//!     clients.clone(),
//! );
//! ```

use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

mod database;
mod repositories;

pub use database::Database;
pub use repositories::*;

/// Default database file name.
pub const DATABASE_FILE: &str = "grantstore.db";

/// Environment variable overriding the database location.
pub const DATABASE_PATH_ENV: &str = "GRANTSTORE_DATABASE_PATH";

/// Get the default database path for the current platform.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("grantstore").join(DATABASE_FILE))
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

impl StorageConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Load from the environment, reading a `.env` file first if one exists.
    ///
    /// `GRANTSTORE_DATABASE_PATH` wins over the platform default.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = ?path, "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_path = match lookup(DATABASE_PATH_ENV).filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()
                .context("No platform data directory; set GRANTSTORE_DATABASE_PATH")?,
        };
        Ok(Self { database_path })
    }
}
