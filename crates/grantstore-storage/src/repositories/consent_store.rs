//! SQLite implementation of ConsentStore.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use grantstore_core::mapping::ConsentRow;
use grantstore_core::ConsentStore;
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use tracing::debug;

use crate::Database;

/// SQLite-backed consent store.
pub struct SqliteConsentStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteConsentStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConsentStore for SqliteConsentStore {
    async fn get(
        &self,
        registered_client_id: &str,
        principal_name: &str,
    ) -> Result<Option<ConsentRow>> {
        let db = self.db.lock().await;
        let row = db
            .connection()
            .query_row(
                "SELECT registered_client_id, principal_name, authorities
                 FROM authorization_consents
                 WHERE registered_client_id = ?1 AND principal_name = ?2",
                params![registered_client_id, principal_name],
                |row| {
                    Ok(ConsentRow {
                        registered_client_id: row.get(0)?,
                        principal_name: row.get(1)?,
                        authorities: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    async fn put(&self, row: &ConsentRow) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            "INSERT INTO authorization_consents (registered_client_id, principal_name, authorities)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(registered_client_id, principal_name) DO UPDATE SET authorities = ?3",
            params![row.registered_client_id, row.principal_name, row.authorities],
        )?;
        debug!(
            registered_client_id = %row.registered_client_id,
            principal = %row.principal_name,
            "Stored consent row"
        );
        Ok(())
    }

    async fn delete(&self, registered_client_id: &str, principal_name: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            "DELETE FROM authorization_consents WHERE registered_client_id = ?1 AND principal_name = ?2",
            params![registered_client_id, principal_name],
        )?;
        Ok(())
    }
}
