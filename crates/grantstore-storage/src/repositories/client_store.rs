//! SQLite implementation of ClientStore.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use grantstore_core::mapping::ClientRow;
use grantstore_core::ClientStore;
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use tracing::debug;

use super::{format_timestamp, read_timestamp};
use crate::Database;

/// SQLite-backed registered client store.
pub struct SqliteClientStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteClientStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Column order expected by `map_row`.
    const COLUMNS: &'static str = "id, client_id, client_id_issued_at, client_secret,
         client_secret_expires_at, client_name, client_authentication_methods,
         authorization_grant_types, redirect_uris, post_logout_redirect_uris, scopes,
         client_settings, token_settings";

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClientRow> {
        Ok(ClientRow {
            id: row.get(0)?,
            client_id: row.get(1)?,
            client_id_issued_at: read_timestamp(row, 2)?,
            client_secret: row.get(3)?,
            client_secret_expires_at: read_timestamp(row, 4)?,
            client_name: row.get(5)?,
            client_authentication_methods: row.get(6)?,
            authorization_grant_types: row.get(7)?,
            redirect_uris: row.get(8)?,
            post_logout_redirect_uris: row.get(9)?,
            scopes: row.get(10)?,
            client_settings: row.get(11)?,
            token_settings: row.get(12)?,
        })
    }

    async fn get_where(&self, column: &str, value: &str) -> Result<Option<ClientRow>> {
        let db = self.db.lock().await;
        let row = db
            .connection()
            .query_row(
                &format!(
                    "SELECT {} FROM registered_clients WHERE {} = ?1",
                    Self::COLUMNS,
                    column
                ),
                params![value],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    async fn get(&self, id: &str) -> Result<Option<ClientRow>> {
        self.get_where("id", id).await
    }

    async fn get_by_client_id(&self, client_id: &str) -> Result<Option<ClientRow>> {
        self.get_where("client_id", client_id).await
    }

    async fn put(&self, row: &ClientRow) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            "INSERT INTO registered_clients (
                id, client_id, client_id_issued_at, client_secret,
                client_secret_expires_at, client_name, client_authentication_methods,
                authorization_grant_types, redirect_uris, post_logout_redirect_uris, scopes,
                client_settings, token_settings
             )
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(id) DO UPDATE SET
                client_id = ?2, client_id_issued_at = ?3, client_secret = ?4,
                client_secret_expires_at = ?5, client_name = ?6,
                client_authentication_methods = ?7, authorization_grant_types = ?8,
                redirect_uris = ?9, post_logout_redirect_uris = ?10, scopes = ?11,
                client_settings = ?12, token_settings = ?13",
            params![
                row.id,
                row.client_id,
                format_timestamp(row.client_id_issued_at)?,
                row.client_secret,
                format_timestamp(row.client_secret_expires_at)?,
                row.client_name,
                row.client_authentication_methods,
                row.authorization_grant_types,
                row.redirect_uris,
                row.post_logout_redirect_uris,
                row.scopes,
                row.client_settings,
                row.token_settings,
            ],
        )?;
        debug!(registered_client_id = %row.id, "Stored registered client row");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute("DELETE FROM registered_clients WHERE id = ?1", params![id])?;
        Ok(())
    }
}
