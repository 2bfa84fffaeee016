//! SQLite implementation of AuthorizationStore.
//!
//! Token lookups return every matching row; deciding what more than one
//! match means is left to the caller.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use grantstore_core::mapping::{AuthorizationRow, TokenColumn, TokenColumns};
use grantstore_core::AuthorizationStore;
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use tracing::debug;

use super::{format_timestamp, read_timestamp};
use crate::Database;

/// SQLite-backed authorization store.
pub struct SqliteAuthorizationStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteAuthorizationStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Column order expected by `map_row`.
    ///
    /// 0-6: id, registered_client_id, principal_name, authorization_grant_type,
    /// authorized_scopes, attributes, state; then per slot value, issued_at,
    /// expires_at, metadata starting at 7 (authorization code), 11 (access
    /// token, plus type 15 and scopes 16), 17 (refresh token), 21 (ID token,
    /// plus claims 25), 26 (user code) and 30 (device code).
    const COLUMNS: &'static str = "id, registered_client_id, principal_name,
         authorization_grant_type, authorized_scopes, attributes, state,
         authorization_code_value, authorization_code_issued_at,
         authorization_code_expires_at, authorization_code_metadata,
         access_token_value, access_token_issued_at, access_token_expires_at,
         access_token_metadata, access_token_type, access_token_scopes,
         refresh_token_value, refresh_token_issued_at, refresh_token_expires_at,
         refresh_token_metadata,
         oidc_id_token_value, oidc_id_token_issued_at, oidc_id_token_expires_at,
         oidc_id_token_metadata, oidc_id_token_claims,
         user_code_value, user_code_issued_at, user_code_expires_at, user_code_metadata,
         device_code_value, device_code_issued_at, device_code_expires_at,
         device_code_metadata";

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuthorizationRow> {
        Ok(AuthorizationRow {
            id: row.get(0)?,
            registered_client_id: row.get(1)?,
            principal_name: row.get(2)?,
            authorization_grant_type: row.get(3)?,
            authorized_scopes: row.get(4)?,
            attributes: row.get(5)?,
            state: row.get(6)?,
            authorization_code: Self::token_columns(row, 7)?,
            access_token: Self::token_columns(row, 11)?,
            access_token_type: row.get(15)?,
            access_token_scopes: row.get(16)?,
            refresh_token: Self::token_columns(row, 17)?,
            oidc_id_token: Self::token_columns(row, 21)?,
            oidc_id_token_claims: row.get(25)?,
            user_code: Self::token_columns(row, 26)?,
            device_code: Self::token_columns(row, 30)?,
        })
    }

    fn token_columns(row: &rusqlite::Row<'_>, start: usize) -> rusqlite::Result<TokenColumns> {
        Ok(TokenColumns {
            value: row.get(start)?,
            issued_at: read_timestamp(row, start + 1)?,
            expires_at: read_timestamp(row, start + 2)?,
            metadata: row.get(start + 3)?,
        })
    }

    /// Rows matching `filter`, which binds `value` as `?1`.
    async fn select(&self, filter: &str, value: &str) -> Result<Vec<AuthorizationRow>> {
        let db = self.db.lock().await;
        let conn = db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM authorizations WHERE {} ORDER BY id",
            Self::COLUMNS,
            filter
        ))?;
        let rows = stmt
            .query_map(params![value], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

#[async_trait]
impl AuthorizationStore for SqliteAuthorizationStore {
    async fn get(&self, id: &str) -> Result<Option<AuthorizationRow>> {
        let db = self.db.lock().await;
        let row = db
            .connection()
            .query_row(
                &format!("SELECT {} FROM authorizations WHERE id = ?1", Self::COLUMNS),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    async fn find_by_token_column(
        &self,
        column: TokenColumn,
        value: &str,
    ) -> Result<Vec<AuthorizationRow>> {
        let rows = self
            .select(&format!("{} = ?1", column.column_name()), value)
            .await?;
        debug!(
            column = column.column_name(),
            matches = rows.len(),
            "Searched authorizations by token column"
        );
        Ok(rows)
    }

    /// One query across all seven token-bearing columns.
    async fn find_by_any_token(&self, value: &str) -> Result<Vec<AuthorizationRow>> {
        let filter = TokenColumn::ALL
            .iter()
            .map(|c| format!("{} = ?1", c.column_name()))
            .collect::<Vec<_>>()
            .join(" OR ");
        let rows = self.select(&filter, value).await?;
        debug!(matches = rows.len(), "Searched authorizations by any token");
        Ok(rows)
    }

    async fn put(&self, row: &AuthorizationRow) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            &format!(
                "INSERT INTO authorizations ({})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                         ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
                         ?33, ?34)
                 ON CONFLICT(id) DO UPDATE SET
                    registered_client_id = excluded.registered_client_id,
                    principal_name = excluded.principal_name,
                    authorization_grant_type = excluded.authorization_grant_type,
                    authorized_scopes = excluded.authorized_scopes,
                    attributes = excluded.attributes,
                    state = excluded.state,
                    authorization_code_value = excluded.authorization_code_value,
                    authorization_code_issued_at = excluded.authorization_code_issued_at,
                    authorization_code_expires_at = excluded.authorization_code_expires_at,
                    authorization_code_metadata = excluded.authorization_code_metadata,
                    access_token_value = excluded.access_token_value,
                    access_token_issued_at = excluded.access_token_issued_at,
                    access_token_expires_at = excluded.access_token_expires_at,
                    access_token_metadata = excluded.access_token_metadata,
                    access_token_type = excluded.access_token_type,
                    access_token_scopes = excluded.access_token_scopes,
                    refresh_token_value = excluded.refresh_token_value,
                    refresh_token_issued_at = excluded.refresh_token_issued_at,
                    refresh_token_expires_at = excluded.refresh_token_expires_at,
                    refresh_token_metadata = excluded.refresh_token_metadata,
                    oidc_id_token_value = excluded.oidc_id_token_value,
                    oidc_id_token_issued_at = excluded.oidc_id_token_issued_at,
                    oidc_id_token_expires_at = excluded.oidc_id_token_expires_at,
                    oidc_id_token_metadata = excluded.oidc_id_token_metadata,
                    oidc_id_token_claims = excluded.oidc_id_token_claims,
                    user_code_value = excluded.user_code_value,
                    user_code_issued_at = excluded.user_code_issued_at,
                    user_code_expires_at = excluded.user_code_expires_at,
                    user_code_metadata = excluded.user_code_metadata,
                    device_code_value = excluded.device_code_value,
                    device_code_issued_at = excluded.device_code_issued_at,
                    device_code_expires_at = excluded.device_code_expires_at,
                    device_code_metadata = excluded.device_code_metadata",
                Self::COLUMNS
            ),
            params![
                row.id,
                row.registered_client_id,
                row.principal_name,
                row.authorization_grant_type,
                row.authorized_scopes,
                row.attributes,
                row.state,
                row.authorization_code.value,
                format_timestamp(row.authorization_code.issued_at)?,
                format_timestamp(row.authorization_code.expires_at)?,
                row.authorization_code.metadata,
                row.access_token.value,
                format_timestamp(row.access_token.issued_at)?,
                format_timestamp(row.access_token.expires_at)?,
                row.access_token.metadata,
                row.access_token_type,
                row.access_token_scopes,
                row.refresh_token.value,
                format_timestamp(row.refresh_token.issued_at)?,
                format_timestamp(row.refresh_token.expires_at)?,
                row.refresh_token.metadata,
                row.oidc_id_token.value,
                format_timestamp(row.oidc_id_token.issued_at)?,
                format_timestamp(row.oidc_id_token.expires_at)?,
                row.oidc_id_token.metadata,
                row.oidc_id_token_claims,
                row.user_code.value,
                format_timestamp(row.user_code.issued_at)?,
                format_timestamp(row.user_code.expires_at)?,
                row.user_code.metadata,
                row.device_code.value,
                format_timestamp(row.device_code.issued_at)?,
                format_timestamp(row.device_code.expires_at)?,
                row.device_code.metadata,
            ],
        )?;
        debug!(authorization_id = %row.id, "Stored authorization row");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute("DELETE FROM authorizations WHERE id = ?1", params![id])?;
        Ok(())
    }
}
