//! Repository traits for row storage
//!
//! These traits define the interface for row storage without specifying the
//! implementation (SQLite, in-memory, etc.). Stores deal in rows only; the
//! services in `crate::service` turn rows into aggregates.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::RegisteredClient;
use crate::mapping::{AuthorizationRow, ClientRow, ConsentRow, TokenColumn};

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Registered client row store
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Get a row by its stable id
    async fn get(&self, id: &str) -> RepoResult<Option<ClientRow>>;

    /// Get a row by its external client_id
    async fn get_by_client_id(&self, client_id: &str) -> RepoResult<Option<ClientRow>>;

    /// Insert or replace a row
    async fn put(&self, row: &ClientRow) -> RepoResult<()>;

    /// Delete a row by id
    async fn delete(&self, id: &str) -> RepoResult<()>;
}

/// Authorization row store
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    /// Get a row by id
    async fn get(&self, id: &str) -> RepoResult<Option<AuthorizationRow>>;

    /// Every row whose `column` holds `value`.
    ///
    /// Returns all matches so callers can detect broken uniqueness.
    async fn find_by_token_column(
        &self,
        column: TokenColumn,
        value: &str,
    ) -> RepoResult<Vec<AuthorizationRow>>;

    /// Every row holding `value` in any of the seven token-bearing columns.
    ///
    /// The default unions the per-column lookups, keeping one copy per row id.
    async fn find_by_any_token(&self, value: &str) -> RepoResult<Vec<AuthorizationRow>> {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for column in TokenColumn::ALL {
            for row in self.find_by_token_column(column, value).await? {
                if seen.insert(row.id.clone()) {
                    rows.push(row);
                }
            }
        }
        Ok(rows)
    }

    /// Insert or replace a row
    async fn put(&self, row: &AuthorizationRow) -> RepoResult<()>;

    /// Delete a row by id
    async fn delete(&self, id: &str) -> RepoResult<()>;
}

/// Consent row store, keyed by `(registered_client_id, principal_name)`
#[async_trait]
pub trait ConsentStore: Send + Sync {
    async fn get(
        &self,
        registered_client_id: &str,
        principal_name: &str,
    ) -> RepoResult<Option<ConsentRow>>;

    /// Insert or replace a row
    async fn put(&self, row: &ConsentRow) -> RepoResult<()>;

    async fn delete(&self, registered_client_id: &str, principal_name: &str) -> RepoResult<()>;
}

/// Resolves a registered client by its stable id.
///
/// Used when materializing authorizations and consents, which only hold the
/// client's id.
#[async_trait]
pub trait ClientResolver: Send + Sync {
    async fn resolve(&self, registered_client_id: &str) -> RepoResult<Option<RegisteredClient>>;
}
