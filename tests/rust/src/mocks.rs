//! Mock store implementations for testing
//!
//! In-memory implementations of the store and resolver traits for fast,
//! isolated tests. Rows are stored verbatim, so tests can plant corrupted or
//! duplicate data that the services would never write themselves.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use grantstore_core::{
    domain::RegisteredClient,
    mapping::{AuthorizationRow, ClientRow, ConsentRow, TokenColumn},
    repository::{AuthorizationStore, ClientResolver, ClientStore, ConsentStore, RepoResult},
};

// ============================================================================
// MockClientStore
// ============================================================================

#[derive(Default)]
pub struct MockClientStore {
    rows: RwLock<HashMap<String, ClientRow>>,
}

impl MockClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(self, row: ClientRow) -> Self {
        self.rows.write().unwrap().insert(row.id.clone(), row);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClientStore for MockClientStore {
    async fn get(&self, id: &str) -> RepoResult<Option<ClientRow>> {
        Ok(self.rows.read().unwrap().get(id).cloned())
    }

    async fn get_by_client_id(&self, client_id: &str) -> RepoResult<Option<ClientRow>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .find(|r| r.client_id == client_id)
            .cloned())
    }

    async fn put(&self, row: &ClientRow) -> RepoResult<()> {
        self.rows.write().unwrap().insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        self.rows.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// MockAuthorizationStore
// ============================================================================

/// Uses the trait's default `find_by_any_token`, i.e. the per-column union.
#[derive(Default)]
pub struct MockAuthorizationStore {
    rows: RwLock<HashMap<String, AuthorizationRow>>,
    column_queries: AtomicUsize,
}

impl MockAuthorizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(self, row: AuthorizationRow) -> Self {
        self.rows.write().unwrap().insert(row.id.clone(), row);
        self
    }

    pub fn row(&self, id: &str) -> Option<AuthorizationRow> {
        self.rows.read().unwrap().get(id).cloned()
    }

    /// How many single-column lookups have been served
    pub fn column_queries(&self) -> usize {
        self.column_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationStore for MockAuthorizationStore {
    async fn get(&self, id: &str) -> RepoResult<Option<AuthorizationRow>> {
        Ok(self.row(id))
    }

    async fn find_by_token_column(
        &self,
        column: TokenColumn,
        value: &str,
    ) -> RepoResult<Vec<AuthorizationRow>> {
        self.column_queries.fetch_add(1, Ordering::SeqCst);
        let mut rows: Vec<AuthorizationRow> = self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|r| column.value_in(r) == Some(value))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn put(&self, row: &AuthorizationRow) -> RepoResult<()> {
        self.rows.write().unwrap().insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        self.rows.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// MockConsentStore
// ============================================================================

#[derive(Default)]
pub struct MockConsentStore {
    rows: RwLock<HashMap<(String, String), ConsentRow>>,
}

impl MockConsentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(self, row: ConsentRow) -> Self {
        self.rows.write().unwrap().insert(
            (row.registered_client_id.clone(), row.principal_name.clone()),
            row,
        );
        self
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConsentStore for MockConsentStore {
    async fn get(
        &self,
        registered_client_id: &str,
        principal_name: &str,
    ) -> RepoResult<Option<ConsentRow>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .get(&(registered_client_id.to_string(), principal_name.to_string()))
            .cloned())
    }

    async fn put(&self, row: &ConsentRow) -> RepoResult<()> {
        self.rows.write().unwrap().insert(
            (row.registered_client_id.clone(), row.principal_name.clone()),
            row.clone(),
        );
        Ok(())
    }

    async fn delete(&self, registered_client_id: &str, principal_name: &str) -> RepoResult<()> {
        self.rows
            .write()
            .unwrap()
            .remove(&(registered_client_id.to_string(), principal_name.to_string()));
        Ok(())
    }
}

// ============================================================================
// MockClientResolver
// ============================================================================

/// Resolves from a fixed set of clients, keyed by stable id.
#[derive(Default)]
pub struct MockClientResolver {
    clients: RwLock<HashMap<String, RegisteredClient>>,
}

impl MockClientResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(self, client: RegisteredClient) -> Self {
        self.clients
            .write()
            .unwrap()
            .insert(client.id.clone(), client);
        self
    }
}

#[async_trait]
impl ClientResolver for MockClientResolver {
    async fn resolve(&self, registered_client_id: &str) -> RepoResult<Option<RegisteredClient>> {
        Ok(self.clients.read().unwrap().get(registered_client_id).cloned())
    }
}

/// A resolver whose backing store is unavailable.
pub struct FailingClientResolver;

#[async_trait]
impl ClientResolver for FailingClientResolver {
    async fn resolve(&self, _registered_client_id: &str) -> RepoResult<Option<RegisteredClient>> {
        anyhow::bail!("client store unavailable")
    }
}

// ============================================================================
// MockStores
// ============================================================================

/// Convenience struct holding all mock stores
pub struct MockStores {
    pub clients: Arc<MockClientStore>,
    pub authorizations: Arc<MockAuthorizationStore>,
    pub consents: Arc<MockConsentStore>,
}

impl MockStores {
    /// Create a fresh set of empty mock stores
    pub fn new() -> Self {
        Self {
            clients: Arc::new(MockClientStore::new()),
            authorizations: Arc::new(MockAuthorizationStore::new()),
            consents: Arc::new(MockConsentStore::new()),
        }
    }
}

impl Default for MockStores {
    fn default() -> Self {
        Self::new()
    }
}
