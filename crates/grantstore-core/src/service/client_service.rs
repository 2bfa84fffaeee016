//! Registered client service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::RegisteredClient;
use crate::error::MappingError;
use crate::mapping::ClientRowMapper;
use crate::repository::{ClientResolver, ClientStore, RepoResult};

/// Saves and loads registered clients.
///
/// Also serves as the [`ClientResolver`] for the authorization and consent
/// services.
pub struct RegisteredClientService {
    store: Arc<dyn ClientStore>,
}

impl RegisteredClientService {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }

    /// Insert or replace a client. Invalid registrations are never written.
    pub async fn save(&self, client: &RegisteredClient) -> RepoResult<()> {
        client
            .validate()
            .map_err(|reason| MappingError::invalid_registration(&client.id, reason))?;

        let row = ClientRowMapper::to_row(client)?;
        self.store.put(&row).await?;
        debug!(
            registered_client_id = %client.id,
            client_id = %client.client_id,
            "Saved registered client"
        );
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> RepoResult<()> {
        self.store.delete(id).await?;
        debug!(registered_client_id = %id, "Removed registered client");
        Ok(())
    }

    /// Find by stable id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RegisteredClient>> {
        anyhow::ensure!(!id.is_empty(), "id cannot be empty");
        match self.store.get(id).await? {
            Some(row) => Ok(Some(ClientRowMapper::from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Find by the external `client_id`
    pub async fn find_by_client_id(&self, client_id: &str) -> RepoResult<Option<RegisteredClient>> {
        anyhow::ensure!(!client_id.is_empty(), "client_id cannot be empty");
        match self.store.get_by_client_id(client_id).await? {
            Some(row) => Ok(Some(ClientRowMapper::from_row(row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ClientResolver for RegisteredClientService {
    async fn resolve(&self, registered_client_id: &str) -> RepoResult<Option<RegisteredClient>> {
        self.find_by_id(registered_client_id).await
    }
}
