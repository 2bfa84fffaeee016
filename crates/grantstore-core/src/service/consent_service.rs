//! Authorization consent service

use std::sync::Arc;

use tracing::debug;

use crate::domain::AuthorizationConsent;
use crate::mapping::ConsentRowMapper;
use crate::repository::{ClientResolver, ConsentStore, RepoResult};

/// Saves and loads consents, one per `(registered_client_id, principal_name)`.
pub struct ConsentService {
    store: Arc<dyn ConsentStore>,
    clients: Arc<dyn ClientResolver>,
}

impl ConsentService {
    pub fn new(store: Arc<dyn ConsentStore>, clients: Arc<dyn ClientResolver>) -> Self {
        Self { store, clients }
    }

    /// Insert or replace the consent for its client/principal pair.
    pub async fn save(&self, consent: &AuthorizationConsent) -> RepoResult<()> {
        self.store.put(&ConsentRowMapper::to_row(consent)).await?;
        debug!(
            registered_client_id = %consent.registered_client_id,
            principal = %consent.principal_name,
            authorities = consent.authorities.len(),
            "Saved authorization consent"
        );
        Ok(())
    }

    pub async fn remove(&self, consent: &AuthorizationConsent) -> RepoResult<()> {
        self.store
            .delete(&consent.registered_client_id, &consent.principal_name)
            .await?;
        debug!(
            registered_client_id = %consent.registered_client_id,
            principal = %consent.principal_name,
            "Removed authorization consent"
        );
        Ok(())
    }

    /// Find the consent a principal gave a client
    pub async fn find_by_id(
        &self,
        registered_client_id: &str,
        principal_name: &str,
    ) -> RepoResult<Option<AuthorizationConsent>> {
        anyhow::ensure!(!registered_client_id.is_empty(), "registered_client_id cannot be empty");
        anyhow::ensure!(!principal_name.is_empty(), "principal_name cannot be empty");

        match self.store.get(registered_client_id, principal_name).await? {
            Some(row) => Ok(Some(
                ConsentRowMapper::from_row(row, self.clients.as_ref()).await?,
            )),
            None => Ok(None),
        }
    }
}
