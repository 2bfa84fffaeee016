//! Authorization service - save, remove and token lookup

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{Authorization, OpenEnum, TokenKind};
use crate::error::MappingError;
use crate::mapping::{AuthorizationRow, AuthorizationRowMapper, TokenColumn};
use crate::repository::{AuthorizationStore, ClientResolver, RepoResult};

/// Saves authorizations and finds them by id or by any token they carry.
pub struct AuthorizationService {
    store: Arc<dyn AuthorizationStore>,
    clients: Arc<dyn ClientResolver>,
}

impl AuthorizationService {
    pub fn new(store: Arc<dyn AuthorizationStore>, clients: Arc<dyn ClientResolver>) -> Self {
        Self { store, clients }
    }

    /// Insert or replace an authorization.
    pub async fn save(&self, authorization: &Authorization) -> RepoResult<()> {
        let row = AuthorizationRowMapper::to_row(authorization)?;
        self.store.put(&row).await?;
        debug!(
            authorization_id = %authorization.id,
            registered_client_id = %authorization.registered_client_id,
            grant_type = %authorization.grant_type,
            "Saved authorization"
        );
        Ok(())
    }

    pub async fn remove(&self, authorization: &Authorization) -> RepoResult<()> {
        self.store.delete(&authorization.id).await?;
        debug!(authorization_id = %authorization.id, "Removed authorization");
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Authorization>> {
        anyhow::ensure!(!id.is_empty(), "id cannot be empty");
        match self.store.get(id).await? {
            Some(row) => Ok(Some(self.materialize(row).await?)),
            None => Ok(None),
        }
    }

    /// Find the authorization carrying `token`.
    ///
    /// With a hint only that kind's column is searched; a hint naming no
    /// column finds nothing. Without one every token-bearing column is
    /// searched. More than one matching row is an
    /// [`MappingError::AmbiguousTokenLookup`].
    pub async fn find_by_token(
        &self,
        token: &str,
        kind: Option<&TokenKind>,
    ) -> RepoResult<Option<Authorization>> {
        anyhow::ensure!(!token.is_empty(), "token cannot be empty");

        let rows = match kind {
            Some(kind) => match TokenColumn::for_kind(kind) {
                Some(column) => self.store.find_by_token_column(column, token).await?,
                None => {
                    debug!(token_kind = %kind, "Token kind names no column");
                    return Ok(None);
                }
            },
            None => self.store.find_by_any_token(token).await?,
        };

        let mut rows = rows.into_iter();
        let Some(row) = rows.next() else {
            return Ok(None);
        };
        let extra = rows.count();
        if extra > 0 {
            let matches = extra + 1;
            error!(
                matches,
                token_kind = kind.map_or("<any>", |k| k.as_str()),
                "Token lookup matched more than one authorization"
            );
            return Err(MappingError::AmbiguousTokenLookup { matches }.into());
        }

        Ok(Some(self.materialize(row).await?))
    }

    async fn materialize(&self, row: AuthorizationRow) -> RepoResult<Authorization> {
        AuthorizationRowMapper::from_row(row, self.clients.as_ref()).await
    }
}
