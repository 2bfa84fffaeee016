//! AuthorizationConsent <-> ConsentRow

use super::codec::{join_set, split_set};
use super::rows::ConsentRow;
use crate::domain::{AuthorizationConsent, RegisteredClient};
use crate::error::MappingError;
use crate::repository::{ClientResolver, RepoResult};

/// Converts consents to and from their row.
pub struct ConsentRowMapper;

impl ConsentRowMapper {
    pub fn to_row(consent: &AuthorizationConsent) -> ConsentRow {
        ConsentRow {
            registered_client_id: consent.registered_client_id.clone(),
            principal_name: consent.principal_name.clone(),
            authorities: join_set(&consent.authorities),
        }
    }

    /// Rebuild a consent, checking its client still exists.
    pub async fn from_row<R>(row: ConsentRow, resolver: &R) -> RepoResult<AuthorizationConsent>
    where
        R: ClientResolver + ?Sized,
    {
        let client = resolver.resolve(&row.registered_client_id).await?;
        Ok(Self::from_row_with_client(row, client.as_ref())?)
    }

    pub fn from_row_with_client(
        row: ConsentRow,
        client: Option<&RegisteredClient>,
    ) -> Result<AuthorizationConsent, MappingError> {
        if client.is_none() {
            return Err(MappingError::dangling_reference(row.registered_client_id));
        }
        Ok(AuthorizationConsent {
            authorities: split_set(Some(&row.authorities)),
            registered_client_id: row.registered_client_id,
            principal_name: row.principal_name,
        })
    }
}
