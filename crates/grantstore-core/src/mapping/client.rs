//! RegisteredClient <-> ClientRow

use indexmap::IndexSet;

use super::codec::{join_set, split_set, AttributeCodec};
use super::rows::ClientRow;
use crate::domain::{
    AuthorizationGrantType, ClientAuthenticationMethod, ClientSettings, OpenEnum,
    RegisteredClient, TokenSettings,
};
use crate::error::MappingError;

/// Converts registered clients to and from their row.
pub struct ClientRowMapper;

impl ClientRowMapper {
    pub fn to_row(client: &RegisteredClient) -> Result<ClientRow, MappingError> {
        Ok(ClientRow {
            id: client.id.clone(),
            client_id: client.client_id.clone(),
            client_id_issued_at: client.client_id_issued_at,
            client_secret: client.client_secret.clone(),
            client_secret_expires_at: client.client_secret_expires_at,
            client_name: client.client_name.clone(),
            client_authentication_methods: join_set(
                client.authentication_methods.iter().map(|m| m.as_str()),
            ),
            authorization_grant_types: join_set(client.grant_types.iter().map(|g| g.as_str())),
            redirect_uris: Some(join_set(&client.redirect_uris)),
            post_logout_redirect_uris: Some(join_set(&client.post_logout_redirect_uris)),
            scopes: join_set(&client.scopes),
            client_settings: AttributeCodec::encode(
                "client_settings",
                client.client_settings.settings(),
            )?,
            token_settings: AttributeCodec::encode(
                "token_settings",
                client.token_settings.settings(),
            )?,
        })
    }

    /// Rebuild a client, rejecting rows whose required sets are empty.
    pub fn from_row(row: ClientRow) -> Result<RegisteredClient, MappingError> {
        let authentication_methods: IndexSet<ClientAuthenticationMethod> =
            split_set(Some(&row.client_authentication_methods))
                .iter()
                .map(|m| ClientAuthenticationMethod::resolve(m))
                .collect();
        if authentication_methods.is_empty() {
            return Err(MappingError::client_mapping(row.id, "client_authentication_methods"));
        }

        let grant_types: IndexSet<AuthorizationGrantType> =
            split_set(Some(&row.authorization_grant_types))
                .iter()
                .map(|g| AuthorizationGrantType::resolve(g))
                .collect();
        if grant_types.is_empty() {
            return Err(MappingError::client_mapping(row.id, "authorization_grant_types"));
        }

        let scopes = split_set(Some(&row.scopes));
        if scopes.is_empty() {
            return Err(MappingError::client_mapping(row.id, "scopes"));
        }

        let client_settings = AttributeCodec::decode("client_settings", Some(&row.client_settings))?;
        let token_settings = AttributeCodec::decode("token_settings", Some(&row.token_settings))?;

        Ok(RegisteredClient {
            id: row.id,
            client_id: row.client_id,
            client_id_issued_at: row.client_id_issued_at,
            client_secret: row.client_secret,
            client_secret_expires_at: row.client_secret_expires_at,
            client_name: row.client_name,
            authentication_methods,
            grant_types,
            redirect_uris: split_set(row.redirect_uris.as_deref()),
            post_logout_redirect_uris: split_set(row.post_logout_redirect_uris.as_deref()),
            scopes,
            client_settings: ClientSettings::from_map(client_settings),
            token_settings: TokenSettings::from_map(token_settings),
        })
    }
}
