//! Authorization <-> AuthorizationRow
//!
//! The row is denormalized: one set of columns per token slot, all nullable.
//! A slot is present on read exactly when its `value` column is non-null;
//! the timestamps may still be null (user codes often carry no expiry).
//!
//! `state` is written twice: inside the attributes JSON, and into its own
//! column so it can be searched. On read the attributes JSON is decoded first
//! and the column value is then re-applied on top of it.

use super::codec::{join_set, split_set, AttributeCodec};
use super::rows::{AuthorizationRow, TokenColumns};
use crate::domain::{
    AccessToken, AccessTokenType, Authorization, AuthorizationGrantType, IdToken, OpenEnum,
    RegisteredClient, Token, STATE_ATTRIBUTE,
};
use crate::error::MappingError;
use crate::repository::{ClientResolver, RepoResult};

/// Converts authorizations to and from their row.
pub struct AuthorizationRowMapper;

impl AuthorizationRowMapper {
    pub fn to_row(authorization: &Authorization) -> Result<AuthorizationRow, MappingError> {
        let access_token = authorization.access_token.as_ref();
        let id_token = authorization.id_token.as_ref();

        Ok(AuthorizationRow {
            id: authorization.id.clone(),
            registered_client_id: authorization.registered_client_id.clone(),
            principal_name: authorization.principal_name.clone(),
            authorization_grant_type: authorization.grant_type.as_str().to_string(),
            authorized_scopes: Some(join_set(&authorization.authorized_scopes)),
            attributes: Some(AttributeCodec::encode("attributes", &authorization.attributes)?),
            state: authorization.state().map(str::to_string),

            authorization_code: token_columns(
                "authorization_code_metadata",
                authorization.authorization_code.as_ref(),
            )?,

            access_token: token_columns("access_token_metadata", access_token.map(|t| &t.token))?,
            access_token_type: access_token.map(|t| t.token_type.as_str().to_string()),
            access_token_scopes: access_token.map(|t| join_set(&t.scopes)),

            refresh_token: token_columns(
                "refresh_token_metadata",
                authorization.refresh_token.as_ref(),
            )?,

            oidc_id_token: token_columns("oidc_id_token_metadata", id_token.map(|t| &t.token))?,
            oidc_id_token_claims: id_token
                .map(|t| AttributeCodec::encode("oidc_id_token_claims", &t.claims))
                .transpose()?,

            user_code: token_columns("user_code_metadata", authorization.user_code.as_ref())?,

            device_code: token_columns("device_code_metadata", authorization.device_code.as_ref())?,
        })
    }

    /// Rebuild an authorization, resolving its client through `resolver`.
    ///
    /// Fails with [`MappingError::DanglingReference`] when the client is gone.
    /// Resolver I/O errors propagate as-is.
    pub async fn from_row<R>(row: AuthorizationRow, resolver: &R) -> RepoResult<Authorization>
    where
        R: ClientResolver + ?Sized,
    {
        let client = resolver.resolve(&row.registered_client_id).await?;
        Ok(Self::from_row_with_client(row, client.as_ref())?)
    }

    /// Rebuild an authorization given the already-resolved client.
    pub fn from_row_with_client(
        row: AuthorizationRow,
        client: Option<&RegisteredClient>,
    ) -> Result<Authorization, MappingError> {
        if client.is_none() {
            return Err(MappingError::dangling_reference(row.registered_client_id));
        }

        let mut attributes = AttributeCodec::decode("attributes", row.attributes.as_deref())?;
        if let Some(state) = row.state {
            attributes.insert(STATE_ATTRIBUTE.to_string(), state.into());
        }

        let access_token = match token_from_columns("access_token_metadata", row.access_token)? {
            Some(token) => Some(AccessToken {
                token,
                token_type: row
                    .access_token_type
                    .as_deref()
                    .map(AccessTokenType::resolve)
                    .unwrap_or_default(),
                scopes: split_set(row.access_token_scopes.as_deref()),
            }),
            None => None,
        };

        let id_token = match token_from_columns("oidc_id_token_metadata", row.oidc_id_token)? {
            Some(token) => Some(IdToken {
                token,
                claims: AttributeCodec::decode(
                    "oidc_id_token_claims",
                    row.oidc_id_token_claims.as_deref(),
                )?,
            }),
            None => None,
        };

        Ok(Authorization {
            id: row.id,
            registered_client_id: row.registered_client_id,
            principal_name: row.principal_name,
            grant_type: AuthorizationGrantType::resolve(&row.authorization_grant_type),
            authorized_scopes: split_set(row.authorized_scopes.as_deref()),
            attributes,
            authorization_code: token_from_columns(
                "authorization_code_metadata",
                row.authorization_code,
            )?,
            access_token,
            refresh_token: token_from_columns("refresh_token_metadata", row.refresh_token)?,
            id_token,
            user_code: token_from_columns("user_code_metadata", row.user_code)?,
            device_code: token_from_columns("device_code_metadata", row.device_code)?,
        })
    }
}

fn token_columns(
    metadata_column: &'static str,
    token: Option<&Token>,
) -> Result<TokenColumns, MappingError> {
    let Some(token) = token else {
        return Ok(TokenColumns::default());
    };
    Ok(TokenColumns {
        value: Some(token.value.clone()),
        issued_at: token.issued_at,
        expires_at: token.expires_at,
        metadata: Some(AttributeCodec::encode(metadata_column, &token.metadata)?),
    })
}

fn token_from_columns(
    metadata_column: &'static str,
    columns: TokenColumns,
) -> Result<Option<Token>, MappingError> {
    let Some(value) = columns.value else {
        return Ok(None);
    };
    Ok(Some(Token {
        value,
        issued_at: columns.issued_at,
        expires_at: columns.expires_at,
        metadata: AttributeCodec::decode(metadata_column, columns.metadata.as_deref())?,
    }))
}
