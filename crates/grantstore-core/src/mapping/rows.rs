//! Flat relational row shapes
//!
//! One struct per table. Sets are comma-joined strings, maps are serialized
//! JSON text, timestamps are nullable. Nothing here is validated; that is the
//! mappers' job.

use chrono::{DateTime, Utc};

use crate::domain::{OpenEnum, TokenKind};

/// Row of the `registered_clients` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientRow {
    pub id: String,
    pub client_id: String,
    pub client_id_issued_at: Option<DateTime<Utc>>,
    pub client_secret: Option<String>,
    pub client_secret_expires_at: Option<DateTime<Utc>>,
    pub client_name: String,
    pub client_authentication_methods: String,
    pub authorization_grant_types: String,
    pub redirect_uris: Option<String>,
    pub post_logout_redirect_uris: Option<String>,
    pub scopes: String,
    pub client_settings: String,
    pub token_settings: String,
}

/// The four columns every token slot owns.
///
/// All four are null when the slot is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenColumns {
    pub value: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: Option<String>,
}

/// Row of the `authorizations` table: one grant, six token slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorizationRow {
    pub id: String,
    pub registered_client_id: String,
    pub principal_name: String,
    pub authorization_grant_type: String,
    pub authorized_scopes: Option<String>,
    pub attributes: Option<String>,
    /// Copy of the `state` attribute, kept in its own column for lookup
    pub state: Option<String>,

    pub authorization_code: TokenColumns,

    pub access_token: TokenColumns,
    pub access_token_type: Option<String>,
    pub access_token_scopes: Option<String>,

    pub refresh_token: TokenColumns,

    pub oidc_id_token: TokenColumns,
    pub oidc_id_token_claims: Option<String>,

    pub user_code: TokenColumns,

    pub device_code: TokenColumns,
}

/// Row of the `authorization_consents` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsentRow {
    pub registered_client_id: String,
    pub principal_name: String,
    pub authorities: String,
}

/// The seven value-bearing columns a token lookup can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenColumn {
    State,
    AuthorizationCode,
    AccessToken,
    RefreshToken,
    OidcIdToken,
    UserCode,
    DeviceCode,
}

impl TokenColumn {
    /// Every searchable column, in lookup order.
    pub const ALL: [TokenColumn; 7] = [
        TokenColumn::State,
        TokenColumn::AuthorizationCode,
        TokenColumn::AccessToken,
        TokenColumn::RefreshToken,
        TokenColumn::OidcIdToken,
        TokenColumn::UserCode,
        TokenColumn::DeviceCode,
    ];

    /// SQL column name.
    pub fn column_name(&self) -> &'static str {
        match self {
            TokenColumn::State => "state",
            TokenColumn::AuthorizationCode => "authorization_code_value",
            TokenColumn::AccessToken => "access_token_value",
            TokenColumn::RefreshToken => "refresh_token_value",
            TokenColumn::OidcIdToken => "oidc_id_token_value",
            TokenColumn::UserCode => "user_code_value",
            TokenColumn::DeviceCode => "device_code_value",
        }
    }

    /// The column searched for a token-kind hint. Custom kinds name no column.
    pub fn for_kind(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::State => Some(TokenColumn::State),
            TokenKind::Code => Some(TokenColumn::AuthorizationCode),
            TokenKind::AccessToken => Some(TokenColumn::AccessToken),
            TokenKind::RefreshToken => Some(TokenColumn::RefreshToken),
            TokenKind::IdToken => Some(TokenColumn::OidcIdToken),
            TokenKind::UserCode => Some(TokenColumn::UserCode),
            TokenKind::DeviceCode => Some(TokenColumn::DeviceCode),
            // a custom hint may still spell a well-known name
            TokenKind::Custom(name) => match TokenKind::resolve(name) {
                TokenKind::Custom(_) => None,
                known => Self::for_kind(&known),
            },
        }
    }

    /// This column's value in a row.
    pub fn value_in<'a>(&self, row: &'a AuthorizationRow) -> Option<&'a str> {
        let value = match self {
            TokenColumn::State => &row.state,
            TokenColumn::AuthorizationCode => &row.authorization_code.value,
            TokenColumn::AccessToken => &row.access_token.value,
            TokenColumn::RefreshToken => &row.refresh_token.value,
            TokenColumn::OidcIdToken => &row.oidc_id_token.value,
            TokenColumn::UserCode => &row.user_code.value,
            TokenColumn::DeviceCode => &row.device_code.value,
        };
        value.as_deref()
    }
}

impl AuthorizationRow {
    /// Whether any of the seven token-bearing columns holds `value`.
    pub fn contains_token(&self, value: &str) -> bool {
        TokenColumn::ALL
            .iter()
            .any(|column| column.value_in(self) == Some(value))
    }
}
