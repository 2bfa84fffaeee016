//! Authorization aggregate - one OAuth2 grant and the tokens issued under it
//!
//! A grant carries up to six independent token slots. Each slot is optional
//! and holds at most one token; a record typically starts with only `state`
//! in its attributes and gains tokens as the flow progresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::{AttributeMap, AttributeValue, StringSet};
use super::open_enum::{AccessTokenType, AuthorizationGrantType};

/// Attribute key under which the authorization request `state` is kept.
pub const STATE_ATTRIBUTE: &str = "state";

/// A token value with its timestamps and free-form metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Opaque token value, unique across every slot of every record
    pub value: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: AttributeMap,
}

impl Token {
    pub fn new(
        value: impl Into<String>,
        issued_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            value: value.into(),
            issued_at,
            expires_at,
            metadata: AttributeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Access token slot: a token plus its type and granted scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: Token,
    #[serde(default)]
    pub token_type: AccessTokenType,
    #[serde(default)]
    pub scopes: StringSet,
}

impl AccessToken {
    pub fn bearer(token: Token) -> Self {
        Self {
            token,
            token_type: AccessTokenType::Bearer,
            scopes: StringSet::new(),
        }
    }

    pub fn with_token_type(mut self, token_type: AccessTokenType) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }
}

/// OpenID Connect ID token slot: a token plus its claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdToken {
    pub token: Token,
    #[serde(default)]
    pub claims: AttributeMap,
}

impl IdToken {
    pub fn new(token: Token, claims: AttributeMap) -> Self {
        Self { token, claims }
    }
}

/// One OAuth2 grant in progress or completed.
///
/// `registered_client_id` is a reference, not ownership: the client outlives
/// the grant and is resolved separately when a row is read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: String,
    pub registered_client_id: String,
    pub principal_name: String,
    pub grant_type: AuthorizationGrantType,
    #[serde(default)]
    pub authorized_scopes: StringSet,
    /// Cross-cutting state, e.g. the original authorization request
    #[serde(default)]
    pub attributes: AttributeMap,

    pub authorization_code: Option<Token>,
    pub access_token: Option<AccessToken>,
    pub refresh_token: Option<Token>,
    pub id_token: Option<IdToken>,
    pub user_code: Option<Token>,
    pub device_code: Option<Token>,
}

impl Authorization {
    /// Start a new grant with a generated id.
    pub fn new(
        registered_client_id: impl Into<String>,
        principal_name: impl Into<String>,
        grant_type: AuthorizationGrantType,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            registered_client_id,
            principal_name,
            grant_type,
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        registered_client_id: impl Into<String>,
        principal_name: impl Into<String>,
        grant_type: AuthorizationGrantType,
    ) -> Self {
        Self {
            id: id.into(),
            registered_client_id: registered_client_id.into(),
            principal_name: principal_name.into(),
            grant_type,
            authorized_scopes: StringSet::new(),
            attributes: AttributeMap::new(),
            authorization_code: None,
            access_token: None,
            refresh_token: None,
            id_token: None,
            user_code: None,
            device_code: None,
        }
    }

    pub fn with_authorized_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorized_scopes.extend(scopes.into_iter().map(Into::into));
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Record the CSRF `state` value as an attribute.
    pub fn with_state(self, state: impl Into<String>) -> Self {
        self.with_attribute(STATE_ATTRIBUTE, state.into())
    }

    pub fn with_authorization_code(mut self, token: Token) -> Self {
        self.authorization_code = Some(token);
        self
    }

    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn with_refresh_token(mut self, token: Token) -> Self {
        self.refresh_token = Some(token);
        self
    }

    pub fn with_id_token(mut self, token: IdToken) -> Self {
        self.id_token = Some(token);
        self
    }

    pub fn with_user_code(mut self, token: Token) -> Self {
        self.user_code = Some(token);
        self
    }

    pub fn with_device_code(mut self, token: Token) -> Self {
        self.device_code = Some(token);
        self
    }

    /// The `state` attribute, if present and a string.
    pub fn state(&self) -> Option<&str> {
        self.attributes
            .get(STATE_ATTRIBUTE)
            .and_then(AttributeValue::as_str)
    }

    /// Every token-bearing value on this record, `state` included.
    pub fn token_values(&self) -> Vec<&str> {
        let tokens = [
            self.authorization_code.as_ref(),
            self.access_token.as_ref().map(|t| &t.token),
            self.refresh_token.as_ref(),
            self.id_token.as_ref().map(|t| &t.token),
            self.user_code.as_ref(),
            self.device_code.as_ref(),
        ];
        self.state()
            .into_iter()
            .chain(tokens.into_iter().flatten().map(|t| t.value.as_str()))
            .collect()
    }
}
