//! RegisteredClient aggregate - a trusted OAuth2 client registration

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::{AttributeMap, AttributeValue, StringSet};
use super::open_enum::{AuthorizationGrantType, ClientAuthenticationMethod};

/// A registered OAuth2 client.
///
/// `id` is the stable internal identity; `client_id` is what the client
/// presents on the wire. Both are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredClient {
    /// Stable identity, never changes
    pub id: String,

    /// External-facing client identifier
    pub client_id: String,

    pub client_id_issued_at: Option<DateTime<Utc>>,

    /// Hashed or otherwise opaque secret
    pub client_secret: Option<String>,

    pub client_secret_expires_at: Option<DateTime<Utc>>,

    pub client_name: String,

    pub authentication_methods: IndexSet<ClientAuthenticationMethod>,

    pub grant_types: IndexSet<AuthorizationGrantType>,

    pub redirect_uris: StringSet,

    pub post_logout_redirect_uris: StringSet,

    pub scopes: StringSet,

    pub client_settings: ClientSettings,

    pub token_settings: TokenSettings,
}

impl RegisteredClient {
    /// Create a new registration with a generated id, issued now.
    pub fn new(client_id: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), client_id, client_name)
            .with_issued_at(Some(Utc::now()))
    }

    /// Create a registration with an explicit id and no issue time.
    pub fn with_id(
        id: impl Into<String>,
        client_id: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            client_id_issued_at: None,
            client_secret: None,
            client_secret_expires_at: None,
            client_name: client_name.into(),
            authentication_methods: IndexSet::new(),
            grant_types: IndexSet::new(),
            redirect_uris: StringSet::new(),
            post_logout_redirect_uris: StringSet::new(),
            scopes: StringSet::new(),
            client_settings: ClientSettings::default(),
            token_settings: TokenSettings::default(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        self.client_secret = Some(secret.into());
        self.client_secret_expires_at = expires_at;
        self
    }

    pub fn with_issued_at(mut self, issued_at: Option<DateTime<Utc>>) -> Self {
        self.client_id_issued_at = issued_at;
        self
    }

    pub fn with_authentication_method(mut self, method: ClientAuthenticationMethod) -> Self {
        self.authentication_methods.insert(method);
        self
    }

    pub fn with_grant_type(mut self, grant_type: AuthorizationGrantType) -> Self {
        self.grant_types.insert(grant_type);
        self
    }

    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uris.insert(uri.into());
        self
    }

    pub fn with_post_logout_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.post_logout_redirect_uris.insert(uri.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.insert(scope.into());
        self
    }

    pub fn with_client_settings(mut self, settings: ClientSettings) -> Self {
        self.client_settings = settings;
        self
    }

    pub fn with_token_settings(mut self, settings: TokenSettings) -> Self {
        self.token_settings = settings;
        self
    }

    /// Check the registration invariants.
    ///
    /// Returns the reason the registration is invalid, if it is.
    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.is_empty() {
            return Err("client_id cannot be empty".to_string());
        }
        if self.client_name.is_empty() {
            return Err("client_name cannot be empty".to_string());
        }
        if self.authentication_methods.is_empty() {
            return Err("at least one client authentication method is required".to_string());
        }
        if self.grant_types.is_empty() {
            return Err("at least one authorization grant type is required".to_string());
        }
        if self.scopes.is_empty() {
            return Err("at least one scope is required".to_string());
        }
        Ok(())
    }

    pub fn supports_grant_type(&self, grant_type: &AuthorizationGrantType) -> bool {
        self.grant_types.contains(grant_type)
    }
}

const REQUIRE_PROOF_KEY: &str = "settings.client.require-proof-key";
const REQUIRE_AUTHORIZATION_CONSENT: &str = "settings.client.require-authorization-consent";
const JWK_SET_URL: &str = "settings.client.jwk-set-url";

/// Client settings, stored as an opaque map.
///
/// Typed accessors cover the well-known keys; anything else is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSettings(AttributeMap);

impl ClientSettings {
    pub fn from_map(settings: AttributeMap) -> Self {
        Self(settings)
    }

    pub fn settings(&self) -> &AttributeMap {
        &self.0
    }

    pub fn into_map(self) -> AttributeMap {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Whether the client must use PKCE
    pub fn require_proof_key(&self) -> bool {
        self.get(REQUIRE_PROOF_KEY)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(false)
    }

    pub fn with_require_proof_key(self, required: bool) -> Self {
        self.with_setting(REQUIRE_PROOF_KEY, required)
    }

    /// Whether the consent screen is shown for this client
    pub fn require_authorization_consent(&self) -> bool {
        self.get(REQUIRE_AUTHORIZATION_CONSENT)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(false)
    }

    pub fn with_require_authorization_consent(self, required: bool) -> Self {
        self.with_setting(REQUIRE_AUTHORIZATION_CONSENT, required)
    }

    pub fn jwk_set_url(&self) -> Option<&str> {
        self.get(JWK_SET_URL).and_then(AttributeValue::as_str)
    }

    pub fn with_jwk_set_url(self, url: impl Into<String>) -> Self {
        self.with_setting(JWK_SET_URL, url.into())
    }
}

const AUTHORIZATION_CODE_TTL: &str = "settings.token.authorization-code-time-to-live";
const ACCESS_TOKEN_TTL: &str = "settings.token.access-token-time-to-live";
const DEVICE_CODE_TTL: &str = "settings.token.device-code-time-to-live";
const REFRESH_TOKEN_TTL: &str = "settings.token.refresh-token-time-to-live";
const REUSE_REFRESH_TOKENS: &str = "settings.token.reuse-refresh-tokens";
const ACCESS_TOKEN_FORMAT: &str = "settings.token.access-token-format";

/// Token settings, stored as an opaque map.
///
/// Durations are kept as whole seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSettings(AttributeMap);

impl TokenSettings {
    pub fn from_map(settings: AttributeMap) -> Self {
        Self(settings)
    }

    pub fn settings(&self) -> &AttributeMap {
        &self.0
    }

    pub fn into_map(self) -> AttributeMap {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    fn duration(&self, key: &str) -> Option<Duration> {
        self.get(key)
            .and_then(AttributeValue::as_i64)
            .map(Duration::seconds)
    }

    fn with_duration(self, key: &str, ttl: Duration) -> Self {
        self.with_setting(key, ttl.num_seconds())
    }

    pub fn authorization_code_time_to_live(&self) -> Option<Duration> {
        self.duration(AUTHORIZATION_CODE_TTL)
    }

    pub fn with_authorization_code_time_to_live(self, ttl: Duration) -> Self {
        self.with_duration(AUTHORIZATION_CODE_TTL, ttl)
    }

    pub fn access_token_time_to_live(&self) -> Option<Duration> {
        self.duration(ACCESS_TOKEN_TTL)
    }

    pub fn with_access_token_time_to_live(self, ttl: Duration) -> Self {
        self.with_duration(ACCESS_TOKEN_TTL, ttl)
    }

    pub fn device_code_time_to_live(&self) -> Option<Duration> {
        self.duration(DEVICE_CODE_TTL)
    }

    pub fn with_device_code_time_to_live(self, ttl: Duration) -> Self {
        self.with_duration(DEVICE_CODE_TTL, ttl)
    }

    pub fn refresh_token_time_to_live(&self) -> Option<Duration> {
        self.duration(REFRESH_TOKEN_TTL)
    }

    pub fn with_refresh_token_time_to_live(self, ttl: Duration) -> Self {
        self.with_duration(REFRESH_TOKEN_TTL, ttl)
    }

    /// Whether refresh tokens are reused on refresh (defaults to true)
    pub fn reuse_refresh_tokens(&self) -> bool {
        self.get(REUSE_REFRESH_TOKENS)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(true)
    }

    pub fn with_reuse_refresh_tokens(self, reuse: bool) -> Self {
        self.with_setting(REUSE_REFRESH_TOKENS, reuse)
    }

    pub fn access_token_format(&self) -> Option<&str> {
        self.get(ACCESS_TOKEN_FORMAT).and_then(AttributeValue::as_str)
    }

    pub fn with_access_token_format(self, format: impl Into<String>) -> Self {
        self.with_setting(ACCESS_TOKEN_FORMAT, format.into())
    }
}
