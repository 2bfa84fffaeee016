//! Open enumerations: a closed set of well-known values plus a custom fallback.
//!
//! Grant types, client authentication methods, access-token types and token
//! kinds are all stored as plain strings. Reading them back must never reject
//! or rewrite a value introduced by an extension we don't know about, so each
//! enum carries a `Custom(String)` variant that preserves the stored text.
//!
//! Equality, hashing and display go through [`OpenEnum::as_str`], so
//! `Custom("authorization_code")` equals `AuthorizationGrantType::AuthorizationCode`.

use serde::{Deserialize, Serialize};

/// An enumeration with well-known members and a verbatim custom fallback.
pub trait OpenEnum: Sized + Clone + 'static {
    /// The well-known members, matched by value.
    const WELL_KNOWN: &'static [Self];

    /// External string representation.
    fn as_str(&self) -> &str;

    /// Wrap a value outside the well-known set.
    fn custom(value: String) -> Self;

    /// Resolve a stored string to a well-known member, or a custom variant.
    fn resolve(value: &str) -> Self {
        Self::WELL_KNOWN
            .iter()
            .find(|known| known.as_str() == value)
            .cloned()
            .unwrap_or_else(|| Self::custom(value.to_string()))
    }

    /// Whether this value is outside the well-known set.
    fn is_custom(&self) -> bool {
        !Self::WELL_KNOWN
            .iter()
            .any(|known| known.as_str() == self.as_str())
    }
}

/// Value-based equality, hashing, display and string (de)serialization.
macro_rules! impl_open_enum {
    ($name:ident) => {
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.as_str().hash(state);
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                <Self as OpenEnum>::resolve(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                <Self as OpenEnum>::resolve(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

/// OAuth2 authorization grant type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthorizationGrantType {
    AuthorizationCode,
    ClientCredentials,
    RefreshToken,
    DeviceCode,
    /// Extension grant type, kept verbatim
    Custom(String),
}

impl OpenEnum for AuthorizationGrantType {
    const WELL_KNOWN: &'static [Self] = &[
        Self::AuthorizationCode,
        Self::ClientCredentials,
        Self::RefreshToken,
        Self::DeviceCode,
    ];

    fn as_str(&self) -> &str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::ClientCredentials => "client_credentials",
            Self::RefreshToken => "refresh_token",
            Self::DeviceCode => "urn:ietf:params:oauth:grant-type:device_code",
            Self::Custom(value) => value,
        }
    }

    fn custom(value: String) -> Self {
        Self::Custom(value)
    }
}

impl_open_enum!(AuthorizationGrantType);

/// How a client authenticates at the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClientAuthenticationMethod {
    ClientSecretBasic,
    ClientSecretPost,
    None,
    Custom(String),
}

impl OpenEnum for ClientAuthenticationMethod {
    const WELL_KNOWN: &'static [Self] = &[
        Self::ClientSecretBasic,
        Self::ClientSecretPost,
        Self::None,
    ];

    fn as_str(&self) -> &str {
        match self {
            Self::ClientSecretBasic => "client_secret_basic",
            Self::ClientSecretPost => "client_secret_post",
            Self::None => "none",
            Self::Custom(value) => value,
        }
    }

    fn custom(value: String) -> Self {
        Self::Custom(value)
    }
}

impl_open_enum!(ClientAuthenticationMethod);

/// Access token type (RFC 6749 section 7.1)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessTokenType {
    #[default]
    Bearer,
    DPoP,
    Custom(String),
}

impl OpenEnum for AccessTokenType {
    const WELL_KNOWN: &'static [Self] = &[Self::Bearer, Self::DPoP];

    fn as_str(&self) -> &str {
        match self {
            Self::Bearer => "Bearer",
            Self::DPoP => "DPoP",
            Self::Custom(value) => value,
        }
    }

    fn custom(value: String) -> Self {
        Self::Custom(value)
    }
}

impl_open_enum!(AccessTokenType);

/// Kind of token presented to a lookup, named by its external parameter name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenKind {
    State,
    Code,
    AccessToken,
    RefreshToken,
    IdToken,
    UserCode,
    DeviceCode,
    Custom(String),
}

impl OpenEnum for TokenKind {
    const WELL_KNOWN: &'static [Self] = &[
        Self::State,
        Self::Code,
        Self::AccessToken,
        Self::RefreshToken,
        Self::IdToken,
        Self::UserCode,
        Self::DeviceCode,
    ];

    fn as_str(&self) -> &str {
        match self {
            Self::State => "state",
            Self::Code => "code",
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::IdToken => "id_token",
            Self::UserCode => "user_code",
            Self::DeviceCode => "device_code",
            Self::Custom(value) => value,
        }
    }

    fn custom(value: String) -> Self {
        Self::Custom(value)
    }
}

impl_open_enum!(TokenKind);
