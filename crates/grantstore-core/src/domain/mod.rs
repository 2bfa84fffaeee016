//! Domain aggregates and value types
//!
//! - Aggregates (RegisteredClient, Authorization, AuthorizationConsent)
//! - Open enumerations (grant types, authentication methods, token kinds)
//! - Opaque attribute maps

mod attributes;
mod authorization;
mod consent;
mod open_enum;
mod registered_client;

pub use attributes::{AttributeMap, AttributeValue, StringSet};
pub use authorization::{AccessToken, Authorization, IdToken, Token, STATE_ATTRIBUTE};
pub use consent::{AuthorizationConsent, SCOPE_AUTHORITY_PREFIX};
pub use open_enum::{
    AccessTokenType, AuthorizationGrantType, ClientAuthenticationMethod, OpenEnum, TokenKind,
};
pub use registered_client::{ClientSettings, RegisteredClient, TokenSettings};
