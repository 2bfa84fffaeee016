//! Repository facades over the row stores
//!
//! Each service owns its store (and, for authorizations and consents, a
//! client resolver) and converts between aggregates and rows on the way
//! through. Mapping failures reach callers as [`MappingError`](crate::MappingError)
//! wrapped in `anyhow::Error`.

mod authorization_service;
mod client_service;
mod consent_service;

pub use authorization_service::AuthorizationService;
pub use client_service::RegisteredClientService;
pub use consent_service::ConsentService;
