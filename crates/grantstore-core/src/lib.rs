//! # Grantstore Core Library
//!
//! OAuth2 authorization server records and their relational mapping.
//!
//! ## Modules
//!
//! - `domain` - Aggregates (RegisteredClient, Authorization, AuthorizationConsent)
//!   and the open enumerations they use
//! - `mapping` - Row shapes and the bidirectional record mappers
//! - `repository` - Row store and client resolver traits
//! - `service` - Repository facades built on the mappers
//! - `error` - Mapping error taxonomy

pub mod domain;
pub mod error;
pub mod mapping;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use error::MappingError;
pub use repository::*;
pub use service::*;
