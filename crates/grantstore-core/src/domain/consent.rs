//! AuthorizationConsent aggregate - a principal's standing grant to a client

use serde::{Deserialize, Serialize};

use super::attributes::StringSet;

/// Authority prefix marking a consented scope.
pub const SCOPE_AUTHORITY_PREFIX: &str = "SCOPE_";

/// Authorities a principal has granted to a client.
///
/// Identified by `(registered_client_id, principal_name)`; at most one exists
/// per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationConsent {
    pub registered_client_id: String,
    pub principal_name: String,
    #[serde(default)]
    pub authorities: StringSet,
}

impl AuthorizationConsent {
    pub fn new(registered_client_id: impl Into<String>, principal_name: impl Into<String>) -> Self {
        Self {
            registered_client_id: registered_client_id.into(),
            principal_name: principal_name.into(),
            authorities: StringSet::new(),
        }
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authorities.insert(authority.into());
        self
    }

    /// Grant a scope, stored as a `SCOPE_`-prefixed authority.
    pub fn with_scope(self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.with_authority(format!("{SCOPE_AUTHORITY_PREFIX}{scope}"))
    }

    /// Consented scopes, without their prefix.
    pub fn scopes(&self) -> Vec<&str> {
        self.authorities
            .iter()
            .filter_map(|a| a.strip_prefix(SCOPE_AUTHORITY_PREFIX))
            .collect()
    }
}
