//! Mapping error taxonomy
//!
//! Every failure a record mapper can produce. Facades return these wrapped in
//! `anyhow::Error`; callers recover the variant with
//! `err.downcast_ref::<MappingError>()`.

/// Errors raised while converting between aggregates and rows.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// A serialized map column could not be parsed (or written).
    #[error("Malformed data in column '{column}': {source}")]
    DataFormat {
        /// Column holding the malformed value
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A map nests deeper than the column format can read back.
    #[error("Data for column '{column}' nests deeper than {limit} levels")]
    NestingTooDeep {
        /// Column the map was being written to
        column: &'static str,
        /// Deepest nesting the codec accepts
        limit: usize,
    },

    /// A required set decoded to nothing; the row was corrupted or hand-edited.
    #[error("Registered client '{client_id}' has an empty '{field}' column")]
    ClientMapping {
        /// Stable id of the offending client row
        client_id: String,
        /// Name of the column that decoded to an empty set
        field: &'static str,
    },

    /// A row references a registered client that cannot be resolved.
    #[error("The registered client with id '{registered_client_id}' was not found")]
    DanglingReference {
        /// The unresolvable client id
        registered_client_id: String,
    },

    /// A token lookup matched more than one row.
    #[error("Token lookup matched {matches} authorization rows; token values must be unique")]
    AmbiguousTokenLookup {
        /// Number of distinct rows that matched
        matches: usize,
    },

    /// A registration was rejected before being written.
    #[error("Invalid registered client '{client_id}': {reason}")]
    InvalidRegistration {
        /// Stable id of the rejected client
        client_id: String,
        /// What was wrong with it
        reason: String,
    },
}

impl MappingError {
    /// Create a `DataFormat` error for the given column.
    pub fn data_format(column: &'static str, source: serde_json::Error) -> Self {
        Self::DataFormat { column, source }
    }

    /// Create a `ClientMapping` error.
    pub fn client_mapping(client_id: impl Into<String>, field: &'static str) -> Self {
        Self::ClientMapping {
            client_id: client_id.into(),
            field,
        }
    }

    /// Create a `DanglingReference` error.
    pub fn dangling_reference(registered_client_id: impl Into<String>) -> Self {
        Self::DanglingReference {
            registered_client_id: registered_client_id.into(),
        }
    }

    /// Create an `InvalidRegistration` error.
    pub fn invalid_registration(client_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            client_id: client_id.into(),
            reason: reason.into(),
        }
    }
}
