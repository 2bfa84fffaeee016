//! Column codecs: JSON for attribute maps, comma-joined text for sets.

use crate::domain::{AttributeMap, AttributeValue, StringSet};
use crate::error::MappingError;

/// Serializes attribute maps to and from a single text column.
pub struct AttributeCodec;

impl AttributeCodec {
    /// Deepest map/list nesting `encode` accepts, counting the top-level map.
    ///
    /// Stays below serde_json's parser recursion limit so that everything
    /// written can be decoded again.
    pub const MAX_NESTING: usize = 100;

    /// Encode a map as compact JSON. Maps nested deeper than
    /// [`MAX_NESTING`](Self::MAX_NESTING) are rejected.
    pub fn encode(column: &'static str, map: &AttributeMap) -> Result<String, MappingError> {
        if map_depth(map) > Self::MAX_NESTING {
            return Err(MappingError::NestingTooDeep {
                column,
                limit: Self::MAX_NESTING,
            });
        }
        serde_json::to_string(map).map_err(|e| MappingError::data_format(column, e))
    }

    /// Decode a map column. A null column is an empty map; anything that is
    /// not a JSON object is a `DataFormat` error.
    pub fn decode(column: &'static str, data: Option<&str>) -> Result<AttributeMap, MappingError> {
        match data {
            None => Ok(AttributeMap::new()),
            Some(json) => {
                serde_json::from_str(json).map_err(|e| MappingError::data_format(column, e))
            }
        }
    }
}

fn map_depth(map: &AttributeMap) -> usize {
    1 + map.values().map(value_depth).max().unwrap_or(0)
}

fn value_depth(value: &AttributeValue) -> usize {
    match value {
        AttributeValue::Map(map) => map_depth(map),
        AttributeValue::List(items) => 1 + items.iter().map(value_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Join set members with `,` in iteration order. An empty set is `""`.
pub fn join_set<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            joined.push(',');
        }
        joined.push_str(item.as_ref());
    }
    joined
}

/// Split a comma-joined column. Null and `""` both give the empty set.
pub fn split_set(data: Option<&str>) -> StringSet {
    match data {
        None | Some("") => StringSet::new(),
        Some(joined) => joined.split(',').map(str::to_string).collect(),
    }
}
