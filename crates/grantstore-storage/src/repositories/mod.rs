//! Store implementations using SQLite.

mod authorization_store;
mod client_store;
mod consent_store;

pub use authorization_store::SqliteAuthorizationStore;
pub use client_store::SqliteClientStore;
pub use consent_store::SqliteConsentStore;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Timestamps are stored as RFC 3339 text in UTC, keeping sub-second precision.
///
/// RFC 3339 only has four-digit years, so instants outside 0000..=9999 are
/// refused here rather than written as text `read_timestamp` cannot parse.
fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> rusqlite::Result<Option<String>> {
    let Some(t) = timestamp else {
        return Ok(None);
    };
    if !(0..=9999).contains(&t.year()) {
        return Err(rusqlite::Error::ToSqlConversionFailure(
            format!("timestamp {t} is outside the RFC 3339 year range").into(),
        ));
    }
    Ok(Some(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
}

/// Read a nullable timestamp column. Unparseable text is an error, never a
/// silently substituted value.
fn read_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let Some(text) = row.get::<_, Option<String>>(idx)? else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&text)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
