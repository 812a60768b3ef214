//! Column encodings shared by the repositories.
//!
//! Timestamps are stored as fixed-width RFC 3339 text (nanoseconds, `Z`)
//! so that lexical order matches chronological order.

use chrono::SecondsFormat;
use serde::de::DeserializeOwned;

use ministryhub_domain::time::Timestamp;

pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn decode_json<T: DeserializeOwned>(value: &str) -> Result<T, sqlx::Error> {
    serde_json::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
