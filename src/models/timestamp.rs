//! Lenient decoding of API timestamps.
//!
//! Dome9 mostly sends RFC 3339, but some endpoints drop the offset
//! (`2018-08-26T16:11:12.123`). Those are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const ZONELESS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Deserialize an optional timestamp. `null`, empty and unparseable values
/// decode as `None`.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    match NaiveDateTime::parse_from_str(raw, ZONELESS_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            tracing::debug!(raw, error = %e, "ignoring unparseable timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "deserialize")]
        at: Option<DateTime<Utc>>,
    }

    fn decode(json: &str) -> Option<DateTime<Utc>> {
        serde_json::from_str::<Stamped>(json).unwrap().at
    }

    #[test]
    fn test_rfc3339_keeps_offset() {
        let at = decode(r#"{"at": "2018-08-26T18:11:12+02:00"}"#).unwrap();
        assert_eq!(at.to_rfc3339(), "2018-08-26T16:11:12+00:00");
    }

    #[test]
    fn test_zoneless_is_utc() {
        let at = decode(r#"{"at": "2018-08-26T16:11:12.123"}"#).unwrap();
        assert_eq!(at.timestamp_millis() % 1000, 123);
        assert_eq!(at.format("%Y-%m-%d %H:%M:%S").to_string(), "2018-08-26 16:11:12");

        let at = decode(r#"{"at": "2018-08-26T16:11:12"}"#).unwrap();
        assert_eq!(at.to_rfc3339(), "2018-08-26T16:11:12+00:00");
    }

    #[test]
    fn test_missing_null_and_garbage_are_none() {
        assert!(decode("{}").is_none());
        assert!(decode(r#"{"at": null}"#).is_none());
        assert!(decode(r#"{"at": ""}"#).is_none());
        assert!(decode(r#"{"at": "yesterday"}"#).is_none());
    }
}
