//! Lenient date parsing for request bodies.
//!
//! Browsers post `<input type="date">` values as `YYYY-MM-DD`, API clients
//! tend to send RFC 3339. Both are accepted; bare dates are midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("invalid date: {}", raw))
}

/// Empty strings and `null` both deserialize to `None`
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse("2024-05-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn parses_naive_datetime_as_utc() {
        let dt = parse("2024-05-01T10:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn parses_plain_date_as_midnight() {
        let dt = parse(" 2024-05-01 ").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("2024-13-40").is_err());
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn blank_and_null_are_absent() {
        let blank: Holder = serde_json::from_str(r#"{"at":""}"#).unwrap();
        assert!(blank.at.is_none());
        let null: Holder = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert!(null.at.is_none());
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.at.is_none());
    }

    #[test]
    fn invalid_date_is_a_deserialize_error() {
        assert!(serde_json::from_str::<Holder>(r#"{"at":"soon"}"#).is_err());
    }
}
