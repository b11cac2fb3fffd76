//! Fixed date convention used by the storefront endpoints.
//!
//! Timestamps travel as `yyyy-MM-dd'T'HH:mm:ss` with no offset. They are kept
//! as [`NaiveDateTime`] and treated as UTC by callers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// `chrono` format string for the wire date convention.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same convention for optional fields (`null` or missing decode to `None`).
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.is_empty() => super::parse(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_wire_format() {
        let date = parse("2018-06-23T17:06:55").unwrap();
        assert_eq!(date.year(), 2018);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 23);
        assert_eq!(date.hour(), 17);
        assert_eq!(date.second(), 55);
        assert_eq!(format(&date), "2018-06-23T17:06:55");
    }

    #[test]
    fn rejects_offsets_and_fractional_seconds() {
        assert!(parse("2018-06-23T17:06:55Z").is_err());
        assert!(parse("2018-06-23T17:06:55.123").is_err());
        assert!(parse("2018-06-23").is_err());
    }
}
