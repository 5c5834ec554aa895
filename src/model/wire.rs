//! Lenient decoding helpers for the Record Store's JSON.
//!
//! The Record Store is not strict about its own shapes: dates show up as full
//! timestamps or bare dates, enum fields are sometimes empty strings and lists
//! are sometimes `null`. None of that should make a whole profile unreadable,
//! so these helpers map anything unexpected to "absent".

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

pub mod timestamp_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => {
                serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() && !raw.is_empty() {
                log::warn!("Ignoring unparseable date {raw:?}");
            }
            parsed
        }))
    }
}

/// Deserializes an optional enum from its string form. Empty strings and
/// unknown values read as `None`.
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(|raw| {
        if raw.is_empty() {
            return None;
        }
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            log::warn!("Ignoring unknown value {raw:?}");
        }
        parsed
    }))
}

/// Treats an explicit `null` like a missing field.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
