use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

pub type Timestamp = DateTime<Utc>;

pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp the way persisted records carry it (ISO 8601, millisecond precision).
pub fn to_iso(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fresh identifier for quizzes, blocks and sessions. UUIDv7 is time ordered and never repeats.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Serde adapter writing timestamps with `to_iso` and reading any RFC 3339 string.
pub mod iso_millis {
    use super::{Timestamp, to_iso};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso(timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
