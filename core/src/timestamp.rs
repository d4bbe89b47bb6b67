//! Timestamp fields that the article API does not send consistently.
//!
//! # Design
//! Unpublished articles carry `""` where a published one carries an RFC3339
//! string, and a few detail fields are `null`, missing, or occasionally some
//! other shape. `NullableTimestamp` covers the `null`/`""`/RFC3339 case.
//! `LooseTimestamp` additionally keeps unexpected non-string values visible
//! instead of dropping them. In both, a string that is not RFC3339 is a
//! decode error.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|t| t.with_timezone(&Utc))
}

fn format_rfc3339(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// A point in time that may be absent, encoded as `null` or `""` when it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullableTimestamp(Option<DateTime<Utc>>);

impl NullableTimestamp {
    pub const fn absent() -> Self {
        NullableTimestamp(None)
    }

    pub const fn at(instant: DateTime<Utc>) -> Self {
        NullableTimestamp(Some(instant))
    }

    /// Parse an unquoted value. An empty string is absent.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        if raw.is_empty() {
            return Ok(Self::absent());
        }
        parse_rfc3339(raw).map(Self::at)
    }

    /// Decode a raw JSON scalar (`null`, `""`, or a quoted RFC3339 string)
    /// into `self`. On error `self` keeps its previous value.
    pub fn update_from_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(raw)?;
        Ok(())
    }

    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl From<DateTime<Utc>> for NullableTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::at(instant)
    }
}

impl From<Option<DateTime<Utc>>> for NullableTimestamp {
    fn from(instant: Option<DateTime<Utc>>) -> Self {
        NullableTimestamp(instant)
    }
}

impl fmt::Display for NullableTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(t) => f.write_str(&format_rfc3339(t)),
            None => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for NullableTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::absent()),
            Some(raw) => Self::parse(&raw)
                .map_err(|e| de::Error::custom(format!("invalid RFC3339 timestamp {raw:?}: {e}"))),
        }
    }
}

impl Serialize for NullableTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(t) => serializer.serialize_str(&format_rfc3339(t)),
            None => serializer.serialize_none(),
        }
    }
}

/// A timestamp field whose wire shape is not guaranteed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LooseTimestamp {
    /// `null`, `""`, or the field is missing.
    #[default]
    Absent,
    /// A valid RFC3339 string.
    At(DateTime<Utc>),
    /// A value that is neither a string nor `null`, kept as received.
    Unrecognized(Value),
}

impl LooseTimestamp {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            LooseTimestamp::At(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, LooseTimestamp::Absent)
    }
}

impl<'de> Deserialize<'de> for LooseTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(LooseTimestamp::Absent),
            Value::String(raw) if raw.is_empty() => Ok(LooseTimestamp::Absent),
            Value::String(raw) => parse_rfc3339(&raw)
                .map(LooseTimestamp::At)
                .map_err(|e| de::Error::custom(format!("invalid RFC3339 timestamp {raw:?}: {e}"))),
            other => Ok(LooseTimestamp::Unrecognized(other)),
        }
    }
}

impl Serialize for LooseTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LooseTimestamp::Absent => serializer.serialize_none(),
            LooseTimestamp::At(t) => serializer.serialize_str(&format_rfc3339(t)),
            LooseTimestamp::Unrecognized(raw) => raw.serialize(serializer),
        }
    }
}
