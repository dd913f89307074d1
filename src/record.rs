use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A proforma invoice as returned by the listing endpoints.
///
/// Fields the listing does not use are kept in `extra` so the record can be
/// handed to a detail view unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProformaRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emp_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pro_forma_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub party_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grand_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The backend sends unset columns as `null`; treat them like missing keys
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Display state derived from the raw `status` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Closed,
    Open,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Closed => write!(f, "CLOSED"),
            RecordStatus::Open => write!(f, "OPEN"),
        }
    }
}

impl ProformaRecord {
    /// The record's date as a local timestamp, or None if it can't be parsed.
    /// Date-only values are taken as midnight.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date)
    }

    /// Calendar day of the record, if its date parses
    pub fn day(&self) -> Option<NaiveDate> {
        self.timestamp().map(|ts| ts.date())
    }

    pub fn status(&self) -> RecordStatus {
        if self.status == "confirm" {
            RecordStatus::Closed
        } else {
            RecordStatus::Open
        }
    }
}

/// Parse the date formats the backend is known to emit
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Some(ts);
        }
    }

    for format in ["%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(day) = NaiveDate::parse_from_str(input, format) {
            return Some(day.and_time(NaiveTime::MIN));
        }
    }

    None
}
