//! Decoded API records
//!
//! Every JSON endpoint of the service returns an array of objects, each
//! tagged by a `type` field. [`ApiRecord`] is the typed form of one such
//! object. The service is loose about JSON types (ids arrive as numbers or
//! strings, flags as `"0"`/`"1"`), so every field is decoded leniently and
//! missing fields fall back to empty or zero.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::DomainError;

/// Discriminator of an [`ApiRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Bookmark,
    Folder,
    Meta,
    Error,
    Unknown,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Bookmark => "bookmark",
            RecordKind::Folder => "folder",
            RecordKind::Meta => "meta",
            RecordKind::Error => "error",
            RecordKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded JSON object from a service response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiRecord {
    User(UserRecord),
    Bookmark(BookmarkRecord),
    Folder(FolderRecord),
    Meta(MetaRecord),
    Error(ErrorRecord),
    /// A record whose `type` tag this client does not know
    #[serde(other)]
    Unknown,
}

/// `{"type":"user","user_id":54321,"username":"...","subscription_is_active":"1"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub subscription_is_active: bool,
}

/// A saved article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub bookmark_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// Unix timestamp the bookmark was saved at
    #[serde(default, deserialize_with = "lenient::int")]
    pub time: i64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub starred: bool,
    /// Empty for public bookmarks; the source label for private ones
    #[serde(default, deserialize_with = "lenient::string")]
    pub private_source: String,
    /// Hash over url, title, description and progress
    #[serde(default, deserialize_with = "lenient::string")]
    pub hash: String,
    /// Reading progress in `0.0..=1.0`
    #[serde(default, deserialize_with = "lenient::float")]
    pub progress: f64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub progress_timestamp: i64,
}

impl BookmarkRecord {
    /// Returns when the bookmark was saved, if the service reported it
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        unix_time(self.time)
    }

    /// Returns when the reading progress was recorded, if ever
    pub fn progress_recorded_at(&self) -> Option<DateTime<Utc>> {
        unix_time(self.progress_timestamp)
    }

    /// Returns true for bookmarks created from a private source
    pub fn is_private(&self) -> bool {
        !self.private_source.is_empty()
    }
}

/// A user-created organizational folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub folder_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub sync_to_mobile: bool,
    #[serde(default, deserialize_with = "lenient::int")]
    pub position: i64,
}

/// Listing metadata returned alongside bookmarks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    /// Ids sent in `have` that fell outside the listing
    #[serde(default, deserialize_with = "lenient::id_list")]
    pub delete_ids: Vec<String>,
}

/// `{"type":"error","error_code":1240,"message":"Invalid URL specified"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Numeric application code; zero when absent or unparseable
    #[serde(default, deserialize_with = "lenient::code")]
    pub error_code: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
}

impl ApiRecord {
    /// Returns the discriminator of this record
    pub fn kind(&self) -> RecordKind {
        match self {
            ApiRecord::User(_) => RecordKind::User,
            ApiRecord::Bookmark(_) => RecordKind::Bookmark,
            ApiRecord::Folder(_) => RecordKind::Folder,
            ApiRecord::Meta(_) => RecordKind::Meta,
            ApiRecord::Error(_) => RecordKind::Error,
            ApiRecord::Unknown => RecordKind::Unknown,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiRecord::Error(_))
    }

    pub fn as_error(&self) -> Option<&ErrorRecord> {
        match self {
            ApiRecord::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_user(self) -> Option<UserRecord> {
        match self {
            ApiRecord::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn into_bookmark(self) -> Option<BookmarkRecord> {
        match self {
            ApiRecord::Bookmark(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_folder(self) -> Option<FolderRecord> {
        match self {
            ApiRecord::Folder(f) => Some(f),
            _ => None,
        }
    }
}

/// Decodes a JSON response body into a sequence of records.
///
/// Accepts an array of objects, or a single bare object. Objects without
/// a `type` tag decode as [`ApiRecord::Unknown`].
pub fn decode_records(body: &str) -> Result<Vec<ApiRecord>, DomainError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DomainError::InvalidPayload(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(DomainError::InvalidPayload(format!(
                "expected an array of records, got {}",
                json_type_name(&other)
            )))
        }
    };

    items.into_iter().map(decode_one).collect()
}

fn decode_one(item: Value) -> Result<ApiRecord, DomainError> {
    let tagged = item.as_object().is_some_and(|o| o.contains_key("type"));
    if !tagged {
        return Ok(ApiRecord::Unknown);
    }
    serde_json::from_value(item).map_err(|e| DomainError::InvalidPayload(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unix_time(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    Utc.timestamp_opt(secs, 0).single()
}

/// Field decoders that never fail on a type mismatch
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Bool(b) => if b { "1" } else { "0" }.to_string(),
            other => other.to_string(),
        })
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(as_f64(&Value::deserialize(d)?).map_or(0, |f| f as i64))
    }

    pub fn float<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(as_f64(&Value::deserialize(d)?).unwrap_or(0.0))
    }

    pub fn code<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let value = int(d)?;
        Ok(u32::try_from(value).unwrap_or(0))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => matches!(s.trim(), "1" | "true"),
            _ => false,
        })
    }

    pub fn id_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Value::Number(n) => vec![n.to_string()],
            _ => Vec::new(),
        })
    }

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}
