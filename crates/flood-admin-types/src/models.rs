use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::status::ReviewStatus;

/// Record identifier. The API emits integer keys for most tables but some
/// endpoints return them as strings, so both are accepted and echoed back
/// in the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

// -- Event banners --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBanner {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// -- Moderated records --

/// Display info for whoever submitted a feedback entry or report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AuthorWire")]
pub struct Author {
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ModeratedWire")]
pub struct Feedback {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub user: Option<Author>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ModeratedWire")]
pub struct FloodReport {
    pub id: RecordId,
    pub title: String,
    pub status: Option<String>,
    pub user: Option<Author>,
}

// The backend serializes some of these keys in PascalCase and some rows
// carry both spellings. Each spelling gets its own slot and the camelCase
// one wins when both are present.

#[derive(Deserialize)]
struct AuthorWire {
    #[serde(default, rename = "fullName")]
    full_name: Option<String>,
    #[serde(default, rename = "FullName")]
    full_name_pascal: Option<String>,
}

impl From<AuthorWire> for Author {
    fn from(wire: AuthorWire) -> Self {
        Self {
            full_name: wire.full_name.or(wire.full_name_pascal),
        }
    }
}

#[derive(Deserialize)]
struct ModeratedWire {
    id: RecordId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "Status")]
    status_pascal: Option<String>,
    #[serde(default)]
    user: Option<Author>,
    #[serde(default, rename = "User")]
    user_pascal: Option<Author>,
}

impl From<ModeratedWire> for Feedback {
    fn from(wire: ModeratedWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            status: wire.status.or(wire.status_pascal),
            user: wire.user.or(wire.user_pascal),
        }
    }
}

impl From<ModeratedWire> for FloodReport {
    fn from(wire: ModeratedWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            status: wire.status.or(wire.status_pascal),
            user: wire.user.or(wire.user_pascal),
        }
    }
}

impl Feedback {
    pub fn review_status(&self) -> Option<ReviewStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Only pending entries can be approved or rejected.
    pub fn is_reviewable(&self) -> bool {
        self.review_status() == Some(ReviewStatus::Pending)
    }

    pub fn author_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.full_name.as_deref())
    }
}

impl FloodReport {
    pub fn review_status(&self) -> Option<ReviewStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Only pending reports can be approved or rejected.
    pub fn is_reviewable(&self) -> bool {
        self.review_status() == Some(ReviewStatus::Pending)
    }

    pub fn author_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.full_name.as_deref())
    }
}

// -- Timestamps --

/// Parse an API timestamp. Accepts RFC 3339 and the zone-less forms the
/// backend emits for `datetime` columns, which are treated as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = raw.parse::<DateTime<Utc>>() {
        return Some(ts);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ndt| ndt.and_utc())
}

/// A bad timestamp on one row should not sink the whole collection.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| {
        let parsed = parse_timestamp(&raw);
        if parsed.is_none() {
            warn!("Unparseable timestamp '{}', leaving it empty", raw);
        }
        parsed
    }))
}
