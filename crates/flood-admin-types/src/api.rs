use serde::{Deserialize, Serialize};

use crate::models::{EventBanner, User};
use crate::status::ReviewStatus;

// -- Requests --

/// Body of both review endpoints (feedback and flood reports).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub status: ReviewStatus,
    /// Sent as an empty string when the moderator leaves no note.
    #[serde(default)]
    pub admin_note: String,
}

impl ReviewRequest {
    pub fn new(status: ReviewStatus, note: Option<&str>) -> Self {
        Self {
            status,
            admin_note: note.map(str::trim).unwrap_or_default().to_string(),
        }
    }
}

/// Create/update body for event banners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventBanner {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// -- Response envelopes --

/// `GET /auth/users` wraps the list under `users`.
#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

/// Admin listings wrap the list under `data`.
///
/// The explicit bound stops `default` from also demanding `T: Default`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Option<Vec<T>>,
}

/// `GET /EventBanners` returns a bare array (or `null` when empty).
pub type BannerList = Option<Vec<EventBanner>>;

impl UsersEnvelope {
    pub fn into_items(self) -> Vec<User> {
        self.users.unwrap_or_default()
    }
}

impl<T> DataEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}
