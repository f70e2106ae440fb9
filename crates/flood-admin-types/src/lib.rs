/// Wire types for the flood-reporting admin API.
///
/// Records are read-only snapshots of what the API returned. Anything that
/// changes a record goes through a write request and a re-fetch.

pub mod api;
pub mod models;
pub mod status;

pub use models::{Author, EventBanner, Feedback, FloodReport, RecordId, User};
pub use status::{ReviewStatus, UnknownStatus};
