/// HTTP boundary of the admin toolkit.
///
/// `ApiClient` reads collections and dispatches moderation writes against
/// the REST API. It never retries: a failed call surfaces as an `ApiError`
/// and the caller decides when to refresh again.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod views;

pub use client::{ApiClient, ApiHealth};
pub use config::ApiConfig;
pub use dashboard::{DashboardSnapshot, load_dashboard};
pub use error::ApiError;
