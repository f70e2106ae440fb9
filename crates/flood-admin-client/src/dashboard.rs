use flood_admin_core::{StatusTally, tally};
use flood_admin_types::{EventBanner, Feedback, FloodReport, User};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Headline counts plus the feedback-by-status chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub users: usize,
    pub event_banners: usize,
    pub feedbacks: usize,
    /// Counted from the first page only, like the listing itself.
    pub flood_reports: usize,
    pub feedback_status: StatusTally,
    /// Feedback and reports still waiting for a moderator.
    pub pending_reviews: usize,
}

impl DashboardSnapshot {
    pub fn from_collections(
        users: &[User],
        event_banners: &[EventBanner],
        feedbacks: &[Feedback],
        flood_reports: &[FloodReport],
    ) -> Self {
        let pending_reviews = feedbacks.iter().filter(|f| f.is_reviewable()).count()
            + flood_reports.iter().filter(|r| r.is_reviewable()).count();
        Self {
            users: users.len(),
            event_banners: event_banners.len(),
            feedbacks: feedbacks.len(),
            flood_reports: flood_reports.len(),
            feedback_status: tally(feedbacks),
            pending_reviews,
        }
    }

    /// Card titles and values in display order.
    pub fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Users", self.users),
            ("Event Banners", self.event_banners),
            ("Feedbacks", self.feedbacks),
            ("Flood Reports", self.flood_reports),
        ]
    }
}

/// Fetch all four collections concurrently. Any failure fails the whole
/// snapshot.
pub async fn load_dashboard(client: &ApiClient) -> Result<DashboardSnapshot, ApiError> {
    let (users, banners, feedbacks, reports) = tokio::try_join!(
        client.users(),
        client.event_banners(),
        client.feedbacks(None),
        client.flood_reports(None, None),
    )?;
    debug!(
        users = users.len(),
        banners = banners.len(),
        feedbacks = feedbacks.len(),
        reports = reports.len(),
        "Dashboard collections loaded"
    );
    Ok(DashboardSnapshot::from_collections(&users, &banners, &feedbacks, &reports))
}
