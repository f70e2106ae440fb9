use std::future::Future;

use flood_admin_core::View;
use flood_admin_types::{EventBanner, Feedback, FloodReport, RecordId, ReviewStatus, User};
use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Drive `view` through one fetch and apply the result.
///
/// The view stays mutably borrowed across the await, so refreshes through
/// this helper never overlap and the result is always applied. Callers
/// that keep several requests in flight for one view use
/// [`View::begin_refresh`] and [`View::finish_refresh`] directly; the ticket
/// check there drops whichever result is stale.
pub async fn refresh<R, F>(view: &mut View<R>, fetch: F) -> bool
where
    F: Future<Output = Result<Vec<R>, ApiError>>,
{
    let ticket = view.begin_refresh();
    let result = fetch.await.inspect_err(|e| {
        warn!(view = view.label(), "Refresh failed: {}", e);
    });
    view.finish_refresh(ticket, result)
}

pub async fn refresh_users(client: &ApiClient, view: &mut View<User>) -> bool {
    refresh(view, client.users()).await
}

pub async fn refresh_event_banners(client: &ApiClient, view: &mut View<EventBanner>) -> bool {
    refresh(view, client.event_banners()).await
}

/// Uses the view's status filter.
pub async fn refresh_feedbacks(client: &ApiClient, view: &mut View<Feedback>) -> bool {
    let status = view.status_filter();
    refresh(view, client.feedbacks(status)).await
}

/// First page, using the view's status filter.
pub async fn refresh_flood_reports(client: &ApiClient, view: &mut View<FloodReport>) -> bool {
    let status = view.status_filter();
    refresh(view, client.flood_reports(status, None)).await
}

/// Review a feedback entry, then reload the list. The list is only
/// reloaded when the write succeeded.
pub async fn review_feedback_and_refresh(
    client: &ApiClient,
    view: &mut View<Feedback>,
    id: &RecordId,
    status: ReviewStatus,
    note: Option<&str>,
) -> Result<(), ApiError> {
    client.review_feedback(id, status, note).await?;
    refresh_feedbacks(client, view).await;
    Ok(())
}

/// Review a flood report, then reload the list on success.
pub async fn review_flood_report_and_refresh(
    client: &ApiClient,
    view: &mut View<FloodReport>,
    id: &RecordId,
    status: ReviewStatus,
    note: Option<&str>,
) -> Result<(), ApiError> {
    client.review_flood_report(id, status, note).await?;
    refresh_flood_reports(client, view).await;
    Ok(())
}

/// Delete a banner, then reload the list on success.
pub async fn delete_event_banner_and_refresh(
    client: &ApiClient,
    view: &mut View<EventBanner>,
    id: &RecordId,
) -> Result<(), ApiError> {
    client.delete_event_banner(id).await?;
    refresh_event_banners(client, view).await;
    Ok(())
}
