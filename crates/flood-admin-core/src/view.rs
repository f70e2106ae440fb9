use std::fmt;

use flood_admin_types::ReviewStatus;
use tracing::debug;

use crate::filter::{Searchable, filter};

/// Why a view failed to load. All three are shown to the operator as the
/// same generic message; the distinction is kept for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never reached the server.
    Network,
    /// The server answered with a non-2xx status.
    Status,
    /// The body could not be decoded.
    Parse,
}

impl FailureKind {
    /// Operator-facing text. Identical for every kind; the kind itself only
    /// shows up in logs.
    pub fn message(self) -> &'static str {
        "Could not load data. Refresh to try again."
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network failure"),
            Self::Status => f.write_str("error status"),
            Self::Parse => f.write_str("malformed payload"),
        }
    }
}

/// Request lifecycle of a single view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Success(T),
    Failure(FailureKind),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            Self::Failure(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::Success(data) => ViewState::Success(f(data)),
            Self::Failure(kind) => ViewState::Failure(kind),
        }
    }
}

impl<T, E: Into<FailureKind>> From<Result<T, E>> for ViewState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Failure(e.into()),
        }
    }
}

/// Token handed out by [`View::begin_refresh`]. Only the most recently
/// issued ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// One list screen: the last fetched rows plus the operator's search text
/// and status filter.
///
/// The rows only change through `finish_refresh`. What the operator sees
/// (`visible`) is recomputed from the rows and the query on every call.
#[derive(Debug)]
pub struct View<R> {
    label: &'static str,
    state: ViewState<Vec<R>>,
    query: String,
    status_filter: Option<ReviewStatus>,
    issued: u64,
}

impl<R> View<R> {
    /// A fresh view is `Loading` until its first refresh lands.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: ViewState::Loading,
            query: String::new(),
            status_filter: None,
            issued: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn state(&self) -> &ViewState<Vec<R>> {
        &self.state
    }

    pub fn rows(&self) -> Option<&[R]> {
        self.state.data().map(Vec::as_slice)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn status_filter(&self) -> Option<ReviewStatus> {
        self.status_filter
    }

    /// Returns true when the filter actually changed. The status filter is
    /// applied server-side, so a change means the caller should refresh.
    pub fn set_status_filter(&mut self, status: Option<ReviewStatus>) -> bool {
        if self.status_filter == status {
            return false;
        }
        self.status_filter = status;
        true
    }

    /// Start a refresh. Supersedes every ticket issued before it.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.state = ViewState::Loading;
        RefreshTicket(self.issued)
    }

    /// Apply a fetch result. Results carrying a superseded ticket are
    /// dropped so a slow early response cannot overwrite a newer one.
    /// Returns whether the result was applied.
    pub fn finish_refresh<E: Into<FailureKind>>(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<R>, E>,
    ) -> bool {
        if ticket.0 != self.issued {
            debug!(
                view = self.label,
                ticket = ticket.0,
                latest = self.issued,
                "Discarding stale refresh result"
            );
            return false;
        }
        self.state = result.into();
        true
    }

    /// Operator-facing error line, if the last refresh failed: the view
    /// label followed by [`FailureKind::message`].
    pub fn error_message(&self) -> Option<String> {
        self.state
            .failure()
            .map(|kind| format!("{}: {}", self.label, kind.message()))
    }
}

impl<R: Searchable> View<R> {
    /// Rows matching the current query, in fetch order. Empty unless the
    /// last refresh succeeded.
    pub fn visible(&self) -> Vec<&R> {
        match self.rows() {
            Some(rows) => filter(rows, &self.query),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_admin_types::{RecordId, User};

    fn user(id: i64, email: &str) -> User {
        User {
            id: RecordId::Number(id),
            email: email.to_string(),
            full_name: None,
            phone_number: None,
            created_at: None,
        }
    }

    #[test]
    fn starts_loading() {
        let view: View<User> = View::new("users");
        assert!(view.state().is_loading());
        assert!(view.visible().is_empty());
        assert!(view.error_message().is_none());
    }

    #[test]
    fn success_then_filter() {
        let mut view = View::new("users");
        let ticket = view.begin_refresh();
        let applied = view.finish_refresh::<FailureKind>(
            ticket,
            Ok(vec![user(1, "hoa@x.com"), user(2, "lan@x.com")]),
        );
        assert!(applied);
        assert_eq!(view.visible().len(), 2);

        view.set_query("LAN");
        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, RecordId::Number(2));
        // Rows are untouched by the query.
        assert_eq!(view.rows().map(<[User]>::len), Some(2));
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut view = View::new("users");
        let first = view.begin_refresh();
        let second = view.begin_refresh();

        assert!(view.finish_refresh::<FailureKind>(second, Ok(vec![user(2, "new@x.com")])));
        assert!(!view.finish_refresh::<FailureKind>(first, Ok(vec![user(1, "old@x.com")])));

        let rows = view.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, RecordId::Number(2));
    }

    #[test]
    fn stale_failure_does_not_clobber_success() {
        let mut view = View::new("users");
        let first = view.begin_refresh();
        let second = view.begin_refresh();
        view.finish_refresh::<FailureKind>(second, Ok(vec![user(1, "a@x.com")]));
        view.finish_refresh(first, Err::<Vec<User>, _>(FailureKind::Network));
        assert!(view.state().data().is_some());
    }

    #[test]
    fn failure_then_recover() {
        let mut view: View<User> = View::new("users");
        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Err(FailureKind::Status));
        assert_eq!(view.state().failure(), Some(FailureKind::Status));
        assert_eq!(
            view.error_message().as_deref(),
            Some("users: Could not load data. Refresh to try again.")
        );
        assert!(view.visible().is_empty());

        let ticket = view.begin_refresh();
        view.finish_refresh::<FailureKind>(ticket, Ok(vec![user(1, "a@x.com")]));
        assert!(view.error_message().is_none());
        assert_eq!(view.visible().len(), 1);
    }

    #[test]
    fn every_failure_kind_shows_the_same_message() {
        let kinds = [FailureKind::Network, FailureKind::Status, FailureKind::Parse];
        for kind in kinds {
            assert_eq!(kind.message(), FailureKind::Network.message());
            let mut view: View<User> = View::new("flood reports");
            let ticket = view.begin_refresh();
            view.finish_refresh(ticket, Err(kind));
            assert_eq!(
                view.error_message(),
                Some(format!("flood reports: {}", kind.message()))
            );
        }
    }

    #[test]
    fn status_filter_change_is_reported() {
        let mut view: View<User> = View::new("feedback");
        assert!(view.set_status_filter(Some(ReviewStatus::Pending)));
        assert!(!view.set_status_filter(Some(ReviewStatus::Pending)));
        assert!(view.set_status_filter(None));
    }
}
