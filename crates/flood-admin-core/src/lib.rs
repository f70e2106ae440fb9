/// Client-side data shaping for the admin views.
///
/// Everything here is pure and synchronous: the tally that feeds the
/// feedback chart, the text filter behind each search box, and the
/// per-view request lifecycle. Network access lives in flood-admin-client.

pub mod filter;
pub mod tally;
pub mod view;

pub use filter::{Searchable, filter, matches};
pub use tally::{Moderated, StatusTally, UNKNOWN_STATUS, normalize_label, tally};
pub use view::{FailureKind, RefreshTicket, View, ViewState};
