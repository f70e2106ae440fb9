use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Moderation state of a feedback entry or flood report.
///
/// Serialized as the bare variant name, which is what the API expects in
/// both the `status` query parameter and review bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Processing,
    Approved,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown review status: {0:?}")]
pub struct UnknownStatus(pub String);

impl ReviewStatus {
    /// Filter choices offered on the feedback list.
    pub const FEEDBACK_FILTERS: [ReviewStatus; 4] =
        [Self::Pending, Self::Processing, Self::Resolved, Self::Rejected];

    /// Filter choices offered on the flood report list.
    pub const FLOOD_REPORT_FILTERS: [ReviewStatus; 3] =
        [Self::Pending, Self::Approved, Self::Rejected];

    /// Outcomes a moderator can pick for a pending record.
    pub const REVIEW_OUTCOMES: [ReviewStatus; 2] = [Self::Approved, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Approved => "Approved",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = UnknownStatus;

    /// Case-insensitive, so labels typed on a command line or echoed back by
    /// the API in a different casing still resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [
            Self::Pending,
            Self::Processing,
            Self::Approved,
            Self::Resolved,
            Self::Rejected,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_casing() {
        assert_eq!("pending".parse::<ReviewStatus>(), Ok(ReviewStatus::Pending));
        assert_eq!(" REJECTED ".parse::<ReviewStatus>(), Ok(ReviewStatus::Rejected));
        assert!("archived".parse::<ReviewStatus>().is_err());
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&ReviewStatus::Approved).unwrap();
        assert_eq!(json, "\"Approved\"");
    }

    #[test]
    fn review_outcomes_exclude_pending() {
        for outcome in ReviewStatus::REVIEW_OUTCOMES {
            assert_ne!(outcome, ReviewStatus::Pending);
        }
    }
}
