use std::collections::BTreeMap;

use flood_admin_types::{Feedback, FloodReport, ReviewStatus};

/// Label used for records with no status, or a blank one.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Records that carry a moderation status.
pub trait Moderated {
    fn status_label(&self) -> Option<&str>;
}

impl Moderated for Feedback {
    fn status_label(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Moderated for FloodReport {
    fn status_label(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// Count of records per status label.
///
/// Keys iterate in lexicographic order so a chart built from the same data
/// always lays its bars out the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: BTreeMap<String, usize>,
}

impl StatusTally {
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Sum of all counts; equals the number of records tallied.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Labels and values as parallel vectors, the shape a bar chart wants.
    pub fn chart_series(&self) -> (Vec<String>, Vec<usize>) {
        self.counts
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .unzip()
    }

    fn record(&mut self, label: Option<&str>) {
        *self.counts.entry(normalize_label(label)).or_default() += 1;
    }
}

/// Chart label for a raw status. Known statuses collapse to their canonical
/// spelling with the same trim and case folding `ReviewStatus` parsing uses,
/// so the chart and `is_reviewable` agree on what "Pending" is.
pub fn normalize_label(label: Option<&str>) -> String {
    match label.map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<ReviewStatus>() {
            Ok(status) => status.as_str().to_string(),
            Err(_) => s.to_string(),
        },
        _ => UNKNOWN_STATUS.to_string(),
    }
}

impl<'a, T: Moderated + 'a> FromIterator<&'a T> for StatusTally {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        let mut tally = StatusTally::default();
        for record in iter {
            tally.record(record.status_label());
        }
        tally
    }
}

/// Tally `records` by status. An empty slice yields an empty tally.
pub fn tally<T: Moderated>(records: &[T]) -> StatusTally {
    records.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Row(Option<String>);

    impl Moderated for Row {
        fn status_label(&self) -> Option<&str> {
            self.0.as_deref()
        }
    }

    fn feedback(json: &str) -> Feedback {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn counts_by_status() {
        let records = vec![
            feedback(r#"{"id":1,"status":"Pending"}"#),
            feedback(r#"{"id":2,"status":"Pending"}"#),
            feedback(r#"{"id":3,"status":"Rejected"}"#),
        ];
        let t = tally(&records);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("Pending"), 2);
        assert_eq!(t.get("Rejected"), 1);
        assert_eq!(t.get("Approved"), 0);
    }

    #[test]
    fn missing_and_blank_status_are_unknown() {
        let records = vec![
            Row(None),
            Row(Some(String::new())),
            Row(Some("   ".into())),
            Row(Some("Resolved".into())),
        ];
        let t = tally(&records);
        assert_eq!(t.get(UNKNOWN_STATUS), 3);
        assert_eq!(t.get("Resolved"), 1);
    }

    #[test]
    fn empty_input_gives_empty_tally() {
        let t = tally::<Row>(&[]);
        assert!(t.is_empty());
        assert_eq!(t.total(), 0);
        assert_eq!(t.chart_series(), (vec![], vec![]));
    }

    #[test]
    fn known_statuses_merge_across_case_and_padding() {
        let records = vec![
            feedback(r#"{"id":1,"status":"Pending"}"#),
            feedback(r#"{"id":2,"status":" Pending"}"#),
            feedback(r#"{"id":3,"status":"pending"}"#),
            feedback(r#"{"id":4,"status":"On hold "}"#),
        ];
        let t = tally(&records);
        assert_eq!(t.get("Pending"), 3);
        assert_eq!(t.get("On hold"), 1);
        assert_eq!(t.len(), 2);
        // Every row counted under "Pending" is also offered for review.
        assert_eq!(records.iter().filter(|f| f.is_reviewable()).count(), t.get("Pending"));
    }

    #[test]
    fn chart_series_is_sorted() {
        let records = vec![
            Row(Some("Rejected".into())),
            Row(Some("Approved".into())),
            Row(Some("Pending".into())),
            Row(Some("Approved".into())),
        ];
        let (labels, values) = tally(&records).chart_series();
        assert_eq!(labels, vec!["Approved", "Pending", "Rejected"]);
        assert_eq!(values, vec![2, 1, 1]);
    }

    proptest! {
        #[test]
        fn counts_sum_to_input_length(
            statuses in prop::collection::vec(prop::option::of("[A-Za-z ]{0,8}"), 0..64)
        ) {
            let rows: Vec<Row> = statuses.into_iter().map(Row).collect();
            let t = tally(&rows);
            prop_assert_eq!(t.total(), rows.len());
            prop_assert_eq!(t.iter().map(|(_, n)| n).sum::<usize>(), rows.len());
        }
    }
}
