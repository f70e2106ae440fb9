use flood_admin_types::{EventBanner, Feedback, FloodReport, User};

/// Records that can be matched by a search box.
///
/// `search_fields` yields the text a query is matched against. Absent
/// optional fields are skipped, never matched as empty strings.
pub trait Searchable {
    fn search_fields(&self) -> impl Iterator<Item = &str>;
}

impl Searchable for User {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.email.as_str()).chain(self.full_name.as_deref())
    }
}

impl Searchable for EventBanner {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.description.as_deref())
    }
}

impl Searchable for Feedback {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.description.as_deref())
    }
}

impl Searchable for FloodReport {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
    }
}

/// Case-insensitive substring match of `query` against any search field.
pub fn matches<T: Searchable>(record: &T, query: &str) -> bool {
    contains_folded(record, &query.to_lowercase())
}

/// Records with at least one field containing `query`, in input order.
/// An empty query keeps everything.
pub fn filter<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| contains_folded(*record, &needle))
        .collect()
}

fn contains_folded<T: Searchable>(record: &T, needle: &str) -> bool {
    record
        .search_fields()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_admin_types::RecordId;
    use proptest::prelude::*;

    fn user(id: i64, email: &str, full_name: Option<&str>) -> User {
        User {
            id: RecordId::Number(id),
            email: email.to_string(),
            full_name: full_name.map(str::to_string),
            phone_number: None,
            created_at: None,
        }
    }

    fn ids(rows: &[&User]) -> Vec<RecordId> {
        rows.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn matches_name_substring() {
        let users = vec![user(1, "a@x.com", Some("An")), user(2, "b@x.com", Some("Bao"))];
        let hits = filter(&users, "an");
        assert_eq!(ids(&hits), vec![RecordId::Number(1)]);
    }

    #[test]
    fn matches_email() {
        let users = vec![user(1, "hoa@city.vn", None), user(2, "lan@city.vn", Some("Lan"))];
        assert_eq!(ids(&filter(&users, "HOA@")), vec![RecordId::Number(1)]);
        assert_eq!(filter(&users, "city.vn").len(), 2);
    }

    #[test]
    fn missing_name_never_matches() {
        let users = vec![user(1, "x@y.z", None)];
        assert!(filter(&users, "none").is_empty());
    }

    #[test]
    fn banner_matches_description() {
        let banner = EventBanner {
            id: RecordId::Number(3),
            title: "Lantern night".into(),
            description: Some("Riverside parade".into()),
            image_url: None,
        };
        assert!(matches(&banner, "RIVERSIDE"));
        assert!(!matches(&banner, "market"));
    }

    #[test]
    fn report_matches_title_only() {
        let report: FloodReport = serde_json::from_str(
            r#"{"id":1,"title":"Water on Le Loi street","status":"Pending","User":{"FullName":"Nam"}}"#,
        )
        .unwrap();
        assert!(matches(&report, "le loi"));
        assert!(!matches(&report, "nam"));
    }

    #[test]
    fn feedback_matches_title_or_description() {
        let rows: Vec<Feedback> = serde_json::from_str(
            r#"[
                {"id":1,"title":"Drain blocked","description":"Near the Ben Thanh market","status":"Pending"},
                {"id":2,"title":"App crash","Status":"Resolved"},
                {"id":3,"title":"Market map pin wrong","status":"Pending"}
            ]"#,
        )
        .unwrap();
        let hit_ids: Vec<RecordId> = filter(&rows, "MARKET").iter().map(|f| f.id.clone()).collect();
        assert_eq!(hit_ids, vec![RecordId::Number(1), RecordId::Number(3)]);
        // Rows without a description still match on their title alone.
        assert_eq!(filter(&rows, "near").len(), 1);
        assert_eq!(filter(&rows, "crash").len(), 1);
        assert_eq!(crate::tally::tally(&rows).get("Pending"), 2);
    }

    fn arb_users() -> impl Strategy<Value = Vec<User>> {
        prop::collection::vec(
            ("[a-z]{1,6}@[a-z]{1,4}\\.com", prop::option::of("[A-Za-z ]{0,10}")),
            0..32,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (email, name))| user(i as i64, &email, name.as_deref()))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn empty_query_keeps_everything_in_order(users in arb_users()) {
            let hits = filter(&users, "");
            prop_assert_eq!(hits.len(), users.len());
            for (hit, original) in hits.iter().zip(&users) {
                prop_assert_eq!(&hit.id, &original.id);
            }
        }

        #[test]
        fn unmatched_query_gives_nothing(users in arb_users()) {
            // Generated fields never contain digits.
            prop_assert!(filter(&users, "0123").is_empty());
        }

        #[test]
        fn query_case_does_not_matter(users in arb_users(), query in "[a-zA-Z]{1,3}") {
            let upper = ids(&filter(&users, &query.to_uppercase()));
            let lower = ids(&filter(&users, &query.to_lowercase()));
            prop_assert_eq!(upper, lower);
        }

        #[test]
        fn hits_preserve_relative_order(users in arb_users(), query in "[a-z]{1,2}") {
            let hits = filter(&users, &query);
            let positions: Vec<usize> = hits
                .iter()
                .map(|hit| users.iter().position(|u| u.id == hit.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
