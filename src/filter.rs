//! Free-text and category filtering over the photo collection.

use crate::store::PhotoRecord;

/// Filter sentinel matching every category.
pub const ALL_CATEGORIES: &str = "All";

/// Combined search predicate: a case-insensitive substring match over
/// filename, tags and notes, plus an exact (case-sensitive) category
/// match unless the category is the `"All"` sentinel.
#[derive(Debug, Clone)]
pub struct PhotoFilter {
    pub query: String,
    pub category: String,
}

impl Default for PhotoFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl PhotoFilter {
    pub fn matches(&self, record: &PhotoRecord) -> bool {
        self.matches_text(record) && self.matches_category(record)
    }

    /// Stable filter: output preserves the input ordering.
    pub fn apply<'a>(&self, records: &'a [PhotoRecord]) -> Vec<&'a PhotoRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    fn matches_text(&self, record: &PhotoRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        record.filename.to_lowercase().contains(&needle)
            || record.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            || record.notes.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, record: &PhotoRecord) -> bool {
        self.category == ALL_CATEGORIES || record.category == self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record::{CameraSettings, PhotoLocation};

    fn record(id: &str, filename: &str, notes: &str, tags: &[&str], category: &str) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            url: String::new(),
            filename: filename.to_string(),
            upload_date: "2024-05-10".to_string(),
            capture_date: String::new(),
            location: PhotoLocation::default(),
            notes: notes.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: category.to_string(),
            metadata: CameraSettings::default(),
        }
    }

    fn sample() -> Vec<PhotoRecord> {
        vec![
            record("a", "mountain.jpg", "summit view", &["Alps", "Snow"], "Travel"),
            record("b", "forest.jpg", "morning fog", &["Trees"], "Nature"),
            record("c", "night.jpg", "long exposure", &["City"], "Architecture"),
        ]
    }

    #[test]
    fn test_all_and_empty_query_is_identity() {
        let records = sample();
        let filter = PhotoFilter::default();
        let out = filter.apply(&records);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].id, "a");
        assert_eq!(out[1].id, "b");
        assert_eq!(out[2].id, "c");
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample();
        let filter = PhotoFilter {
            query: "zebra".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive_over_tags() {
        let records = sample();
        let filter = PhotoFilter {
            query: "alps".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        let out = filter.apply(&records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }

    #[test]
    fn test_query_matches_notes_and_filename() {
        let records = sample();
        let by_notes = PhotoFilter {
            query: "FOG".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        assert_eq!(by_notes.apply(&records)[0].id, "b");

        let by_name = PhotoFilter {
            query: "night".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        assert_eq!(by_name.apply(&records)[0].id, "c");
    }

    #[test]
    fn test_category_match_is_exact_and_case_sensitive() {
        let records = sample();
        let exact = PhotoFilter {
            query: String::new(),
            category: "Nature".to_string(),
        };
        assert_eq!(exact.apply(&records).len(), 1);

        let wrong_case = PhotoFilter {
            query: String::new(),
            category: "nature".to_string(),
        };
        assert!(wrong_case.apply(&records).is_empty());
    }

    #[test]
    fn test_both_predicates_required() {
        let records = sample();
        let filter = PhotoFilter {
            query: "summit".to_string(),
            category: "Nature".to_string(),
        };
        assert!(filter.apply(&records).is_empty());
    }
}
