//! Derived statistics over the photo collection.
//!
//! Pure computation, recomputed from the full collection on every read.
//! Empty input yields empty/zero outputs.

use std::collections::HashSet;

use crate::store::PhotoRecord;

/// Aggregate numbers backing the Overview view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    /// Category -> count, in first-seen order.
    pub categories: Vec<(String, usize)>,
    /// Upload month (`YYYY-MM`) -> count, sorted ascending by key.
    /// Lexicographic sort is correct for ISO year-month strings.
    pub uploads_by_month: Vec<(String, usize)>,
    /// Distinct non-empty location display names.
    pub unique_locations: usize,
    /// Distinct tag strings across all records.
    pub unique_tags: usize,
}

impl LibraryStats {
    pub fn compute(records: &[PhotoRecord]) -> Self {
        let mut categories: Vec<(String, usize)> = Vec::new();
        for record in records {
            match categories.iter_mut().find(|(c, _)| *c == record.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((record.category.clone(), 1)),
            }
        }

        let mut uploads_by_month: Vec<(String, usize)> = Vec::new();
        for record in records {
            let month = record.upload_month();
            match uploads_by_month.iter_mut().find(|(m, _)| m == month) {
                Some((_, count)) => *count += 1,
                None => uploads_by_month.push((month.to_string(), 1)),
            }
        }
        uploads_by_month.sort_by(|a, b| a.0.cmp(&b.0));

        let locations: HashSet<&str> = records
            .iter()
            .map(|r| r.location.name.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        let tags: HashSet<&str> = records
            .iter()
            .flat_map(|r| r.tags.iter().map(|t| t.as_str()))
            .collect();

        Self {
            total: records.len(),
            categories,
            uploads_by_month,
            unique_locations: locations.len(),
            unique_tags: tags.len(),
        }
    }

    /// Number of distinct upload months, shown as "active months".
    pub fn active_months(&self) -> usize {
        self.uploads_by_month.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record::{CameraSettings, PhotoLocation};

    fn record(id: &str, category: &str, month_day: &str, location: &str, tags: &[&str]) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            url: String::new(),
            filename: format!("{}.jpg", id),
            upload_date: format!("2024-{}", month_day),
            capture_date: String::new(),
            location: PhotoLocation {
                lat: 0.0,
                lng: 0.0,
                name: location.to_string(),
            },
            notes: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: category.to_string(),
            metadata: CameraSettings::default(),
        }
    }

    #[test]
    fn test_category_histogram_first_seen_order() {
        let records = vec![
            record("a", "Travel", "05-10", "Alps", &[]),
            record("b", "Nature", "05-12", "Forest", &[]),
            record("c", "Travel", "05-15", "Alps", &[]),
        ];
        let stats = LibraryStats::compute(&records);
        assert_eq!(
            stats.categories,
            vec![("Travel".to_string(), 2), ("Nature".to_string(), 1)]
        );
    }

    #[test]
    fn test_uploads_by_month_sorted() {
        let records = vec![
            record("a", "Travel", "11-01", "X", &[]),
            record("b", "Travel", "02-01", "X", &[]),
            record("c", "Travel", "11-20", "X", &[]),
        ];
        let stats = LibraryStats::compute(&records);
        assert_eq!(
            stats.uploads_by_month,
            vec![("2024-02".to_string(), 1), ("2024-11".to_string(), 2)]
        );
        assert_eq!(stats.active_months(), 2);
    }

    #[test]
    fn test_unique_locations_ignore_empty() {
        let records = vec![
            record("a", "Travel", "05-01", "Alps", &[]),
            record("b", "Travel", "05-02", "", &[]),
            record("c", "Travel", "05-03", "Alps", &[]),
            record("d", "Travel", "05-04", "Pier", &[]),
        ];
        let stats = LibraryStats::compute(&records);
        assert_eq!(stats.unique_locations, 2);
    }

    #[test]
    fn test_unique_tags_across_records() {
        let records = vec![
            record("a", "Travel", "05-01", "X", &["sun", "sea"]),
            record("b", "Travel", "05-02", "X", &["sea", "sand"]),
        ];
        let stats = LibraryStats::compute(&records);
        assert_eq!(stats.unique_tags, 3);
    }

    #[test]
    fn test_multibyte_upload_date_groups_whole() {
        let records = vec![
            record("a", "Travel", "0é-10", "X", &[]),
            record("b", "Travel", "05-01", "X", &[]),
        ];
        let stats = LibraryStats::compute(&records);
        assert_eq!(
            stats.uploads_by_month,
            vec![("2024-05".to_string(), 1), ("2024-0é-10".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_input() {
        let stats = LibraryStats::compute(&[]);
        assert_eq!(stats, LibraryStats::default());
    }
}
