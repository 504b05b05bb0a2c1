//! Bounded selection of records for the side-by-side comparison view.

/// Maximum number of photos compared at once.
pub const MAX_COMPARED: usize = 3;

/// Ordered list of at most three selected record ids. Not persisted.
///
/// When a fourth id is toggled in, the new id overwrites the selection
/// at index 1; the first and last slots keep their occupants. This
/// fixed, non-FIFO replacement policy is intentional and must stay
/// as-is.
#[derive(Debug, Clone, Default)]
pub struct CompareSelection {
    ids: Vec<String>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of `id`: deselect if present, otherwise select,
    /// overwriting index 1 when already at capacity.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.ids.remove(pos);
        } else if self.ids.len() < MAX_COMPARED {
            self.ids.push(id.to_string());
        } else {
            self.ids[1] = id.to_string();
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop selected ids that no longer exist in the store.
    pub fn retain_known(&mut self, known: impl Fn(&str) -> bool) {
        self.ids.retain(|id| known(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eviction_replaces_index_one() {
        let mut selection = CompareSelection::new();
        selection.toggle("A");
        selection.toggle("B");
        selection.toggle("C");
        selection.toggle("D");
        assert_eq!(selection.ids(), &["A", "D", "C"]);
    }

    #[test]
    fn test_toggle_deselects() {
        let mut selection = CompareSelection::new();
        selection.toggle("A");
        selection.toggle("B");
        selection.toggle("A");
        assert_eq!(selection.ids(), &["B"]);
    }

    #[test]
    fn test_appends_under_capacity() {
        let mut selection = CompareSelection::new();
        selection.toggle("A");
        selection.toggle("B");
        assert_eq!(selection.ids(), &["A", "B"]);
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("A"));
        assert!(!selection.contains("C"));
    }

    #[test]
    fn test_repeated_eviction() {
        let mut selection = CompareSelection::new();
        for id in ["A", "B", "C", "D", "E"] {
            selection.toggle(id);
        }
        // A,B,C -> D overwrites B -> A,D,C -> E overwrites D
        assert_eq!(selection.ids(), &["A", "E", "C"]);
    }

    #[test]
    fn test_eviction_keeps_first_and_last_slots() {
        let mut selection = CompareSelection::new();
        selection.toggle("A");
        selection.toggle("B");
        selection.toggle("C");
        selection.toggle("D");
        assert_eq!(selection.ids().first().map(String::as_str), Some("A"));
        assert_eq!(selection.ids().last().map(String::as_str), Some("C"));
        assert_eq!(selection.len(), MAX_COMPARED);
    }

    #[test]
    fn test_retain_known() {
        let mut selection = CompareSelection::new();
        selection.toggle("A");
        selection.toggle("B");
        selection.retain_known(|id| id == "B");
        assert_eq!(selection.ids(), &["B"]);
    }
}
