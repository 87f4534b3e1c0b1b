//! Layout comparison between two item sequences

use crate::Item;
use std::collections::HashMap;

/// Differences between a current layout and a candidate layout, keyed by item id.
///
/// Ordering differences alone are not reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDiff {
    /// Ids present only in the candidate layout
    pub added: Vec<String>,
    /// Ids present only in the current layout
    pub removed: Vec<String>,
    /// Ids present in both whose contents differ
    pub changed: Vec<String>,
}

impl LayoutDiff {
    /// Compare `current` against `candidate`
    pub fn between(current: &[Item], candidate: &[Item]) -> Self {
        let current_by_id: HashMap<&str, &Item> =
            current.iter().map(|item| (item.id.as_str(), item)).collect();
        let candidate_by_id: HashMap<&str, &Item> =
            candidate.iter().map(|item| (item.id.as_str(), item)).collect();

        let mut diff = LayoutDiff::default();

        for item in candidate {
            match current_by_id.get(item.id.as_str()) {
                None => diff.added.push(item.id.clone()),
                Some(existing) if *existing != item => diff.changed.push(item.id.clone()),
                Some(_) => {}
            }
        }

        for item in current {
            if !candidate_by_id.contains_key(item.id.as_str()) {
                diff.removed.push(item.id.clone());
            }
        }

        diff
    }

    /// Whether the two layouts are equivalent
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of affected items
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Short human-readable summary
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No changes".to_string();
        }
        format!(
            "{} added, {} removed, {} changed",
            self.added.len(),
            self.removed.len(),
            self.changed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, x: f64, y: f64) -> Item {
        Item::new(id, "🎲", x, y).with_id(id)
    }

    #[test]
    fn test_identical_layouts() {
        let layout = vec![item("a", 0.0, 0.0), item("b", 1.0, 1.0)];
        let diff = LayoutDiff::between(&layout, &layout);
        assert!(diff.is_empty());
        assert_eq!(diff.summary(), "No changes");
    }

    #[test]
    fn test_order_is_ignored() {
        let current = vec![item("a", 0.0, 0.0), item("b", 1.0, 1.0)];
        let candidate = vec![item("b", 1.0, 1.0), item("a", 0.0, 0.0)];
        assert!(LayoutDiff::between(&current, &candidate).is_empty());
    }

    #[test]
    fn test_added_removed_changed() {
        let current = vec![item("a", 0.0, 0.0), item("b", 1.0, 1.0)];
        let candidate = vec![item("a", 9.0, 0.0), item("c", 2.0, 2.0)];
        let diff = LayoutDiff::between(&current, &candidate);

        assert_eq!(diff.added, vec!["c".to_string()]);
        assert_eq!(diff.removed, vec!["b".to_string()]);
        assert_eq!(diff.changed, vec!["a".to_string()]);
        assert_eq!(diff.len(), 3);
        assert_eq!(diff.summary(), "1 added, 1 removed, 1 changed");
    }
}
