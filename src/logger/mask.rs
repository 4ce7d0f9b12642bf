//! Mask registry: column names whose bound values are redacted in log lines.

#![allow(missing_docs)]

use std::collections::VecDeque;

use crate::resolver::ColumnOrder;

/// Ordered list of sensitive column names.
///
/// Duplicates are kept; [`MaskRegistry::remove`] deletes one occurrence, so
/// a name added twice stays masked until it has been removed twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskRegistry {
    columns: Vec<String>,
}

impl MaskRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn add(&mut self, column: impl Into<String>) {
        self.columns.push(column.into());
    }

    /// Remove the first occurrence of `column`. Returns whether one was found.
    pub fn remove(&mut self, column: &str) -> bool {
        match self.columns.iter().position(|existing| existing == column) {
            Some(idx) => {
                self.columns.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|existing| existing == column)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Placeholder positions in `order` that bind a registered column.
    #[must_use]
    pub fn mask_indices(&self, order: &ColumnOrder) -> MaskIndexSet {
        if self.columns.is_empty() {
            return MaskIndexSet::default();
        }
        order
            .iter()
            .enumerate()
            .filter(|(_, column)| self.contains(column))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl From<Vec<String>> for MaskRegistry {
    fn from(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl FromIterator<String> for MaskRegistry {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Ascending argument positions to redact, consumed front to back while the
/// argument list is walked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskIndexSet {
    pending: VecDeque<usize>,
}

impl MaskIndexSet {
    /// Pop the head if it equals `index`.
    pub fn take_if_head(&mut self, index: usize) -> bool {
        if self.pending.front() == Some(&index) {
            self.pending.pop_front();
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.pending.iter().copied()
    }
}

impl FromIterator<usize> for MaskIndexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(columns: &[&str]) -> ColumnOrder {
        columns.iter().copied().collect()
    }

    #[test]
    fn indices_follow_column_order() {
        let mut registry = MaskRegistry::new();
        registry.add("password");
        let set = registry.mask_indices(&order(&["email", "password", "id", "password"]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn remove_deletes_only_first_occurrence() {
        let mut registry = MaskRegistry::from(vec![
            "token".to_string(),
            "email".to_string(),
            "token".to_string(),
        ]);
        assert!(registry.remove("token"));
        assert_eq!(registry.names(), ["email".to_string(), "token".to_string()]);
        assert!(registry.contains("token"));
        assert!(registry.remove("token"));
        assert!(!registry.contains("token"));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut registry: MaskRegistry = vec!["a".to_string()].into_iter().collect();
        assert!(!registry.remove("b"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_then_remove_restores_masking() {
        let mut registry = MaskRegistry::from(vec!["b".to_string()]);
        let cols = order(&["a", "b", "c"]);
        let before = registry.mask_indices(&cols);
        registry.add("c");
        assert_eq!(registry.mask_indices(&cols).len(), 2);
        registry.remove("c");
        assert_eq!(registry.mask_indices(&cols), before);
    }

    #[test]
    fn take_if_head_only_advances_on_match() {
        let mut set: MaskIndexSet = [1, 2].into_iter().collect();
        assert!(!set.take_if_head(0));
        assert!(set.take_if_head(1));
        assert!(set.take_if_head(2));
        assert!(set.is_empty());
        assert!(!set.take_if_head(3));
    }
}
