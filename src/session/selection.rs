//! Ordered selection set
//!
//! The user's working set of page identifiers. Order is significant and is
//! the sole source of truth for export order; the sequence never contains
//! duplicates. All operations are total functions over the current state:
//! absent or out-of-range identifiers are silently ignored, never errors.

/// Move `from_id` to the position currently occupied by `to_id`
///
/// Standard array move: the dragged element is removed and re-inserted at the
/// target's former index, shifting intermediate elements by one slot. Returns
/// the input unchanged when `from_id == to_id` or either id is absent, so the
/// result always has the same length and membership as the input.
#[must_use]
pub fn reorder(sequence: &[i64], from_id: i64, to_id: i64) -> Vec<i64> {
    let mut moved = sequence.to_vec();
    if from_id == to_id {
        return moved;
    }

    let from = sequence.iter().position(|&id| id == from_id);
    let to = sequence.iter().position(|&id| id == to_id);
    if let (Some(from), Some(to)) = (from, to) {
        let element = moved.remove(from);
        moved.insert(to, element);
    }

    moved
}

/// Ordered, duplicate-free working set of page identifiers
///
/// Membership against the active snapshot is not enforced here; the session
/// layer gates insertions and prunes stale ids after each load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<i64>,
}

impl Selection {
    /// Create an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Toggle membership of a page id
    ///
    /// If present the id is removed, preserving the order of the remaining
    /// elements; if absent it is appended at the end. Appending is the sole
    /// insertion path - there is no insert-at-position.
    pub fn toggle(&mut self, page_id: i64) {
        if let Some(index) = self.ids.iter().position(|&id| id == page_id) {
            self.ids.remove(index);
        } else {
            self.ids.push(page_id);
        }
    }

    /// Replace the entire selection with the currently visible ids
    ///
    /// Overwrites any prior manual ordering; the new order is the displayed
    /// order. Duplicate ids in the input are kept once, first occurrence wins.
    pub fn select_all(&mut self, visible_ids: &[i64]) {
        self.ids.clear();
        for &id in visible_ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Remove every selected id
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Move `from_id` to the slot currently held by `to_id`
    ///
    /// No-op when the ids are equal or either is not selected. Length and
    /// membership are invariant across this operation.
    pub fn reorder(&mut self, from_id: i64, to_id: i64) {
        self.ids = reorder(&self.ids, from_id, to_id);
    }

    /// Drop ids that are not present in `known`, preserving order
    pub fn retain_known(&mut self, known: &[i64]) {
        self.ids.retain(|id| known.contains(id));
    }

    /// Whether the id is currently selected
    #[must_use]
    pub fn contains(&self, page_id: i64) -> bool {
        self.ids.contains(&page_id)
    }

    /// Selected ids in their current order
    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Number of selected ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_appends_then_removes() {
        let mut selection = Selection::new();

        selection.toggle(3);
        selection.toggle(1);
        selection.toggle(2);
        assert_eq!(selection.ids(), &[3, 1, 2]);

        selection.toggle(1);
        assert_eq!(selection.ids(), &[3, 2]);
    }

    #[test]
    fn test_toggle_parity_never_duplicates() {
        let mut selection = Selection::new();
        let sequence = [5, 7, 5, 9, 7, 7, 5];

        for id in sequence {
            selection.toggle(id);
        }

        // 5 toggled 3x (odd) -> present once; 7 toggled 3x -> present once;
        // 9 toggled once -> present once
        assert_eq!(selection.ids(), &[9, 7, 5]);
        let mut deduped = selection.ids().to_vec();
        deduped.dedup();
        assert_eq!(deduped.len(), selection.len());
    }

    #[test]
    fn test_reorder_moves_to_target_slot() {
        // Moving 1 onto 2's former slot in [2, 1] yields [1, 2]
        assert_eq!(reorder(&[2, 1], 1, 2), vec![1, 2]);
        assert_eq!(reorder(&[1, 2, 3, 4], 1, 3), vec![2, 3, 1, 4]);
        assert_eq!(reorder(&[1, 2, 3, 4], 4, 2), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_reorder_self_is_noop() {
        assert_eq!(reorder(&[1, 2, 3], 2, 2), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_absent_ids_ignored() {
        assert_eq!(reorder(&[1, 2, 3], 9, 2), vec![1, 2, 3]);
        assert_eq!(reorder(&[1, 2, 3], 1, 9), vec![1, 2, 3]);
        assert_eq!(reorder(&[], 1, 2), Vec::<i64>::new());
    }

    #[test]
    fn test_reorder_preserves_membership_and_length() {
        let input = vec![4, 8, 15, 16, 23, 42];

        for &from in &input {
            for &to in &input {
                let moved = reorder(&input, from, to);
                assert_eq!(moved.len(), input.len());
                let mut sorted_input = input.clone();
                let mut sorted_moved = moved;
                sorted_input.sort_unstable();
                sorted_moved.sort_unstable();
                assert_eq!(sorted_input, sorted_moved);
            }
        }
    }

    #[test]
    fn test_select_all_overwrites_manual_order() {
        let mut selection = Selection::new();
        selection.toggle(9);
        selection.toggle(1);

        selection.select_all(&[2, 3, 4]);

        assert_eq!(selection.ids(), &[2, 3, 4]);
    }

    #[test]
    fn test_select_all_dedupes_first_occurrence_wins() {
        let mut selection = Selection::new();

        selection.select_all(&[2, 3, 2, 4, 3]);

        assert_eq!(selection.ids(), &[2, 3, 4]);
    }

    #[test]
    fn test_retain_known_prunes_in_order() {
        let mut selection = Selection::new();
        selection.select_all(&[5, 6, 7, 8]);

        selection.retain_known(&[8, 6]);

        assert_eq!(selection.ids(), &[6, 8]);
    }

    #[test]
    fn test_clear_empties_selection() {
        let mut selection = Selection::new();
        selection.toggle(1);

        selection.clear();

        assert!(selection.is_empty());
    }
}
