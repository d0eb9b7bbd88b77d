use serde::{Deserialize, Serialize};

/// The checked rows of a list, keyed by row id. Ids keep the order they
/// were selected in, with no duplicates; bulk operations walk that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection<Id> {
    ids: Vec<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<Id: Copy + Eq> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: Id) {
        if let Some(pos) = self.ids.iter().position(|known| *known == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Replaces the selection, keeping the first occurrence of each id.
    pub fn set_all(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    pub fn remove(&mut self, id: Id) {
        self.ids.retain(|known| *known != id);
    }

    /// Drops every id the predicate rejects, e.g. ids no longer present
    /// in the backing collection.
    pub fn retain(&mut self, keep: impl Fn(Id) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        selection.toggle(5);
        selection.toggle(2);
        assert_eq!(selection.ids(), [5, 2]);
        selection.toggle(5);
        assert_eq!(selection.ids(), [2]);
    }

    #[test]
    fn set_all_replaces_and_dedupes() {
        let mut selection = Selection::new();
        selection.toggle(9);
        selection.set_all([3, 1, 3, 2]);
        assert_eq!(selection.ids(), [3, 1, 2]);
    }

    #[test]
    fn retain_prunes_stale_ids() {
        let mut selection = Selection::new();
        selection.set_all([1, 2, 3, 4]);
        selection.retain(|id| id % 2 == 0);
        assert_eq!(selection.ids(), [2, 4]);
    }

    #[test]
    fn remove_is_a_no_op_for_unknown_ids() {
        let mut selection = Selection::new();
        selection.set_all([1, 2]);
        selection.remove(7);
        assert_eq!(selection.ids(), [1, 2]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn toggling_twice_preserves_membership(
                ids in prop::collection::vec(0..20i64, 0..12),
                id in 0..20i64,
            ) {
                let mut selection = Selection::new();
                selection.set_all(ids);
                let before = selection.clone();
                selection.toggle(id);
                selection.toggle(id);
                // A re-added id lands at the end, so compare membership
                // rather than insertion order.
                let mut after_ids = selection.ids().to_vec();
                let mut before_ids = before.ids().to_vec();
                after_ids.sort_unstable();
                before_ids.sort_unstable();
                prop_assert_eq!(after_ids, before_ids);
            }

            #[test]
            fn set_all_never_keeps_duplicates(
                ids in prop::collection::vec(0..8i64, 0..32),
            ) {
                let mut selection = Selection::new();
                selection.set_all(ids);
                let mut seen = selection.ids().to_vec();
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), selection.len());
            }
        }
    }
}
