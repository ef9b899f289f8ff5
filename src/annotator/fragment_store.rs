use std::collections::HashMap;

use super::annotator_model::FragmentId;

/// Original text keyed by fragment identity, enabling restoration.
///
/// The annotator is the sole writer. A fragment with an entry here is in the
/// Annotated state and must be restored before it may be annotated again;
/// that rule is what prevents compounding re-conversion of already-rewritten
/// text. No ordering guarantees.
#[derive(Debug, Default)]
pub struct FragmentStore {
    originals: HashMap<FragmentId, String>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: FragmentId) -> bool {
        self.originals.contains_key(&id)
    }

    /// Records the pre-replacement text. The first write wins; an entry is
    /// never overwritten while the fragment stays annotated.
    pub fn insert_original(&mut self, id: FragmentId, original: String) {
        self.originals.entry(id).or_insert(original);
    }

    /// Removes and returns the original text, transitioning the fragment
    /// back to Unannotated. `None` for fragments that were never annotated.
    pub fn take(&mut self, id: FragmentId) -> Option<String> {
        self.originals.remove(&id)
    }

    /// Empties the store, returning every original keyed by fragment.
    pub fn drain_all(&mut self) -> HashMap<FragmentId, String> {
        std::mem::take(&mut self.originals)
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let mut store = FragmentStore::new();
        store.insert_original(FragmentId(1), "first".to_string());
        store.insert_original(FragmentId(1), "second".to_string());
        assert_eq!(store.take(FragmentId(1)), Some("first".to_string()));
    }

    #[test]
    fn take_removes_the_entry() {
        let mut store = FragmentStore::new();
        store.insert_original(FragmentId(7), "text".to_string());
        assert!(store.contains(FragmentId(7)));
        assert_eq!(store.take(FragmentId(7)), Some("text".to_string()));
        assert_eq!(store.take(FragmentId(7)), None);
        assert!(store.is_empty());
    }

    #[test]
    fn drain_returns_everything() {
        let mut store = FragmentStore::new();
        store.insert_original(FragmentId(1), "a".to_string());
        store.insert_original(FragmentId(2), "b".to_string());
        let drained = store.drain_all();
        assert_eq!(drained.len(), 2);
        assert!(store.is_empty());
    }
}
