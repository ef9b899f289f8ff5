use crate::annotator::FragmentId;

/// External supplier of candidate text fragments.
///
/// The host's page-traversal layer implements this; the engine knows nothing
/// about any tree structure. The sequence must be restartable: each call to
/// `fragments` yields the current fragments from the start.
pub trait FragmentSource {
    fn fragments(&mut self) -> Box<dyn Iterator<Item = (FragmentId, String)> + '_>;
}

/// Fragment source over a fixed list, for tests and batch use.
pub struct VecFragmentSource {
    items: Vec<(FragmentId, String)>,
}

impl VecFragmentSource {
    pub fn new(items: Vec<(FragmentId, String)>) -> Self {
        VecFragmentSource { items }
    }

    /// Writes a rewritten fragment back, as a page layer would.
    pub fn apply(&mut self, id: FragmentId, text: String) {
        if let Some(item) = self.items.iter_mut().find(|(i, _)| *i == id) {
            item.1 = text;
        }
    }

    pub fn text_of(&self, id: FragmentId) -> Option<&str> {
        self.items
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, t)| t.as_str())
    }
}

impl FragmentSource for VecFragmentSource {
    fn fragments(&mut self) -> Box<dyn Iterator<Item = (FragmentId, String)> + '_> {
        Box::new(self.items.iter().map(|(id, text)| (*id, text.clone())))
    }
}
