use super::world::Handle;

/// Insertion-ordered set of selected entities.
///
/// The most recently added entity is the *primary* selection; the viewport
/// renderer highlights it with a different colour than the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entities: Vec<Handle>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Adds `handle`; re-adding an already selected entity is a no-op and
    /// does not change the primary.  Returns `true` when it was added.
    pub fn add(&mut self, handle: Handle) -> bool {
        if self.contains(handle) {
            return false;
        }
        self.entities.push(handle);
        true
    }

    /// Returns `true` when `handle` was selected.
    pub fn remove(&mut self, handle: Handle) -> bool {
        let before = self.entities.len();
        self.entities.retain(|h| *h != handle);
        self.entities.len() != before
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entities.contains(&handle)
    }

    /// Last selected entity.
    pub fn primary(&self) -> Option<Handle> {
        self.entities.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_ordered() {
        let mut s = Selection::new();
        assert!(s.add(Handle(1)));
        assert!(s.add(Handle(2)));
        assert!(!s.add(Handle(1)));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![Handle(1), Handle(2)]);
        assert_eq!(s.primary(), Some(Handle(2)));
    }

    #[test]
    fn remove_updates_primary() {
        let mut s = Selection::new();
        s.add(Handle(1));
        s.add(Handle(2));
        assert!(s.remove(Handle(2)));
        assert!(!s.remove(Handle(2)));
        assert_eq!(s.primary(), Some(Handle(1)));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.primary(), None);
    }
}
