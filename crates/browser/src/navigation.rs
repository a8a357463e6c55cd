use std::collections::VecDeque;

/// Back/forward stack of one tab.
///
/// Recording a location while the cursor is behind the end discards the
/// forward entries first, the way every browser branches history.
///
/// Back and forward move the cursor at once but the engine reports the
/// resulting loads later. Until then their targets wait in `pending`, so a
/// late report for an earlier step is not taken for a new navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: Option<usize>,
    pending: VecDeque<String>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a location change reported by the engine.
    ///
    /// Returns `false` when `url` is the report of a back/forward step or is
    /// already the current entry.
    pub fn record(&mut self, url: &str) -> bool {
        if let Some(position) = self.pending.iter().position(|target| target == url) {
            self.pending.drain(..=position);
            return false;
        }
        self.pending.clear();

        if self.current() == Some(url) {
            return false;
        }

        if let Some(index) = self.index {
            self.entries.truncate(index + 1);
        }
        self.entries.push(url.to_string());
        self.index = Some(self.entries.len() - 1);
        true
    }

    /// Moves the cursor back and returns the location to load.
    pub fn go_back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        let index = self.index? - 1;
        self.traverse_to(index)
    }

    pub fn go_forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        let index = self.index? + 1;
        self.traverse_to(index)
    }

    fn traverse_to(&mut self, index: usize) -> Option<&str> {
        let target = self.entries.get(index)?;
        self.pending.push_back(target.clone());
        self.index = Some(index);
        Some(target.as_str())
    }

    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|index| index > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.index
            .is_some_and(|index| index + 1 < self.entries.len())
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index?).map(String::as_str)
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
