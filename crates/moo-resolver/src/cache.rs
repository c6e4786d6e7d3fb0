//! Resolution session state.

use std::collections::HashSet;

/// Package ids already resolved in this session, compared ignoring ASCII
/// case. An id is marked before its dependencies are walked, which is what
/// ends dependency cycles.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as visited. Returns `false` if already visited.
    pub fn visit(&mut self, id: &str) -> bool {
        self.visited.insert(id.to_ascii_lowercase())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.visited.contains(&id.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
