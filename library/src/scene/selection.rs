//! Selection bookkeeping for the scene.

use std::collections::HashSet;
use uuid::Uuid;

/// Anything the user can select on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneItem {
    Node(Uuid),
    Connection(Uuid),
}

#[derive(Default, Debug)]
pub(crate) struct Selection {
    items: HashSet<SceneItem>,
}

impl Selection {
    pub fn insert(&mut self, item: SceneItem) {
        self.items.insert(item);
    }

    pub fn remove(&mut self, item: &SceneItem) {
        self.items.remove(item);
    }

    pub fn contains(&self, item: &SceneItem) -> bool {
        self.items.contains(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Nodes first, then connections, so callers get a stable grouping.
    pub fn items(&self) -> Vec<SceneItem> {
        let mut items: Vec<SceneItem> = self.items.iter().copied().collect();
        items.sort_by_key(|item| match item {
            SceneItem::Node(id) => (0, *id),
            SceneItem::Connection(id) => (1, *id),
        });
        items
    }
}
