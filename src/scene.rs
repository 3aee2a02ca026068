//! Root-node registry.
//!
//! Roots tick and draw in insertion order. A node that is neither a root nor
//! a descendant of one is inert. The registry is the source of truth for
//! which node ids are live.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::error::Result;
use crate::input::Mouse;
use crate::node::{NodeId, SceneNode, TickContext};
use crate::surface::Surface;

/// Ordered list of root nodes.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneNode>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root node at the end of the order.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = node.id();
        self.objects.push(node);
        id
    }

    /// Unregister a root, or detach a descendant of any root.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        if let Some(index) = self.objects.iter().position(|n| n.id() == id) {
            return Some(self.objects.remove(index));
        }
        self.objects.iter_mut().find_map(|n| n.remove_child(id))
    }

    /// Any live node with `id`, root or descendant.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.objects.iter().find_map(|n| n.find(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.objects.iter_mut().find_map(|n| n.find_mut(id))
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of live nodes, descendants included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.objects.iter().map(SceneNode::subtree_len).sum()
    }

    /// Roots in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.objects.iter_mut()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) {
        for node in &mut self.objects {
            node.tick(ctx);
        }
    }

    pub(crate) fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        for node in &self.objects {
            node.draw(surface)?;
        }
        Ok(())
    }

    pub(crate) fn sync_flags(&mut self, mouse: &Mouse) {
        for node in &mut self.objects {
            node.sync_flags(mouse);
        }
    }
}
