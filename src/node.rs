//! Scene nodes: geometry, children, pluggable behavior, and the built-in
//! hover/drag/select state machine.
//!
//! A [`SceneNode`] owns its children outright; dropping a node drops its
//! subtree. Per-kind logic plugs in through [`Behavior`], while the interaction
//! rules in [`interact`] run for every node after its children and its own
//! behavior have ticked. Mutual exclusion of the hover, drag and select roles
//! is global and lives in [`crate::input::Mouse`]; the per-node
//! [`NodeState`] flags mirror it.

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use std::any::Any;
use std::fmt;

use uuid::Uuid;

use crate::camera::Camera;
use crate::error::Result;
use crate::hit;
use crate::input::{InputState, Mouse};
use crate::surface::Surface;
use crate::vector::Vector2;

/// Opaque node identity, generated at construction.
pub type NodeId = Uuid;

/// Per-node interaction flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    pub hovering: bool,
    pub dragging: bool,
    pub selected: bool,
    /// Whether the node may be picked up with the primary button.
    pub draggable: bool,
    /// `pos - world_mouse` captured when the drag started.
    pub drag_offset: Vector2,
}

impl Default for NodeState {
    fn default() -> Self {
        Self { hovering: false, dragging: false, selected: false, draggable: true, drag_offset: Vector2::ZERO }
    }
}

/// Identity, geometry and interaction flags common to every node kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: NodeId,
    /// World-space origin (top-left of the hit box).
    pub pos: Vector2,
    /// Hit-box extent.
    pub size: Vector2,
    pub state: NodeState,
}

impl Body {
    #[must_use]
    pub fn new(pos: Vector2, size: Vector2) -> Self {
        Self { id: Uuid::new_v4(), pos, size, state: NodeState::default() }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Whether a world point falls inside this node's hit box.
    #[must_use]
    pub fn contains_point(&self, point: Vector2) -> bool {
        hit::inside(self.pos, self.size, point)
    }
}

/// Mutable state a node may touch while ticking.
pub struct TickContext<'a> {
    pub input: &'a mut InputState,
    pub camera: &'a mut Camera,
}

/// Per-kind logic. Both hooks default to doing nothing.
pub trait Behavior: Any {
    /// Runs once per frame, after the node's children have ticked.
    fn update(&mut self, _body: &mut Body, _ctx: &mut TickContext<'_>) {}

    /// Draws in world coordinates, after the node's children have drawn.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    fn draw(&self, _body: &Body, _surface: &mut dyn Surface) -> Result<()> {
        Ok(())
    }
}

/// A node with no drawing of its own; useful as a container.
#[derive(Debug, Clone, Copy, Default)]
pub struct Group;

impl Behavior for Group {}

/// A filled rectangle that outlines itself when hovered or selected.
#[derive(Debug, Clone)]
pub struct BoxNode {
    pub fill: String,
    pub hover_stroke: String,
    pub select_stroke: String,
}

impl BoxNode {
    #[must_use]
    pub fn new(fill: impl Into<String>) -> Self {
        Self { fill: fill.into(), hover_stroke: "#1F1A17".to_owned(), select_stroke: "#2E7DD7".to_owned() }
    }
}

impl Behavior for BoxNode {
    fn draw(&self, body: &Body, surface: &mut dyn Surface) -> Result<()> {
        surface.fill_rect(body.pos, body.size, &self.fill);
        if body.state.selected {
            surface.stroke_rect(body.pos, body.size, &self.select_stroke, 2.0);
        } else if body.state.hovering {
            surface.stroke_rect(body.pos, body.size, &self.hover_stroke, 1.0);
        }
        Ok(())
    }
}

/// A tree node: body, owned children, and a behavior.
pub struct SceneNode {
    body: Body,
    children: Vec<SceneNode>,
    behavior: Box<dyn Behavior>,
}

impl SceneNode {
    #[must_use]
    pub fn new(pos: Vector2, size: Vector2, behavior: impl Behavior) -> Self {
        Self { body: Body::new(pos, size), children: Vec::new(), behavior: Box::new(behavior) }
    }

    /// A [`Group`] node.
    #[must_use]
    pub fn group(pos: Vector2, size: Vector2) -> Self {
        Self::new(pos, size, Group)
    }

    /// Builder-style [`SceneNode::set_draggable`].
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.set_draggable(draggable);
        self
    }

    /// Builder-style [`SceneNode::add_child`].
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.add_child(child);
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.body.id
    }

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    #[must_use]
    pub fn pos(&self) -> Vector2 {
        self.body.pos
    }

    pub fn set_pos(&mut self, pos: Vector2) {
        self.body.pos = pos;
    }

    #[must_use]
    pub fn size(&self) -> Vector2 {
        self.body.size
    }

    #[must_use]
    pub fn state(&self) -> &NodeState {
        &self.body.state
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.body.state.draggable = draggable;
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.body.state.hovering
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.body.state.dragging
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.body.state.selected
    }

    /// The behavior, if it is a `T`.
    #[must_use]
    pub fn behavior<T: Behavior>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.behavior;
        any.downcast_ref::<T>()
    }

    /// The behavior, mutably, if it is a `T`.
    pub fn behavior_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = &mut *self.behavior;
        any.downcast_mut::<T>()
    }

    // --- Children ---

    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Append a child; it ticks and draws after its earlier siblings.
    pub fn add_child(&mut self, child: SceneNode) -> NodeId {
        let id = child.id();
        self.children.push(child);
        id
    }

    /// Detach a descendant anywhere below this node.
    pub fn remove_child(&mut self, id: NodeId) -> Option<SceneNode> {
        if let Some(index) = self.children.iter().position(|c| c.id() == id) {
            return Some(self.children.remove(index));
        }
        self.children.iter_mut().find_map(|c| c.remove_child(id))
    }

    /// This node or a descendant with `id`.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Number of nodes in this subtree, itself included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }

    // --- Frame hooks ---

    /// Tick children, then the behavior, then the interaction rules.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        for child in &mut self.children {
            child.tick(ctx);
        }
        self.behavior.update(&mut self.body, ctx);
        interact(&mut self.body, ctx);
    }

    /// Draw children, then this node on top of them.
    ///
    /// # Errors
    ///
    /// Stops at the first surface failure.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        for child in &self.children {
            child.draw(surface)?;
        }
        self.behavior.draw(&self.body, surface)
    }

    /// Make every flag in the subtree agree with the global owners.
    pub(crate) fn sync_flags(&mut self, mouse: &Mouse) {
        let id = self.id();
        let state = &mut self.body.state;
        state.hovering = mouse.hovering == Some(id);
        state.dragging = mouse.dragging == Some(id);
        state.selected = mouse.selected == Some(id);
        for child in &mut self.children {
            child.sync_flags(mouse);
        }
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("body", &self.body)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Run one frame of the hover/drag/select rules for `body`.
///
/// 1. Hover: claim the hover role if it is free (or already ours) and the world
///    mouse is inside the hit box; otherwise give it up if we held it.
/// 2. Drag start: a draggable, hovered node claims the drag role when nobody
///    holds it and the primary button is down. The camera locks and the grab
///    offset is recorded.
/// 3. Drag: the drag owner follows `world_mouse + drag_offset`.
/// 4. Release: once the primary button is up the drag owner lets go, unlocks
///    the camera and takes the selection.
pub fn interact(body: &mut Body, ctx: &mut TickContext<'_>) {
    let id = body.id;
    let mouse = &mut ctx.input.mouse;

    let hover_free = mouse.hovering.is_none_or(|owner| owner == id);
    if hover_free && body.contains_point(mouse.world_pos) {
        mouse.hovering = Some(id);
    } else if mouse.hovering == Some(id) {
        mouse.hovering = None;
    }
    body.state.hovering = mouse.hovering == Some(id);

    if body.state.draggable && body.state.hovering && mouse.dragging.is_none() && mouse.left_down {
        mouse.dragging = Some(id);
        body.state.dragging = true;
        body.state.drag_offset = body.pos - mouse.world_pos;
        ctx.camera.lock();
        log::debug!("drag start: {id}");
    }

    if mouse.dragging != Some(id) {
        return;
    }
    if mouse.left_down {
        body.pos = mouse.world_pos + body.state.drag_offset;
    } else {
        mouse.dragging = None;
        body.state.dragging = false;
        ctx.camera.unlock();
        body.state.selected = true;
        log::debug!("drag end: {id}");
        mouse.select(Some(id));
    }
}
