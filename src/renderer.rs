//! Frame driver.
//!
//! [`RendererCore`] owns one scene, its camera and its input state, and runs
//! the per-frame sequence against any [`Surface`]. It has no browser
//! dependencies beyond the default clock, so the whole frame contract is
//! testable natively; [`crate::web::Renderer`] wraps it with the canvas
//! element, DOM listeners and the animation-frame loop.
//!
//! Frame order:
//!
//! 1. prune stale owners, re-derive the world mouse position
//!    from the camera, clear, `BeforeBackground` hooks
//! 2. camera `begin` (world space), background painter
//! 3. snapshot selection, `BeforeTick` hooks, tick roots
//! 4. stale-selection check, flag sync, mouse delta reset
//! 5. `BeforeDraw` hooks, draw roots, `AfterDraw` hooks
//! 6. camera `end` (screen space), `AfterCamera` hooks
//! 7. debug then profiler overlay, ticks-per-second counter

#[cfg(test)]
#[path = "renderer_test.rs"]
mod renderer_test;

use std::rc::Rc;

use crate::bridge::{self, InputTarget, PointerInput};
use crate::camera::{Camera, Viewport};
use crate::config::{CameraControls, RendererOptions};
use crate::consts::TPS_WINDOW_MS;
use crate::error::Result;
use crate::input::{InputState, Key, Modifiers, WheelDelta};
use crate::node::{NodeId, SceneNode, TickContext};
use crate::overlay::{self, Profiler};
use crate::scene::Scene;
use crate::surface::Surface;
use crate::vector::Vector2;

/// Millisecond wall clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// `Date.now()` from the JS host.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Extension points in the frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStage {
    /// Screen space, after clearing.
    BeforeBackground,
    /// World space, before any node ticks.
    BeforeTick,
    /// World space, after ticking, before any node draws.
    BeforeDraw,
    /// World space, after every node has drawn.
    AfterDraw,
    /// Screen space, for UI drawn over the scene.
    AfterCamera,
}

/// Frame counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Frames run so far.
    pub frame: u64,
    /// Ticks counted over the last completed window.
    pub tps: u32,
    ticks_in_window: u32,
    window_start_ms: Option<f64>,
}

impl FrameStats {
    fn record_tick(&mut self, now_ms: f64) {
        self.frame += 1;
        let start = *self.window_start_ms.get_or_insert(now_ms);
        if now_ms - start >= TPS_WINDOW_MS {
            self.tps = self.ticks_in_window;
            self.ticks_in_window = 0;
            self.window_start_ms = Some(now_ms);
        }
        self.ticks_in_window += 1;
    }
}

/// Read-only state handed to stage hooks and overlays.
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub input: &'a InputState,
    pub scene: &'a Scene,
    pub stats: &'a FrameStats,
}

/// Handle returned by [`RendererCore::on_stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type StageHook = Box<dyn FnMut(&mut dyn Surface, &FrameView<'_>) -> Result<()>>;
type BackgroundPainter = Box<dyn FnMut(&mut dyn Surface, &Viewport) -> Result<()>>;

#[derive(Default)]
struct StageHooks {
    hooks: Vec<(HookId, FrameStage, StageHook)>,
    next_id: u64,
}

impl StageHooks {
    fn add(&mut self, stage: FrameStage, hook: StageHook) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.hooks.push((id, stage, hook));
        id
    }

    fn remove(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(h, _, _)| *h != id);
        self.hooks.len() != before
    }

    fn run(&mut self, stage: FrameStage, surface: &mut dyn Surface, view: &FrameView<'_>) -> Result<()> {
        for (_, s, hook) in &mut self.hooks {
            if *s == stage {
                hook(&mut *surface, view)?;
            }
        }
        Ok(())
    }
}

/// Core renderer state. Everything that doesn't depend on the canvas element.
pub struct RendererCore {
    pub scene: Scene,
    pub camera: Camera,
    pub input: InputState,
    debug: bool,
    profiler: Option<Profiler>,
    camera_controls: Option<CameraControls>,
    background: Option<BackgroundPainter>,
    hooks: StageHooks,
    stats: FrameStats,
    clock: Box<dyn Clock>,
}

impl Default for RendererCore {
    fn default() -> Self {
        Self::new(RendererOptions::default())
    }
}

impl RendererCore {
    #[must_use]
    pub fn new(options: RendererOptions) -> Self {
        Self::with_clock(options, DateClock)
    }

    /// Like [`RendererCore::new`] with a caller-supplied time source.
    #[must_use]
    pub fn with_clock(options: RendererOptions, clock: impl Clock + 'static) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::new(options.camera.distance, options.camera.fov),
            input: InputState::new(),
            debug: options.debug,
            profiler: options.profiler.then(Profiler::new),
            camera_controls: options.camera_controls,
            background: None,
            hooks: StageHooks::default(),
            stats: FrameStats::default(),
            clock: Box::new(clock),
        }
    }

    // --- Configuration ---

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Toggle the profiler. Enabling always starts from empty buffers.
    pub fn set_profiler(&mut self, enabled: bool) {
        self.profiler = enabled.then(Profiler::new);
    }

    #[must_use]
    pub fn profiler(&self) -> Option<&Profiler> {
        self.profiler.as_ref()
    }

    pub fn set_camera_controls(&mut self, controls: Option<CameraControls>) {
        self.camera_controls = controls;
    }

    #[must_use]
    pub fn camera_controls(&self) -> Option<&CameraControls> {
        self.camera_controls.as_ref()
    }

    /// Paint the background in world space before any node ticks.
    pub fn set_background<F>(&mut self, painter: F)
    where
        F: FnMut(&mut dyn Surface, &Viewport) -> Result<()> + 'static,
    {
        self.background = Some(Box::new(painter));
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Run `hook` at `stage` every frame, after hooks registered earlier.
    pub fn on_stage<F>(&mut self, stage: FrameStage, hook: F) -> HookId
    where
        F: FnMut(&mut dyn Surface, &FrameView<'_>) -> Result<()> + 'static,
    {
        self.hooks.add(stage, Box::new(hook))
    }

    /// Remove a stage hook. Returns false if it was already gone.
    pub fn off_stage(&mut self, id: HookId) -> bool {
        self.hooks.remove(id)
    }

    #[must_use]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    // --- Scene ---

    /// Register a root node.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.scene.add(node)
    }

    /// Remove a node and drop any interaction role it (or its subtree) held.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let removed = self.scene.remove(id);
        if removed.is_some() {
            self.prune_stale_owners();
        }
        removed
    }

    /// Clear owners that no longer resolve to a live node. Unlocks the camera
    /// if the drag owner vanished mid-drag.
    fn prune_stale_owners(&mut self) {
        let scene = &self.scene;
        let was_dragging = self.input.mouse.dragging.is_some();
        if self.input.mouse.retain_live(|id| scene.contains(id)) {
            log::debug!("dropped interaction owners for removed nodes");
        }
        if was_dragging && self.input.mouse.dragging.is_none() {
            self.camera.unlock();
        }
    }

    /// Re-derive the world mouse position from the current camera. Call after
    /// moving, zooming or re-aiming the camera directly; `frame` also does it
    /// before ticking.
    /// Skipped while the camera has no usable viewport.
    pub fn refresh_pointer(&mut self) {
        let world = self.camera.screen_to_world(self.input.mouse.pos);
        if world.is_finite() {
            self.input.mouse.world_pos = world;
        }
    }

    // --- Input ---

    /// Whether wheel input drives the camera, so the page must not scroll.
    #[must_use]
    pub fn consumes_wheel(&self) -> bool {
        self.camera_controls.as_ref().is_some_and(|c| c.zoom)
    }

    /// Whether the native context menu should be suppressed over the canvas.
    /// True whenever built-in camera controls are on, since any button may be
    /// bound to panning.
    #[must_use]
    pub fn consumes_context_menu(&self) -> bool {
        self.camera_controls.is_some()
    }

    fn target(&mut self) -> InputTarget<'_> {
        InputTarget { input: &mut self.input, camera: &mut self.camera, controls: self.camera_controls.as_ref() }
    }

    /// # Errors
    ///
    /// Returns [`crate::SceneError::DegenerateViewport`] for an empty surface.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        bridge::resize(&mut self.target(), width, height)
    }

    /// # Errors
    ///
    /// Propagates camera failures from panning.
    pub fn on_pointer_move(&mut self, p: PointerInput) -> Result<()> {
        bridge::pointer_move(&mut self.target(), p)
    }

    pub fn on_pointer_down(&mut self, p: PointerInput) {
        bridge::pointer_down(&mut self.target(), p);
    }

    pub fn on_pointer_up(&mut self, p: PointerInput) {
        bridge::pointer_up(&mut self.target(), p);
    }

    pub fn on_click(&mut self, p: PointerInput) {
        bridge::click(&mut self.target(), p);
    }

    pub fn on_context_menu(&mut self, p: PointerInput) {
        bridge::context_menu(&mut self.target(), p);
    }

    /// # Errors
    ///
    /// Propagates camera failures from zooming.
    pub fn on_wheel(&mut self, p: PointerInput, delta: WheelDelta) -> Result<()> {
        bridge::wheel(&mut self.target(), p, delta)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) {
        bridge::key_down(&mut self.input, key, modifiers);
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) {
        bridge::key_up(&mut self.input, key, modifiers);
    }

    pub fn on_key_press(&mut self, key: Key, modifiers: Modifiers) {
        bridge::key_press(&mut self.input, key, modifiers);
    }

    // --- Frame ---

    /// Run one full frame against `surface`.
    ///
    /// Ticking always completes before drawing. The camera transform is popped
    /// even when a hook, painter or node fails partway through.
    ///
    /// # Errors
    ///
    /// Returns the first hook, painter, node or surface failure. The frame is
    /// abandoned at that point but the counters still advance on the next call.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let frame_start = self.clock.now_ms();
        self.prune_stale_owners();
        self.refresh_pointer();

        surface.clear();
        self.run_stage(FrameStage::BeforeBackground, surface)?;

        let (tick_ms, draw_ms) = {
            let mut world = self.camera.begin(surface)?;
            if let Some(paint) = self.background.as_mut() {
                paint(&mut *world, self.camera.viewport())?;
            }

            let selected_before = self.input.mouse.selected;
            self.run_stage(FrameStage::BeforeTick, &mut *world)?;
            let tick_start = self.clock.now_ms();
            self.scene.tick(&mut TickContext { input: &mut self.input, camera: &mut self.camera });
            self.deselect_on_stale_click(selected_before);
            self.scene.sync_flags(&self.input.mouse);
            self.input.mouse.delta = Vector2::ZERO;
            let tick_ms = self.clock.now_ms() - tick_start;

            self.run_stage(FrameStage::BeforeDraw, &mut *world)?;
            let draw_start = self.clock.now_ms();
            self.scene.draw(&mut *world)?;
            let draw_ms = self.clock.now_ms() - draw_start;
            self.run_stage(FrameStage::AfterDraw, &mut *world)?;
            world.end();
            (tick_ms, draw_ms)
        };

        self.run_stage(FrameStage::AfterCamera, surface)?;

        let now = self.clock.now_ms();
        if let Some(profiler) = self.profiler.as_mut() {
            profiler.record(tick_ms, draw_ms, now - frame_start);
        }
        let view = FrameView { camera: &self.camera, input: &self.input, scene: &self.scene, stats: &self.stats };
        overlay::draw(surface, &view, self.debug, self.profiler.as_ref())?;

        self.stats.record_tick(now);
        Ok(())
    }

    /// A press that did not change the selection this frame clears it.
    ///
    /// This also fires while the selected node is being dragged, since a drag
    /// does not touch the selection until release.
    fn deselect_on_stale_click(&mut self, selected_before: Option<NodeId>) {
        let mouse = &mut self.input.mouse;
        if mouse.left_down && mouse.selected.is_some() && mouse.selected == selected_before {
            mouse.select(None);
        }
    }

    fn run_stage(&mut self, stage: FrameStage, surface: &mut dyn Surface) -> Result<()> {
        let view = FrameView { camera: &self.camera, input: &self.input, scene: &self.scene, stats: &self.stats };
        self.hooks.run(stage, surface, &view)
    }
}
