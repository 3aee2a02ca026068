//! Browser binding.
//!
//! [`Renderer`] owns the canvas element and its 2D context, forwards DOM input
//! into a shared [`RendererCore`], and drives it from `requestAnimationFrame`.
//! Everything here runs on the browser main thread; the core is shared with
//! the listeners and the frame callback through `Rc<RefCell<..>>`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window};

use crate::bridge::PointerInput;
use crate::config::RendererOptions;
use crate::error::{Result, SceneError};
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::renderer::RendererCore;
use crate::surface::Surface;
use crate::vector::Vector2;

type SharedCore = Rc<RefCell<RendererCore>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Install `console_log` at `level` and route panics to the browser console.
///
/// # Errors
///
/// Returns [`SceneError::InvalidConfig`] if a logger is already installed.
#[cfg(feature = "console")]
pub fn init_console_logging(level: log::Level) -> Result<()> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level).map_err(|e| SceneError::InvalidConfig(e.to_string()))
}

/// A scene renderer bound to one canvas element.
pub struct Renderer {
    core: SharedCore,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: Window,
    /// Each entry removes its DOM listener when dropped, so dropping the
    /// renderer detaches all input handling.
    listeners: Vec<Listener>,
}

impl Renderer {
    /// Bind to `canvas`, size it to its displayed size, and attach input
    /// listeners. Call [`Renderer::start`] to begin drawing.
    ///
    /// # Errors
    ///
    /// - [`SceneError::MissingSurface`] if `canvas` is `None`.
    /// - [`SceneError::MissingContext`] if the canvas has no 2D context.
    /// - [`SceneError::Scheduler`] if there is no window or a listener fails.
    pub fn new(canvas: Option<HtmlCanvasElement>, options: RendererOptions) -> Result<Self> {
        let canvas = canvas.ok_or(SceneError::MissingSurface)?;
        let context = canvas
            .get_context("2d")
            .map_err(|e| SceneError::surface(&e))?
            .ok_or(SceneError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SceneError::MissingContext)?;
        let window = web_sys::window().ok_or_else(|| SceneError::Scheduler("no window".into()))?;

        let mut renderer = Self {
            core: Rc::new(RefCell::new(RendererCore::new(options))),
            canvas,
            context,
            window,
            listeners: Vec::new(),
        };
        fit_canvas(&renderer.canvas, &mut renderer.context, &renderer.core)?;
        renderer.attach_listeners()?;
        log::info!("renderer attached: {}x{}", renderer.canvas.width(), renderer.canvas.height());
        Ok(renderer)
    }

    /// Look up a `<canvas>` by element id and bind to it.
    ///
    /// # Errors
    ///
    /// [`SceneError::MissingSurface`] if the id does not name a canvas, plus
    /// everything [`Renderer::new`] returns.
    pub fn from_element_id(id: &str, options: RendererOptions) -> Result<Self> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_ref::<HtmlCanvasElement>().cloned());
        Self::new(canvas, options)
    }

    #[must_use]
    pub fn core(&self) -> &SharedCore {
        &self.core
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Run a single frame now, outside the animation loop.
    ///
    /// # Errors
    ///
    /// Whatever [`RendererCore::frame`] returns, or [`SceneError::Scheduler`]
    /// if the core is already borrowed.
    pub fn render_frame(&self) -> Result<()> {
        let mut context = self.context.clone();
        let mut core = self.core.try_borrow_mut().map_err(|e| SceneError::Scheduler(e.to_string()))?;
        core.frame(&mut context)
    }

    /// Start the animation loop. Frames keep coming until
    /// [`FrameLoop::stop`]; dropping the handle does not stop it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Scheduler`] if the first frame can't be requested.
    pub fn start(&self) -> Result<FrameLoop> {
        let running = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let core = Rc::clone(&self.core);
        let mut context = self.context.clone();
        let window = self.window.clone();
        let running_cb = Rc::clone(&running);
        let pending_cb = Rc::clone(&pending);
        let callback_cb = Rc::clone(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            pending_cb.set(None);
            if running_cb.get() {
                render(&core, &mut context);
            }
            // A stage hook may have stopped the loop during this frame.
            if !running_cb.get() {
                callback_cb.borrow_mut().take();
                return;
            }
            match request_frame(&window, &callback_cb) {
                Ok(handle) => pending_cb.set(Some(handle)),
                Err(e) => {
                    log::error!("frame loop stopped: {e}");
                    running_cb.set(false);
                    callback_cb.borrow_mut().take();
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let handle = request_frame(&self.window, &callback)?;
        pending.set(Some(handle));
        log::debug!("frame loop started");
        Ok(FrameLoop { window: self.window.clone(), running, pending, callback })
    }

    fn attach_listeners(&mut self) -> Result<()> {
        let canvas: &EventTarget = self.canvas.as_ref();
        let window: &EventTarget = self.window.as_ref();

        self.listeners.push(on_mouse(canvas, "mousemove", &self.core, |core, p, _| core.on_pointer_move(p))?);
        self.listeners.push(on_mouse(canvas, "mousedown", &self.core, |core, p, _| {
            core.on_pointer_down(p);
            Ok(())
        })?);
        self.listeners.push(on_mouse(canvas, "mouseup", &self.core, |core, p, _| {
            core.on_pointer_up(p);
            Ok(())
        })?);
        self.listeners.push(on_mouse(canvas, "click", &self.core, |core, p, _| {
            core.on_click(p);
            Ok(())
        })?);
        self.listeners.push(on_mouse(canvas, "contextmenu", &self.core, |core, p, event| {
            if core.consumes_context_menu() {
                event.prevent_default();
            }
            core.on_context_menu(p);
            Ok(())
        })?);
        self.listeners.push(on_mouse(canvas, "wheel", &self.core, |core, p, event| {
            let delta = event
                .dyn_ref::<WheelEvent>()
                .map_or_else(WheelDelta::default, |w| WheelDelta { dx: w.delta_x(), dy: w.delta_y() });
            if core.consumes_wheel() {
                event.prevent_default();
            }
            core.on_wheel(p, delta)
        })?);

        self.listeners.push(on_key(window, "keydown", &self.core, RendererCore::on_key_down)?);
        self.listeners.push(on_key(window, "keyup", &self.core, RendererCore::on_key_up)?);
        self.listeners.push(on_key(window, "keypress", &self.core, RendererCore::on_key_press)?);

        let core = Rc::clone(&self.core);
        let canvas_el = self.canvas.clone();
        let mut context = self.context.clone();
        self.listeners.push(listen(window, "resize", move |_| {
            if let Err(e) = fit_canvas(&canvas_el, &mut context, &core) {
                log::warn!("resize failed: {e}");
            }
        })?);
        Ok(())
    }
}

/// Handle to a running animation loop.
pub struct FrameLoop {
    window: Window,
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Cancel the pending frame and release the callback. Safe to call from a
    /// stage hook; the current frame finishes and no further frame is
    /// requested.
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(handle) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancel_animation_frame failed: {e:?}");
            }
            self.callback.borrow_mut().take();
        }
        log::debug!("frame loop stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

// --- Frame helpers ---

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32> {
    let callback = callback.borrow();
    let Some(cb) = callback.as_ref() else {
        return Err(SceneError::Scheduler("frame callback released".into()));
    };
    window.request_animation_frame(cb.as_ref().unchecked_ref()).map_err(|e| SceneError::scheduler(&e))
}

fn render(core: &RefCell<RendererCore>, context: &mut CanvasRenderingContext2d) {
    match core.try_borrow_mut() {
        Ok(mut core) => {
            if let Err(e) = core.frame(context) {
                log::warn!("frame failed: {e}");
            }
        }
        Err(_) => log::warn!("renderer busy; skipped frame"),
    }
}

/// Match the canvas backing store to its displayed size, then re-derive the
/// camera. Falls back to the current attribute size while the canvas is not
/// laid out.
fn fit_canvas(canvas: &HtmlCanvasElement, context: &mut CanvasRenderingContext2d, core: &RefCell<RendererCore>) -> Result<()> {
    let (client_w, client_h) = (canvas.client_width().max(0).unsigned_abs(), canvas.client_height().max(0).unsigned_abs());
    if client_w > 0 && client_h > 0 {
        canvas.set_width(client_w);
        canvas.set_height(client_h);
    }
    context.reset_text_defaults();
    let mut core = core.try_borrow_mut().map_err(|e| SceneError::Scheduler(e.to_string()))?;
    core.resize(f64::from(canvas.width()), f64::from(canvas.height()))
}

// --- DOM listeners ---

/// A DOM listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self.target.remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref()) {
            log::warn!("failed to detach {} listener: {e:?}", self.kind);
        }
    }
}

fn listen<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Listener>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        .map_err(|e| SceneError::scheduler(&e))?;
    Ok(Listener { target: target.clone(), kind, callback })
}

fn on_mouse<F>(target: &EventTarget, kind: &'static str, core: &SharedCore, mut handler: F) -> Result<Listener>
where
    F: FnMut(&mut RendererCore, PointerInput, &web_sys::Event) -> Result<()> + 'static,
{
    let core = Rc::clone(core);
    listen(target, kind, move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pointer = pointer_input(mouse);
        dispatch(&core, kind, |core| handler(core, pointer, &event));
    })
}

fn on_key(
    target: &EventTarget,
    kind: &'static str,
    core: &SharedCore,
    handler: fn(&mut RendererCore, Key, Modifiers),
) -> Result<Listener> {
    let core = Rc::clone(core);
    listen(target, kind, move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let modifiers =
            Modifiers { shift: key.shift_key(), ctrl: key.ctrl_key(), alt: key.alt_key(), meta: key.meta_key() };
        let name = Key::new(key.key());
        dispatch(&core, kind, |core| {
            handler(core, name, modifiers);
            Ok(())
        });
    })
}

fn dispatch(core: &RefCell<RendererCore>, kind: &str, f: impl FnOnce(&mut RendererCore) -> Result<()>) {
    match core.try_borrow_mut() {
        Ok(mut core) => {
            if let Err(e) = f(&mut core) {
                log::warn!("{kind} handling failed: {e}");
            }
        }
        Err(_) => log::warn!("renderer busy; dropped {kind} event"),
    }
}

fn pointer_input(event: &MouseEvent) -> PointerInput {
    PointerInput {
        screen: Vector2::new(f64::from(event.offset_x()), f64::from(event.offset_y())),
        button: Button::from_code(event.button()),
        modifiers: Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        },
    }
}
