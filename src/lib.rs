//! Lightweight 2D scene graph and camera over an HTML canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. Hosts
//! register hierarchical [`node::SceneNode`]s into a [`scene::Scene`], and the
//! frame driver ticks and draws them every animation frame through a camera
//! that maps a logical world space onto the canvas pixels. Raw DOM input is
//! bridged into a per-renderer [`input::InputState`] that nodes consult for
//! hover, drag and selection.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`renderer`] | Frame driver and testable [`renderer::RendererCore`] |
//! | [`web`] | Browser binding: canvas element, DOM listeners, animation loop |
//! | [`scene`] | Root-node registry |
//! | [`node`] | Scene nodes, behaviors, and the hover/drag/select state machine |
//! | [`camera`] | Look-at/distance/fov camera, viewport, coordinate conversions |
//! | [`input`] | Mouse and keyboard state plus their notification channels |
//! | [`bridge`] | Translates pointer/wheel/key input into state and camera moves |
//! | [`hit`] | Axis-aligned hit-testing |
//! | [`overlay`] | Debug and profiler overlays |
//! | [`surface`] | Drawing-surface trait and its `CanvasRenderingContext2d` impl |
//! | [`events`] | Synchronous publish/subscribe channel |
//! | [`config`] | Renderer options |
//! | [`vector`] | 2D vector value type |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (zoom limits, defaults, windows) |

pub mod bridge;
pub mod camera;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod hit;
pub mod input;
pub mod node;
pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod surface;
pub mod vector;
pub mod web;

#[cfg(test)]
mod testing;

pub use error::{Result, SceneError};
pub use vector::Vector2;
