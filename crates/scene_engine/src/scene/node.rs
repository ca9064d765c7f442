//! Node trait and capability flags
//!
//! A node body is any `'static` type implementing [`Node`]. The scene owns the body
//! together with the node's tree properties (parent, layer, visibility, activity);
//! the body only supplies behaviour through hooks with no-op defaults.

use std::any::Any;

use bitflags::bitflags;

use super::Scene;
use crate::events::{ClickArbiter, MouseEvent};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat3;
use crate::foundation::rect::Rect;
use crate::input::InputState;
use crate::render::RenderBackend;

bitflags! {
    /// Optional facets a node opts into
    ///
    /// Read once when the node is added to a container and cached in that
    /// container's indices until the node is removed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Receives [`Node::update`] every tick
        const UPDATE = 1 << 0;
        /// Drawn in layer order through [`Node::render`]
        const RENDER = 1 << 1;
    }
}

/// Downcasting support for node bodies
pub trait AsAny {
    /// Borrow as [`Any`]
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as [`Any`]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-tick context threaded through the update pass
///
/// Built by the frame driver for each tick. It carries the input snapshot and the
/// click arbiter, so nothing in the update pass relies on global state.
pub struct Tick<'a> {
    /// Seconds since the previous tick
    pub elapsed: f32,
    /// Pointer and key state for this tick
    pub input: &'a InputState,
    /// Contested mouse-event requests for this tick
    pub clicks: &'a mut ClickArbiter,
}

impl<'a> Tick<'a> {
    /// Create a tick context
    pub fn new(elapsed: f32, input: &'a InputState, clicks: &'a mut ClickArbiter) -> Self {
        Self { elapsed, input, clicks }
    }
}

/// Behaviour attached to a scene node
///
/// While a hook runs, the body is lifted out of the scene. The hook may therefore
/// add, remove or despawn any node, itself included. Lifecycle hooks and mouse
/// events aimed at a body that is already running are queued and delivered as soon
/// as it returns.
#[allow(unused_variables)]
pub trait Node: AsAny + 'static {
    /// Facets this node participates in
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Called after the node was added to a container and indexed there
    fn on_added(&mut self, scene: &mut Scene, id: NodeId) {}

    /// Called after the node was removed from its container
    fn on_removed(&mut self, scene: &mut Scene, id: NodeId) {}

    /// Per-tick logic; only called with [`Capabilities::UPDATE`]
    fn update(&mut self, scene: &mut Scene, id: NodeId, tick: &mut Tick<'_>) {}

    /// Cheap culling test against the window-space viewport
    fn is_on_screen(&self, model_view: &Mat3, viewport: &Rect) -> bool {
        true
    }

    /// Draw this node; only called with [`Capabilities::RENDER`] while visible
    fn render(&mut self, backend: &mut dyn RenderBackend, projection: &Mat3, model_view: &Mat3) {}

    /// Pointer event for an entity body
    fn on_mouse_event(&mut self, scene: &mut Scene, id: NodeId, event: MouseEvent) {}

    /// Whether this node scales along with its parent entity's size
    fn resize_with_parent(&self) -> bool {
        false
    }

    /// Scale this node's extent by the parent's size ratio
    fn scale(&mut self, sx: f32, sy: f32) {}
}

/// Node body with no behaviour, for entities that only group children
#[derive(Debug, Clone, Copy, Default)]
pub struct Blank;

impl Node for Blank {}
