//! Backend that records draw calls instead of executing them
//!
//! Used by headless hosts and by tests to observe draw order.

use super::{DrawCall, RenderBackend, TextureId};
use crate::foundation::math::Vec2;

/// Summary of one recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Texture the call sampled
    pub texture: Option<TextureId>,
    /// Number of vertices submitted
    pub vertex_count: usize,
    /// Window-space position of the first vertex
    pub origin: Vec2,
}

/// [`RenderBackend`] that keeps a list of everything drawn
#[derive(Debug, Default)]
pub struct RecordingBackend {
    draws: Vec<RecordedDraw>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws recorded so far, oldest first
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Textures of the recorded draws, oldest first
    pub fn textures(&self) -> Vec<Option<TextureId>> {
        self.draws.iter().map(|draw| draw.texture).collect()
    }

    /// Forget everything recorded
    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn draw(&mut self, call: DrawCall<'_>) {
        let origin = call
            .vertices
            .first()
            .map(|v| call.to_window(Vec2::new(v.position[0], v.position[1])))
            .unwrap_or_else(|| call.to_window(Vec2::zeros()));

        log::trace!("draw {:?}: {} vertices at {:?}", call.texture, call.vertices.len(), origin);
        self.draws.push(RecordedDraw {
            texture: call.texture,
            vertex_count: call.vertices.len(),
            origin,
        });
    }
}
