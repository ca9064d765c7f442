//! Rendering backend contract
//!
//! The scene graph never talks to a graphics API. Graphics leaves hand textured
//! vertices to a [`RenderBackend`] together with the projection and model-view
//! transforms in effect for them; the backend owns everything GPU-side.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{self, Mat3, Vec2};

mod recording;

pub use recording::{RecordedDraw, RecordingBackend};

/// Opaque handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// Create a color from components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Components as an array
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Vertex handed to the backend, in the drawing node's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Local-space position
    pub position: [f32; 2],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Vertex color
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec2, uv: [f32; 2], color: Color) -> Self {
        Self {
            position: [position.x, position.y],
            uv,
            color: color.to_array(),
        }
    }
}

/// One batch of triangles to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Triangle list in local space
    pub vertices: &'a [Vertex],
    /// Texture to sample, or `None` for vertex color only
    pub texture: Option<TextureId>,
    /// Window space to clip space
    pub projection: &'a Mat3,
    /// Local space to window space
    pub model_view: &'a Mat3,
}

impl DrawCall<'_> {
    /// Window-space position of a local point under this call's model-view
    pub fn to_window(&self, local: Vec2) -> Vec2 {
        math::transform_point(self.model_view, local)
    }
}

/// Immediate-mode drawing surface the scene renders into
pub trait RenderBackend {
    /// Draw a list of textured vertices under the given transforms
    fn draw(&mut self, call: DrawCall<'_>);
}
