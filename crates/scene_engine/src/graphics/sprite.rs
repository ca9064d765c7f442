//! Textured or solid-color quad

use super::{quad, rect_on_screen};
use crate::foundation::math::Mat3;
use crate::foundation::rect::Rect;
use crate::render::{Color, DrawCall, RenderBackend, TextureId};
use crate::scene::{Capabilities, Node};

/// Rectangle drawn in its parent's space
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    rect: Rect,
    texture: Option<TextureId>,
    color: Color,
    resize_with_parent: bool,
}

impl Sprite {
    /// Solid white sprite covering `rect`
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            texture: None,
            color: Color::WHITE,
            resize_with_parent: false,
        }
    }

    /// Sprite sampling `texture` over `rect`
    pub fn textured(rect: Rect, texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Self::new(rect)
        }
    }

    /// Tint the sprite
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Scale along with the parent entity's size
    pub fn with_resize_with_parent(mut self, resize: bool) -> Self {
        self.resize_with_parent = resize;
        self
    }

    /// Offset and size in the parent's space
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move or resize the sprite
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Sampled texture
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Swap the sampled texture
    pub fn set_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    /// Tint color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the tint
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Node for Sprite {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDER
    }

    fn is_on_screen(&self, model_view: &Mat3, viewport: &Rect) -> bool {
        rect_on_screen(&self.rect, model_view, viewport)
    }

    fn render(&mut self, backend: &mut dyn RenderBackend, projection: &Mat3, model_view: &Mat3) {
        let vertices = quad(&self.rect, self.color);
        backend.draw(DrawCall {
            vertices: &vertices,
            texture: self.texture,
            projection,
            model_view,
        });
    }

    fn resize_with_parent(&self) -> bool {
        self.resize_with_parent
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.rect = self.rect.scaled(sx, sy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{self, Vec2};
    use crate::render::RecordingBackend;
    use approx::assert_relative_eq;

    #[test]
    fn test_render_draws_one_quad() {
        let mut sprite = Sprite::textured(Rect::new(2.0, 3.0, 4.0, 4.0), TextureId(7));
        let mut backend = RecordingBackend::new();
        let model_view = math::translation(Vec2::new(10.0, 10.0));

        sprite.render(&mut backend, &Mat3::identity(), &model_view);

        let draw = &backend.draws()[0];
        assert_eq!(draw.texture, Some(TextureId(7)));
        assert_eq!(draw.vertex_count, 6);
        assert_relative_eq!(draw.origin, Vec2::new(12.0, 13.0));
    }

    #[test]
    fn test_scale_moves_offset_and_size() {
        let mut sprite = Sprite::new(Rect::new(2.0, 2.0, 4.0, 4.0)).with_resize_with_parent(true);
        assert!(sprite.resize_with_parent());

        sprite.scale(2.0, 0.5);
        assert_eq!(sprite.rect(), Rect::new(4.0, 1.0, 8.0, 2.0));
    }
}
