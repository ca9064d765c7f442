//! Graphics leaves
//!
//! Leaf nodes that draw through the [`RenderBackend`](crate::render::RenderBackend).
//! They hold no GPU resources; textures are referenced by [`TextureId`] and owned by
//! the backend.

mod bar;
mod sprite;

pub use bar::Bar;
pub use sprite::Sprite;

use crate::foundation::math::{self, Mat3};
use crate::foundation::rect::Rect;
use crate::render::{Color, Vertex};

/// Two triangles covering `rect` in local space, with the full texture mapped onto it
pub fn quad(rect: &Rect, color: Color) -> [Vertex; 6] {
    let [top_left, top_right, bottom_right, bottom_left] = rect.corners();
    [
        Vertex::new(top_left, [0.0, 0.0], color),
        Vertex::new(top_right, [1.0, 0.0], color),
        Vertex::new(bottom_left, [0.0, 1.0], color),
        Vertex::new(bottom_left, [0.0, 1.0], color),
        Vertex::new(top_right, [1.0, 0.0], color),
        Vertex::new(bottom_right, [1.0, 1.0], color),
    ]
}

/// Whether a local-space rectangle lands inside the viewport under `model_view`
pub fn rect_on_screen(rect: &Rect, model_view: &Mat3, viewport: &Rect) -> bool {
    let corners = rect.corners().map(|corner| math::transform_point(model_view, corner));
    Rect::bounding(corners).is_some_and(|bounds| bounds.intersects(viewport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn test_quad_covers_rect() {
        let vertices = quad(&Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE);
        assert_eq!(vertices[0].position, [1.0, 2.0]);
        assert_eq!(vertices[5].position, [4.0, 6.0]);
        assert_eq!(vertices[5].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_rect_on_screen() {
        let viewport = Rect::from_size(100.0, 100.0);
        let rect = Rect::from_size(10.0, 10.0);

        assert!(rect_on_screen(&rect, &Mat3::identity(), &viewport));
        assert!(rect_on_screen(&rect, &math::translation(Vec2::new(95.0, 95.0)), &viewport));
        assert!(!rect_on_screen(&rect, &math::translation(Vec2::new(150.0, 0.0)), &viewport));
        assert!(!rect_on_screen(&rect, &math::translation(Vec2::new(-20.0, 0.0)), &viewport));
    }
}
