//! Two-part progress bar

use super::{quad, rect_on_screen};
use crate::foundation::math::Mat3;
use crate::foundation::rect::Rect;
use crate::render::{Color, DrawCall, RenderBackend};
use crate::scene::{Capabilities, Node};

/// Horizontal bar filled from the left by a fraction of its width
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    rect: Rect,
    fraction: f32,
    background: Color,
    fill: Color,
    resize_with_parent: bool,
}

impl Bar {
    /// Full bar covering `rect`
    pub fn new(rect: Rect, background: Color, fill: Color) -> Self {
        Self {
            rect,
            fraction: 1.0,
            background,
            fill,
            resize_with_parent: true,
        }
    }

    /// Filled fraction in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Set the filled fraction; values outside `[0, 1]` are clamped with a warning
    pub fn set_fraction(&mut self, fraction: f32) {
        if !(0.0..=1.0).contains(&fraction) {
            log::warn!("Bar fraction {} is outside [0, 1]; clamping", fraction);
        }
        self.fraction = fraction.clamp(0.0, 1.0);
    }

    /// Offset and size in the parent's space
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Stop or start following the parent entity's size
    pub fn set_resize_with_parent(&mut self, resize: bool) {
        self.resize_with_parent = resize;
    }

    fn fill_rect(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.rect.w * self.fraction, self.rect.h)
    }
}

impl Node for Bar {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDER
    }

    fn is_on_screen(&self, model_view: &Mat3, viewport: &Rect) -> bool {
        rect_on_screen(&self.rect, model_view, viewport)
    }

    fn render(&mut self, backend: &mut dyn RenderBackend, projection: &Mat3, model_view: &Mat3) {
        let background = quad(&self.rect, self.background);
        backend.draw(DrawCall {
            vertices: &background,
            texture: None,
            projection,
            model_view,
        });

        if self.fraction > 0.0 {
            let fill = quad(&self.fill_rect(), self.fill);
            backend.draw(DrawCall {
                vertices: &fill,
                texture: None,
                projection,
                model_view,
            });
        }
    }

    fn resize_with_parent(&self) -> bool {
        self.resize_with_parent
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.rect = self.rect.scaled(sx, sy);
    }
}
