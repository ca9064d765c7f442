//! Entity geometry and coordinate spaces
//!
//! An entity's local space has its origin at the entity's top-left corner. The
//! local transform rotates around the entity's centre, then translates to its
//! position in the parent's space:
//!
//! ```text
//! local = T(x, y) · T(w/2, h/2) · R(angle) · T(-w/2, -h/2)
//! ```
//!
//! Window positions, hit tests and rendering all use the same composed transform,
//! so a child of a rotated entity is hit where it is drawn.

use super::query::Probe;
use super::scene_graph::{Scene, SceneError};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{self, Mat3, Vec2};
use crate::foundation::rect::Rect;

/// Geometry and flags carried by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    /// Position and size in the parent's space
    pub rect: Rect,
    /// Rotation around the centre, in degrees
    pub angle: f32,
    /// Whether collision queries consider this entity
    pub collideable: bool,
    /// Whether the click controller reacts to the pointer
    pub clickable: bool,
    pub(crate) click_controller: Option<NodeId>,
}

impl EntityState {
    /// Unrotated, collideable and clickable state for a rectangle
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            angle: 0.0,
            collideable: true,
            clickable: true,
            click_controller: None,
        }
    }

    /// Transform from this entity's local space into its parent's space
    pub fn local_transform(&self) -> Mat3 {
        let offset = math::translation(Vec2::new(self.rect.x, self.rect.y));
        if self.angle == 0.0 {
            return offset;
        }
        let centre = Vec2::new(self.rect.w / 2.0, self.rect.h / 2.0);
        offset * math::rotation_about(centre, self.angle)
    }
}

impl Scene {
    /// Geometry and flags of an entity
    pub fn entity(&self, id: NodeId) -> Result<&EntityState, SceneError> {
        self.slot(id)?.entity.as_ref().ok_or(SceneError::NotAnEntity(id))
    }

    fn entity_mut(&mut self, id: NodeId) -> Result<&mut EntityState, SceneError> {
        self.slot_mut(id)?.entity.as_mut().ok_or(SceneError::NotAnEntity(id))
    }

    /// Rectangle in the parent's space
    pub fn rect(&self, id: NodeId) -> Result<Rect, SceneError> {
        Ok(self.entity(id)?.rect)
    }

    /// Top-left corner in the parent's space
    pub fn position(&self, id: NodeId) -> Result<Vec2, SceneError> {
        Ok(self.entity(id)?.rect.top_left())
    }

    /// Move the top-left corner, keeping the size
    pub fn set_position(&mut self, id: NodeId, position: Vec2) -> Result<(), SceneError> {
        let rect = &mut self.entity_mut(id)?.rect;
        rect.x = position.x;
        rect.y = position.y;
        Ok(())
    }

    /// Width and height
    pub fn size(&self, id: NodeId) -> Result<Vec2, SceneError> {
        Ok(self.entity(id)?.rect.size())
    }

    /// Resize an entity
    ///
    /// Graphics children that opt into [`resize_with_parent`](super::Node::resize_with_parent)
    /// are scaled by the new/old ratio on each axis. An axis whose old extent is zero
    /// has no meaningful ratio and is left unscaled.
    pub fn set_size(&mut self, id: NodeId, size: Vec2) -> Result<(), SceneError> {
        let rect = &mut self.entity_mut(id)?.rect;
        let old = rect.size();
        rect.w = size.x;
        rect.h = size.y;

        if old == size {
            return Ok(());
        }
        let ratio = |new: f32, old: f32, axis: &str| {
            if old == 0.0 {
                log::warn!("Entity {:?} had zero {} before resize; children keep their {}", id, axis, axis);
                1.0
            } else {
                new / old
            }
        };
        let sx = ratio(size.x, old.x, "width");
        let sy = ratio(size.y, old.y, "height");

        for child in self.children(id).to_vec() {
            let Some(slot) = self.nodes.get_mut(child) else {
                continue;
            };
            if slot.entity.is_some() {
                continue;
            }
            if let Some(body) = slot.body.as_deref_mut() {
                if body.resize_with_parent() {
                    body.scale(sx, sy);
                }
            }
        }
        Ok(())
    }

    /// Replace position and size together
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<(), SceneError> {
        self.set_position(id, rect.top_left())?;
        self.set_size(id, rect.size())
    }

    /// Rotation in degrees
    pub fn angle(&self, id: NodeId) -> Result<f32, SceneError> {
        Ok(self.entity(id)?.angle)
    }

    /// Rotate around the entity's centre
    pub fn set_angle(&mut self, id: NodeId, degrees: f32) -> Result<(), SceneError> {
        self.entity_mut(id)?.angle = degrees;
        Ok(())
    }

    /// Whether collision queries consider the entity
    pub fn collideable(&self, id: NodeId) -> Result<bool, SceneError> {
        Ok(self.entity(id)?.collideable)
    }

    /// Opt an entity in or out of collision queries
    pub fn set_collideable(&mut self, id: NodeId, collideable: bool) -> Result<(), SceneError> {
        self.entity_mut(id)?.collideable = collideable;
        Ok(())
    }

    /// Whether the click controller reacts to the pointer
    pub fn clickable(&self, id: NodeId) -> Result<bool, SceneError> {
        Ok(self.entity(id)?.clickable)
    }

    /// Opt an entity in or out of mouse events
    pub fn set_clickable(&mut self, id: NodeId, clickable: bool) -> Result<(), SceneError> {
        self.entity_mut(id)?.clickable = clickable;
        Ok(())
    }

    /// The click controller created with the entity
    pub fn click_controller(&self, id: NodeId) -> Option<NodeId> {
        self.entity(id).ok()?.click_controller
    }

    /// Transform from a node's local space into its parent's space
    ///
    /// Identity for the root and for leaves, which draw in their parent's space.
    pub fn local_transform(&self, id: NodeId) -> Result<Mat3, SceneError> {
        let slot = self.slot(id)?;
        Ok(slot.entity.as_ref().map_or_else(Mat3::identity, EntityState::local_transform))
    }

    /// Transform from a node's local space into window space
    pub fn world_transform(&self, id: NodeId) -> Result<Mat3, SceneError> {
        let mut transform = self.local_transform(id)?;
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            transform = self.local_transform(ancestor)? * transform;
            current = self.parent(ancestor);
        }
        Ok(transform)
    }

    /// Window-space position of a point in the node's local space
    pub fn window_position(&self, id: NodeId, local: Vec2) -> Result<Vec2, SceneError> {
        Ok(math::transform_point(&self.world_transform(id)?, local))
    }

    /// Local-space position of a window-space point
    pub fn local_position(&self, id: NodeId, window: Vec2) -> Result<Vec2, SceneError> {
        let inverse = self.world_transform(id)?.try_inverse().unwrap_or_else(Mat3::identity);
        Ok(math::transform_point(&inverse, window))
    }

    /// Window-space bounding box of an entity
    ///
    /// Exact for unrotated chains; otherwise the box around the four transformed
    /// corners.
    pub fn window_rect(&self, id: NodeId) -> Result<Rect, SceneError> {
        let size = self.entity(id)?.rect.size();
        let world = self.world_transform(id)?;
        let corners = Rect::from_size(size.x, size.y)
            .corners()
            .map(|corner| math::transform_point(&world, corner));
        Ok(Rect::bounding(corners).unwrap_or_default())
    }

    /// Whether an entity overlaps a probe
    ///
    /// Points are tested against the entity's true (possibly rotated) outline; rects
    /// and other entities against window-space bounding boxes. An entity never
    /// collides with itself.
    pub fn collides(&self, id: NodeId, probe: &Probe) -> Result<bool, SceneError> {
        let size = self.entity(id)?.rect.size();
        match *probe {
            Probe::Point(point) => {
                let local = self.local_position(id, point)?;
                Ok(Rect::from_size(size.x, size.y).contains(local))
            }
            Probe::Rect(rect) => Ok(self.window_rect(id)?.intersects(&rect)),
            Probe::Node(other) if other == id => Ok(false),
            Probe::Node(other) => Ok(self.window_rect(id)?.intersects(&self.window_rect(other)?)),
        }
    }

    /// Move an entity straight towards `target` by at most `max_distance`
    ///
    /// Returns the distance left over once the target is reached, or zero when the
    /// target is still ahead. A non-positive `max_distance` does nothing.
    pub fn move_towards(&mut self, id: NodeId, target: Vec2, max_distance: f32) -> Result<f32, SceneError> {
        let position = self.position(id)?;
        if max_distance <= 0.0 {
            return Ok(0.0);
        }

        let offset = target - position;
        let distance = math::utils::distance(position, target);
        if max_distance >= distance {
            self.set_position(id, target)?;
            return Ok(max_distance - distance);
        }

        self.set_position(id, position + offset * (max_distance / distance))?;
        Ok(0.0)
    }
}
