//! Tree listing and collision queries
//!
//! All queries walk depth-first in document order: a container's children in list
//! order, each child checked before its own descendants.

use super::node::{Capabilities, Node};
use super::scene_graph::Scene;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec2;
use crate::foundation::rect::Rect;

/// What a collision query tests entities against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// A window-space point
    Point(Vec2),
    /// A window-space rectangle
    Rect(Rect),
    /// Another entity's window rectangle; never matches the entity itself
    Node(NodeId),
}

impl Scene {
    /// Children of `container`, optionally with all their descendants
    pub fn entities(&self, container: NodeId, consider_children: bool) -> Vec<NodeId> {
        self.select(container, consider_children, |_, _| true)
    }

    /// Children whose body is of type `T`
    ///
    /// A node whose hook is running right now has no body in the arena and is left out.
    pub fn entities_of<T: Node>(&self, container: NodeId, consider_children: bool) -> Vec<NodeId> {
        self.select(container, consider_children, |scene, id| scene.node::<T>(id).is_some())
    }

    /// Children whose body opts into all of `capabilities`
    pub fn entities_with(
        &self,
        container: NodeId,
        capabilities: Capabilities,
        consider_children: bool,
    ) -> Vec<NodeId> {
        self.select(container, consider_children, |scene, id| {
            scene.nodes.get(id).is_some_and(|slot| slot.body_caps.contains(capabilities))
        })
    }

    /// First collideable entity under `container` that overlaps the probe
    pub fn collide(&self, container: NodeId, probe: &Probe) -> Option<NodeId> {
        self.find_collisions(container, probe, &|_: &Scene, _: NodeId| true, true).into_iter().next()
    }

    /// Every collideable entity under `container` that overlaps the probe
    pub fn collide_all(&self, container: NodeId, probe: &Probe) -> Vec<NodeId> {
        self.find_collisions(container, probe, &|_: &Scene, _: NodeId| true, false)
    }

    /// First collideable entity with a body of type `T` that overlaps the probe
    ///
    /// An entity whose hook is running right now is skipped, as in [`Scene::entities_of`].
    pub fn collide_of<T: Node>(&self, container: NodeId, probe: &Probe) -> Option<NodeId> {
        self.find_collisions(container, probe, &|scene: &Scene, id: NodeId| scene.node::<T>(id).is_some(), true)
            .into_iter()
            .next()
    }

    /// Every collideable entity with a body of type `T` that overlaps the probe
    ///
    /// An entity whose hook is running right now is skipped, as in [`Scene::entities_of`].
    pub fn collide_all_of<T: Node>(&self, container: NodeId, probe: &Probe) -> Vec<NodeId> {
        self.find_collisions(container, probe, &|scene: &Scene, id: NodeId| scene.node::<T>(id).is_some(), false)
    }

    fn select(
        &self,
        container: NodeId,
        recursive: bool,
        matches: impl Fn(&Scene, NodeId) -> bool,
    ) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(container, recursive, &mut |id: NodeId| {
            if matches(self, id) {
                found.push(id);
            }
            true
        });
        found
    }

    fn find_collisions(
        &self,
        container: NodeId,
        probe: &Probe,
        matches: &dyn Fn(&Scene, NodeId) -> bool,
        first_only: bool,
    ) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(container, true, &mut |id: NodeId| {
            let hit = self.entity(id).is_ok_and(|state| state.collideable)
                && matches(self, id)
                && self.collides(id, probe).unwrap_or(false);
            if hit {
                found.push(id);
            }
            !(hit && first_only)
        });
        found
    }

    /// Visit descendants in document order until `visit` returns `false`
    fn walk(&self, container: NodeId, recursive: bool, visit: &mut dyn FnMut(NodeId) -> bool) -> bool {
        for &child in self.children(container) {
            if !visit(child) {
                return false;
            }
            if recursive && self.is_container(child) && !self.walk(child, true, visit) {
                return false;
            }
        }
        true
    }
}
