//! Per-tick update and render passes
//!
//! Both passes iterate snapshots of the container indices and re-check each node's
//! parent before touching it. A node removed earlier in the same pass is skipped;
//! a node added during the pass waits for the next tick.

use super::node::{Capabilities, Tick};
use super::scene_graph::Scene;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat3;
use crate::render::RenderBackend;

impl Scene {
    /// Run one update pass over the whole tree
    ///
    /// Entities update their children first, then their own body, so a click
    /// controller has already stepped when its entity's body runs.
    pub fn update(&mut self, tick: &mut Tick<'_>) {
        let root = self.root();
        self.update_container(root, tick);
    }

    fn update_container(&mut self, container: NodeId, tick: &mut Tick<'_>) {
        let Ok(snapshot) = self.container(container).map(|c| c.updatables().to_vec()) else {
            return;
        };

        for child in snapshot {
            let Some(slot) = self.nodes.get(child) else {
                continue;
            };
            if slot.parent != Some(container) || !slot.active {
                continue;
            }

            if slot.entity.is_some() {
                self.update_container(child, tick);
                let still_here = self.nodes.get(child).is_some_and(|slot| {
                    slot.parent == Some(container) && slot.body_caps.contains(Capabilities::UPDATE)
                });
                if !still_here {
                    continue;
                }
            }
            self.with_body(child, |body, scene| body.update(scene, child, tick));
        }
    }

    /// Draw the whole tree, back to front
    ///
    /// Within each container the highest layer is drawn first and layer 0 last, so
    /// lower layers end up on top. Invisible nodes hide their whole subtree; leaves
    /// are culled against the viewport.
    pub fn render(&mut self, backend: &mut dyn RenderBackend, projection: &Mat3) {
        let root = self.root();
        self.render_container(root, backend, projection, &Mat3::identity());
    }

    fn render_container(
        &mut self,
        container: NodeId,
        backend: &mut dyn RenderBackend,
        projection: &Mat3,
        model_view: &Mat3,
    ) {
        let Some(children) = self.container_slot_mut(container) else {
            return;
        };
        let layers = children.sorted_layers().to_vec();

        for layer in layers.into_iter().rev() {
            let Ok(snapshot) = self.container(container).map(|c| c.layer(layer).to_vec()) else {
                return;
            };

            for child in snapshot {
                let Some(slot) = self.nodes.get(child) else {
                    continue;
                };
                if slot.parent != Some(container) || !slot.visible {
                    continue;
                }

                if let Some(entity) = slot.entity.as_ref() {
                    let child_view = model_view * entity.local_transform();
                    self.render_body(child, backend, projection, &child_view, false);
                    self.render_container(child, backend, projection, &child_view);
                } else {
                    self.render_body(child, backend, projection, model_view, true);
                }
            }
        }
    }

    fn render_body(
        &mut self,
        id: NodeId,
        backend: &mut dyn RenderBackend,
        projection: &Mat3,
        model_view: &Mat3,
        cull: bool,
    ) {
        let viewport = self.viewport();
        let Some(slot) = self.nodes.get_mut(id) else {
            return;
        };
        if !slot.body_caps.contains(Capabilities::RENDER) {
            return;
        }
        // A body whose hook is running cannot draw itself this frame
        let Some(body) = slot.body.as_deref_mut() else {
            return;
        };
        if cull && !body.is_on_screen(model_view, &viewport) {
            log::trace!("Culled {:?}", id);
            return;
        }
        body.render(backend, projection, model_view);
    }
}
