//! Scene arena and tree mutation
//!
//! Every node lives in one [`SlotMap`](crate::foundation::collections::SlotMap)
//! owned by the [`Scene`]. Parent links are plain ids, so the container is the only
//! owner of a child's place in the tree. The root container is created with the
//! scene and its local space is window space.

use thiserror::Error;

use super::click::ClickController;
use super::container::Container;
use super::entity::EntityState;
use super::node::{Blank, Capabilities, Node};
use crate::core::config::{EngineConfig, MisusePolicy};
use crate::events::MouseEvent;
use crate::foundation::collections::{NodeId, NodeMap};
use crate::foundation::rect::Rect;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id was never issued or the node was despawned
    #[error("Node {0:?} does not exist")]
    NodeNotFound(NodeId),

    /// The node has no container and cannot hold children
    #[error("Node {0:?} cannot hold children")]
    NotAContainer(NodeId),

    /// The node has no rectangle, angle or click state
    #[error("Node {0:?} is not an entity")]
    NotAnEntity(NodeId),

    /// The container is the node itself or one of its descendants
    #[error("Adding {node:?} to {container:?} would create a cycle")]
    WouldCycle {
        /// Node being added
        node: NodeId,
        /// Intended container
        container: NodeId,
    },

    /// The node is still held by another container
    #[error("Node {node:?} already has parent {parent:?}")]
    AlreadyParented {
        /// Node being added
        node: NodeId,
        /// Its current parent
        parent: NodeId,
    },

    /// The node is not held by the container it was removed from
    #[error("Node {node:?} is not a child of {container:?}")]
    NotAChild {
        /// Node being removed
        node: NodeId,
        /// Container named by the caller
        container: NodeId,
    },

    /// The root is never added to a container or despawned
    #[error("The root node cannot be {0}")]
    RootNode(&'static str),
}

/// Hook delivery that had to wait for a busy body
#[derive(Debug, Clone, Copy)]
enum Hook {
    Added,
    Removed,
    Mouse(MouseEvent),
}

/// Arena entry for one node
pub(crate) struct NodeSlot {
    pub(crate) parent: Option<NodeId>,
    /// What the body itself asked for
    pub(crate) body_caps: Capabilities,
    /// What the parent container indexed it under
    pub(crate) capabilities: Capabilities,
    pub(crate) layer: i32,
    pub(crate) visible: bool,
    pub(crate) active: bool,
    /// `None` while one of the body's hooks is running
    pub(crate) body: Option<Box<dyn Node>>,
    pub(crate) container: Option<Container>,
    pub(crate) entity: Option<EntityState>,
}

impl NodeSlot {
    fn new(body: Box<dyn Node>, layer: i32) -> Self {
        let body_caps = body.capabilities();
        Self {
            parent: None,
            body_caps,
            capabilities: body_caps,
            layer,
            visible: true,
            active: true,
            body: Some(body),
            container: None,
            entity: None,
        }
    }
}

/// Retained 2D scene graph
///
/// Nodes are created detached, then linked into the tree with [`Scene::add`].
/// Leaves draw graphics; entities own a [`Container`] of children, a rectangle and
/// a click controller.
pub struct Scene {
    pub(crate) nodes: NodeMap<NodeSlot>,
    root: NodeId,
    viewport: Rect,
    hover_delay: f32,
    misuse_policy: MisusePolicy,
    deferred: Vec<(NodeId, Hook)>,
}

impl Scene {
    /// Create an empty scene sized to the configured window
    pub fn new(config: &EngineConfig) -> Self {
        let mut nodes = NodeMap::with_key();
        let mut root = NodeSlot::new(Box::new(Blank), 0);
        root.container = Some(Container::new());
        let root = nodes.insert(root);

        log::debug!("Scene created with root {:?}", root);
        Self {
            nodes,
            root,
            viewport: Rect::from_size(config.window.width as f32, config.window.height as f32),
            hover_delay: config.input.hover_delay_secs,
            misuse_policy: config.scene.misuse_policy,
            deferred: Vec::new(),
        }
    }

    /// The root container; its local space is window space
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Window-space area used for on-screen culling
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Resize the viewport, e.g. after the window was resized
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Hover delay handed to new click controllers
    pub fn hover_delay(&self) -> f32 {
        self.hover_delay
    }

    /// Reaction to double-add and wrong-container removal
    pub fn misuse_policy(&self) -> MisusePolicy {
        self.misuse_policy
    }

    /// Change the reaction to double-add and wrong-container removal
    pub fn set_misuse_policy(&mut self, policy: MisusePolicy) {
        self.misuse_policy = policy;
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ---- creation ------------------------------------------------------------

    /// Create a detached leaf node
    pub fn create(&mut self, body: impl Node) -> NodeId {
        self.create_boxed(Box::new(body))
    }

    /// Create a detached leaf node from a boxed body
    pub fn create_boxed(&mut self, body: Box<dyn Node>) -> NodeId {
        let id = self.nodes.insert(NodeSlot::new(body, 0));
        log::trace!("Created node {:?}", id);
        id
    }

    /// Create a detached entity with no graphics children
    pub fn create_entity(&mut self, rect: Rect, layer: i32, body: impl Node) -> NodeId {
        self.create_entity_with(rect, layer, body, Vec::new())
    }

    /// Create a detached entity
    ///
    /// The graphics are added as children in order, followed by the entity's click
    /// controller. Leaves keep their own layers.
    pub fn create_entity_with(
        &mut self,
        rect: Rect,
        layer: i32,
        body: impl Node,
        graphics: Vec<Box<dyn Node>>,
    ) -> NodeId {
        let mut slot = NodeSlot::new(Box::new(body), layer);
        slot.container = Some(Container::new());
        slot.entity = Some(EntityState::new(rect));
        let entity = self.nodes.insert(slot);

        for graphic in graphics {
            let child = self.create_boxed(graphic);
            self.link(entity, child);
        }

        let controller = self.create(ClickController::new(self.hover_delay));
        self.link(entity, controller);
        if let Some(state) = self.nodes.get_mut(entity).and_then(|slot| slot.entity.as_mut()) {
            state.click_controller = Some(controller);
        }

        log::debug!("Created entity {:?} at {:?} on layer {}", entity, rect, layer);
        entity
    }

    /// Create an entity and add it to `container` in one go
    pub fn spawn_entity(
        &mut self,
        container: NodeId,
        rect: Rect,
        layer: i32,
        body: impl Node,
    ) -> Result<NodeId, SceneError> {
        self.container(container)?;
        let entity = self.create_entity(rect, layer, body);
        self.add(container, entity)?;
        Ok(entity)
    }

    /// Detach a node, then free it together with its whole subtree
    ///
    /// Every node in the subtree receives `on_removed` before it is freed. Nodes that
    /// a hook re-parented elsewhere during the teardown survive.
    pub fn despawn(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootNode("despawned"));
        }
        self.slot(id)?;

        let subtree = self.subtree(id);
        self.detach(id)?;
        if self.is_container(id) {
            self.remove_all(id, true)?;
        }

        let mut freed = 0;
        for node in subtree {
            if self.nodes.get(node).is_some_and(|slot| slot.parent.is_none()) {
                self.free(node);
                freed += 1;
            }
        }
        log::debug!("Despawned {:?} ({} node(s) freed)", id, freed);
        Ok(())
    }

    // ---- tree mutation -------------------------------------------------------

    /// Add `node` to `container`
    ///
    /// The parent link and the container's indices are in place before the node's
    /// `on_added` runs. A node that already has a parent is handled per
    /// [`MisusePolicy`]: `Warn` detaches it first, `Strict` refuses.
    pub fn add(&mut self, container: NodeId, node: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootNode("added to a container"));
        }
        self.container(container)?;
        self.slot(node)?;
        if self.is_ancestor_or_self(node, container) {
            return Err(SceneError::WouldCycle { node, container });
        }

        let current = self.slot(node)?.parent;
        if let Some(parent) = current {
            match self.misuse_policy {
                MisusePolicy::Strict => return Err(SceneError::AlreadyParented { node, parent }),
                MisusePolicy::Warn => {
                    log::warn!(
                        "Adding {:?} to {:?} while it is still a child of {:?}; detaching it first",
                        node,
                        container,
                        parent
                    );
                    self.unlink(parent, node);
                    // on_removed may have despawned either end or re-parented the node
                    self.container(container)?;
                    if let Some(parent) = self.slot(node)?.parent {
                        return Err(SceneError::AlreadyParented { node, parent });
                    }
                }
            }
        }

        self.link(container, node);
        Ok(())
    }

    /// Remove `node` from `container`
    ///
    /// A node that is not a child of `container` is handled per [`MisusePolicy`]:
    /// `Warn` removes it from whatever container actually holds it, `Strict` refuses.
    pub fn remove(&mut self, container: NodeId, node: NodeId) -> Result<(), SceneError> {
        self.container(container)?;
        let parent = self.slot(node)?.parent;

        match parent {
            Some(parent) if parent == container => self.unlink(container, node),
            _ if self.misuse_policy == MisusePolicy::Strict => {
                return Err(SceneError::NotAChild { node, container });
            }
            Some(parent) => {
                log::warn!(
                    "Removing {:?} from {:?}, but its parent is {:?}; removing it from there",
                    node,
                    container,
                    parent
                );
                self.unlink(parent, node);
            }
            None => log::warn!("Removing {:?} from {:?}, but it has no parent", node, container),
        }
        Ok(())
    }

    /// Remove a node from its parent, if it has one
    pub fn detach(&mut self, node: NodeId) -> Result<(), SceneError> {
        if let Some(parent) = self.slot(node)?.parent {
            self.unlink(parent, node);
        }
        Ok(())
    }

    /// Remove every child of `container`
    ///
    /// With `cascade`, a child that holds children of its own is emptied first, all the
    /// way down. Children are visited in a snapshot of the child list, so hooks that
    /// mutate the tree do not disturb the walk.
    pub fn remove_all(&mut self, container: NodeId, cascade: bool) -> Result<(), SceneError> {
        let children = self.container(container)?.entities().to_vec();
        log::trace!("Removing {} child(ren) of {:?} (cascade: {})", children.len(), container, cascade);

        for child in children {
            if cascade && self.is_container(child) {
                self.remove_all(child, true)?;
            }
            if self.parent(child) == Some(container) {
                self.unlink(container, child);
            }
        }
        Ok(())
    }

    /// Change a node's draw layer; its container re-buckets it
    pub fn set_layer(&mut self, node: NodeId, layer: i32) -> Result<(), SceneError> {
        let slot = self.slot_mut(node)?;
        let old = std::mem::replace(&mut slot.layer, layer);
        let parent = slot.parent;

        if let Some(container) = parent.and_then(|parent| self.container_slot_mut(parent)) {
            container.relayer(node, old, layer);
        }
        Ok(())
    }

    /// Show or hide a node and, for entities, its whole subtree
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), SceneError> {
        self.slot_mut(node)?.visible = visible;
        Ok(())
    }

    /// Pause or resume updates for a node and, for entities, its whole subtree
    pub fn set_active(&mut self, node: NodeId, active: bool) -> Result<(), SceneError> {
        self.slot_mut(node)?.active = active;
        Ok(())
    }

    // ---- queries -------------------------------------------------------------

    /// Parent container of a node
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|slot| slot.parent)
    }

    /// Children of a container, in insertion order; empty for leaves
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .and_then(|slot| slot.container.as_ref())
            .map_or(&[][..], Container::entities)
    }

    /// The container of a node
    pub fn container(&self, node: NodeId) -> Result<&Container, SceneError> {
        self.slot(node)?.container.as_ref().ok_or(SceneError::NotAContainer(node))
    }

    /// Whether the id refers to a live node
    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Whether `node` is a direct child of `container`
    pub fn contains(&self, container: NodeId, node: NodeId) -> bool {
        self.parent(node) == Some(container)
    }

    /// Whether `node` is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.is_ancestor_or_self(self.root, node)
    }

    /// Whether the node can hold children
    pub fn is_container(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|slot| slot.container.is_some())
    }

    /// Whether the node is an entity
    pub fn is_entity(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|slot| slot.entity.is_some())
    }

    /// Draw layer of a node
    pub fn layer(&self, node: NodeId) -> Option<i32> {
        self.nodes.get(node).map(|slot| slot.layer)
    }

    /// Whether a node is drawn
    pub fn visible(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|slot| slot.visible)
    }

    /// Whether a node is updated
    pub fn active(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|slot| slot.active)
    }

    /// Capabilities the node's parent indexed it under
    pub fn capabilities(&self, node: NodeId) -> Option<Capabilities> {
        self.nodes.get(node).map(|slot| slot.capabilities)
    }

    /// Borrow a node body as its concrete type
    ///
    /// Returns `None` for a missing node, a type mismatch, or a body whose hook is
    /// currently running.
    pub fn node<T: Node>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id)?.body.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow a node body as its concrete type
    pub fn node_mut<T: Node>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id)?.body.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Deliver a mouse event to an entity's body
    pub fn dispatch_mouse_event(&mut self, entity: NodeId, event: MouseEvent) {
        if !self.is_entity(entity) {
            log::warn!("Dropping {:?} for {:?}: not a live entity", event, entity);
            return;
        }
        log::debug!("{:?} -> {:?}", event, entity);
        self.fire(entity, Hook::Mouse(event));
    }

    // ---- internals -----------------------------------------------------------

    pub(crate) fn slot(&self, node: NodeId) -> Result<&NodeSlot, SceneError> {
        self.nodes.get(node).ok_or(SceneError::NodeNotFound(node))
    }

    pub(crate) fn slot_mut(&mut self, node: NodeId) -> Result<&mut NodeSlot, SceneError> {
        self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound(node))
    }

    pub(crate) fn container_slot_mut(&mut self, node: NodeId) -> Option<&mut Container> {
        self.nodes.get_mut(node).and_then(|slot| slot.container.as_mut())
    }

    /// Run `f` with the node body lifted out of the arena
    ///
    /// Returns `None` if the node is missing or its body is already running. A body
    /// whose node was despawned while it ran still receives its pending `on_removed`,
    /// then is dropped.
    pub(crate) fn with_body<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Node, &mut Scene) -> R,
    ) -> Option<R> {
        let mut body = self.nodes.get_mut(id)?.body.take()?;
        let result = f(body.as_mut(), self);

        match self.nodes.get_mut(id) {
            Some(slot) => {
                slot.body = Some(body);
                self.deliver_deferred(id);
            }
            None => {
                let mut pending = Vec::new();
                self.deferred.retain(|&(target, hook)| {
                    if target == id {
                        pending.push(hook);
                    }
                    target != id
                });
                if pending.iter().any(|hook| matches!(hook, Hook::Removed)) {
                    body.on_removed(self, id);
                }
                log::trace!("Body of {:?} dropped after its node was despawned", id);
            }
        }
        Some(result)
    }

    /// Attach without any misuse checks; the caller has validated both ends
    fn link(&mut self, container: NodeId, node: NodeId) {
        let Some(slot) = self.nodes.get_mut(node) else {
            return;
        };
        if let Some(body) = slot.body.as_ref() {
            slot.body_caps = body.capabilities();
        }
        // Entities always take part in both passes, to reach their children
        let capabilities = if slot.entity.is_some() { Capabilities::all() } else { slot.body_caps };
        slot.capabilities = capabilities;
        slot.parent = Some(container);
        let layer = slot.layer;

        if let Some(children) = self.container_slot_mut(container) {
            children.insert(node, capabilities, layer);
        }
        log::trace!("Added {:?} to {:?}", node, container);
        self.fire(node, Hook::Added);
    }

    fn unlink(&mut self, container: NodeId, node: NodeId) {
        let Some(slot) = self.nodes.get_mut(node) else {
            return;
        };
        slot.parent = None;
        let layer = slot.layer;

        if let Some(children) = self.container_slot_mut(container) {
            children.remove(node, layer);
        }
        log::trace!("Removed {:?} from {:?}", node, container);
        self.fire(node, Hook::Removed);
    }

    fn fire(&mut self, id: NodeId, hook: Hook) {
        match self.nodes.get(id) {
            None => return,
            Some(slot) if slot.body.is_none() => {
                self.deferred.push((id, hook));
                return;
            }
            Some(_) => {}
        }
        self.with_body(id, |body, scene| match hook {
            Hook::Added => body.on_added(scene, id),
            Hook::Removed => body.on_removed(scene, id),
            Hook::Mouse(event) => body.on_mouse_event(scene, id, event),
        });
    }

    fn deliver_deferred(&mut self, id: NodeId) {
        while let Some(index) = self.deferred.iter().position(|(target, _)| *target == id) {
            let (_, hook) = self.deferred.remove(index);
            self.fire(id, hook);
            if !self.nodes.contains_key(id) {
                self.deferred.retain(|(target, _)| *target != id);
                return;
            }
        }
    }

    fn free(&mut self, node: NodeId) {
        let Some(slot) = self.nodes.remove(node) else {
            return;
        };
        // Children added by hooks during the teardown are orphaned, not left dangling
        if let Some(container) = slot.container {
            for child in container.entities() {
                if let Some(child) = self.nodes.get_mut(*child) {
                    if child.parent == Some(node) {
                        child.parent = None;
                    }
                }
            }
        }
        // A running body collects its pending hooks once it returns
        if slot.body.is_some() {
            self.deferred.retain(|(target, _)| *target != node);
        }
    }

    /// `node` and all its descendants, parents before children
    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![node];
        let mut index = 0;
        while index < nodes.len() {
            nodes.extend_from_slice(self.children(nodes[index]));
            index += 1;
        }
        nodes
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("viewport", &self.viewport)
            .field("misuse_policy", &self.misuse_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ClickArbiter;
    use crate::input::InputState;
    use crate::scene::Tick;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        log: Log,
    }

    impl Node for Probe {
        fn on_added(&mut self, scene: &mut Scene, id: NodeId) {
            let parent = scene.parent(id);
            self.log.borrow_mut().push(format!("{} added, parent set: {}", self.name, parent.is_some()));
        }

        fn on_removed(&mut self, scene: &mut Scene, id: NodeId) {
            let parent = scene.parent(id);
            self.log.borrow_mut().push(format!("{} removed, parent set: {}", self.name, parent.is_some()));
        }
    }

    struct Ticker;

    impl Node for Ticker {
        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE
        }
    }

    fn probe(scene: &mut Scene, name: &'static str, log: &Log) -> NodeId {
        scene.create(Probe { name, log: log.clone() })
    }

    #[test]
    fn test_parent_link_set_before_hooks() {
        let mut scene = Scene::default();
        let log = Log::default();
        let node = probe(&mut scene, "a", &log);

        scene.add(scene.root(), node).unwrap();
        scene.detach(node).unwrap();

        assert_eq!(*log.borrow(), vec!["a added, parent set: true", "a removed, parent set: false"]);
    }

    #[test]
    fn test_capabilities_are_indexed() {
        let mut scene = Scene::default();
        let root = scene.root();
        let ticker = scene.create(Ticker);
        let blank = scene.create(Blank);
        scene.add(root, ticker).unwrap();
        scene.add(root, blank).unwrap();

        let container = scene.container(root).unwrap();
        assert_eq!(container.entities(), &[ticker, blank]);
        assert_eq!(container.updatables(), &[ticker]);
        assert_eq!(container.renderables().count(), 0);
    }

    #[test]
    fn test_double_add_warn_reparents() {
        let mut scene = Scene::default();
        let log = Log::default();
        let root = scene.root();
        let first = scene.spawn_entity(root, Rect::new(0.0, 0.0, 10.0, 10.0), 0, Blank).unwrap();
        let second = scene.spawn_entity(root, Rect::new(0.0, 0.0, 10.0, 10.0), 0, Blank).unwrap();
        let node = probe(&mut scene, "n", &log);

        scene.add(first, node).unwrap();
        scene.add(second, node).unwrap();

        assert_eq!(scene.parent(node), Some(second));
        assert!(!scene.container(first).unwrap().contains(node));
        assert!(scene.container(second).unwrap().contains(node));
        assert_eq!(log.borrow().len(), 3, "added, removed, added");
    }

    #[test]
    fn test_double_add_strict_refuses() {
        let mut scene = Scene::default();
        scene.set_misuse_policy(MisusePolicy::Strict);
        let root = scene.root();
        let entity = scene.spawn_entity(root, Rect::new(0.0, 0.0, 10.0, 10.0), 0, Blank).unwrap();
        let node = scene.create(Blank);
        scene.add(root, node).unwrap();

        assert_eq!(
            scene.add(entity, node),
            Err(SceneError::AlreadyParented { node, parent: root })
        );
        assert_eq!(scene.parent(node), Some(root));
        assert_eq!(scene.remove(entity, node), Err(SceneError::NotAChild { node, container: entity }));
        assert!(scene.contains(root, node));
    }

    #[test]
    fn test_remove_from_wrong_container_warn() {
        let mut scene = Scene::default();
        let root = scene.root();
        let entity = scene.spawn_entity(root, Rect::new(0.0, 0.0, 10.0, 10.0), 0, Blank).unwrap();
        let node = scene.create(Blank);
        scene.add(root, node).unwrap();

        scene.remove(entity, node).unwrap();
        assert_eq!(scene.parent(node), None);
        assert!(!scene.container(root).unwrap().contains(node));
    }

    #[test]
    fn test_hard_errors() {
        let mut scene = Scene::default();
        let root = scene.root();
        let leaf = scene.create(Blank);
        let entity = scene.spawn_entity(root, Rect::new(0.0, 0.0, 1.0, 1.0), 0, Blank).unwrap();

        assert_eq!(scene.add(leaf, entity), Err(SceneError::NotAContainer(leaf)));
        assert_eq!(scene.add(entity, root), Err(SceneError::RootNode("added to a container")));
        assert_eq!(scene.add(entity, entity), Err(SceneError::WouldCycle { node: entity, container: entity }));
        assert_eq!(scene.despawn(root), Err(SceneError::RootNode("despawned")));

        scene.despawn(leaf).unwrap();
        assert_eq!(scene.add(root, leaf), Err(SceneError::NodeNotFound(leaf)));
    }

    #[test]
    fn test_entity_gets_click_controller_after_graphics() {
        let mut scene = Scene::default();
        let entity = scene.create_entity_with(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            3,
            Blank,
            vec![Box::new(Blank), Box::new(Blank)],
        );

        let children = scene.children(entity).to_vec();
        assert_eq!(children.len(), 3);
        assert!(scene.node::<ClickController>(children[2]).is_some());
        assert_eq!(scene.layer(entity), Some(3));
        assert!(!scene.is_attached(entity));
    }

    #[test]
    fn test_set_layer_rebuckets() {
        let mut scene = Scene::default();
        let root = scene.root();
        let a = scene.spawn_entity(root, Rect::default(), 1, Blank).unwrap();
        let b = scene.spawn_entity(root, Rect::default(), 1, Blank).unwrap();

        scene.set_layer(a, 9).unwrap();

        let container = scene.container(root).unwrap();
        assert_eq!(container.layer(1), &[b]);
        assert_eq!(container.layer(9), &[a]);
    }

    #[test]
    fn test_despawn_frees_subtree() {
        let mut scene = Scene::default();
        let root = scene.root();
        let outer = scene.spawn_entity(root, Rect::default(), 0, Blank).unwrap();
        let inner = scene.spawn_entity(outer, Rect::default(), 0, Blank).unwrap();
        let before = scene.node_count();

        scene.despawn(outer).unwrap();

        assert!(!scene.exists(outer));
        assert!(!scene.exists(inner));
        // two entities, each with a click controller
        assert_eq!(scene.node_count(), before - 4);
        assert!(scene.children(root).is_empty());
    }

    struct SelfRemover;

    impl Node for SelfRemover {
        fn on_added(&mut self, scene: &mut Scene, id: NodeId) {
            scene.despawn(id).unwrap();
        }
    }

    struct Quitter {
        log: Log,
    }

    impl Node for Quitter {
        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE
        }

        fn on_added(&mut self, _scene: &mut Scene, _id: NodeId) {
            self.log.borrow_mut().push("added".to_string());
        }

        fn on_removed(&mut self, _scene: &mut Scene, _id: NodeId) {
            self.log.borrow_mut().push("removed".to_string());
        }

        fn update(&mut self, scene: &mut Scene, id: NodeId, _tick: &mut Tick<'_>) {
            scene.despawn(id).unwrap();
        }
    }

    #[test]
    fn test_self_despawn_still_fires_on_removed() {
        let mut scene = Scene::default();
        let root = scene.root();
        let log = Log::default();
        let quitter = scene.create(Quitter { log: log.clone() });
        scene.add(root, quitter).unwrap();

        let input = InputState::new();
        let mut clicks = ClickArbiter::new();
        scene.update(&mut Tick::new(0.016, &input, &mut clicks));

        assert!(!scene.exists(quitter));
        assert_eq!(*log.borrow(), vec!["added", "removed"]);
        assert!(scene.deferred.is_empty());
    }

    #[test]
    fn test_outside_despawn_fires_on_removed() {
        let mut scene = Scene::default();
        let root = scene.root();
        let log = Log::default();
        let quitter = scene.create(Quitter { log: log.clone() });
        scene.add(root, quitter).unwrap();

        scene.despawn(quitter).unwrap();

        assert_eq!(*log.borrow(), vec!["added", "removed"]);
    }

    #[test]
    fn test_hook_may_despawn_itself() {
        let mut scene = Scene::default();
        let root = scene.root();
        let node = scene.create(SelfRemover);

        scene.add(root, node).unwrap();

        assert!(!scene.exists(node));
        assert!(scene.children(root).is_empty());
    }
}
