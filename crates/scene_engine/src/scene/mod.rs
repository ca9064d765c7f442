//! Scene graph
//!
//! A tree of nodes stored in one arena. Interior nodes are entities: rectangles
//! with a position, a rotation, a click controller and a [`Container`] of children.
//! Leaves are graphics. Each tick the tree is updated depth-first and then drawn
//! back to front by layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut scene = Scene::default();
//! let root = scene.root();
//! let tile = scene.create_entity_with(
//!     Rect::new(10.0, 10.0, 32.0, 32.0),
//!     0,
//!     Blank,
//!     vec![Box::new(Sprite::new(Rect::from_size(32.0, 32.0)))],
//! );
//! scene.add(root, tile).unwrap();
//!
//! assert_eq!(scene.collide(root, &Probe::Point(Vec2::new(20.0, 20.0))), Some(tile));
//! ```

mod click;
mod container;
mod entity;
mod node;
mod query;
mod scene_graph;
mod traversal;


pub use click::{ClickController, ClickState};
pub use container::Container;
pub use entity::EntityState;
pub use node::{AsAny, Blank, Capabilities, Node, Tick};
pub use query::Probe;
pub use scene_graph::{Scene, SceneError};
