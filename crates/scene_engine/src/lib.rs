//! # Scene Engine
//!
//! A retained-mode 2D scene graph with layered rendering and pointer interaction.
//!
//! ## Features
//!
//! - **Scene Graph**: Arena-backed tree of entities and graphics leaves
//! - **Layered Rendering**: Back-to-front drawing through a pluggable backend
//! - **Pointer Interaction**: Per-entity click/hover state machines with per-tick arbitration
//! - **Coordinate Spaces**: Rotation-aware window/local conversion and hit testing
//! - **Configuration**: TOML/RON engine configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let root = engine.scene.root();
//!         engine.scene.spawn_entity(root, Rect::new(10.0, 10.0, 64.0, 64.0), 0, Blank)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         // Update game logic
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {
//!         // Cleanup resources
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(60);
//!     let mut app = MyApp;
//!     let mut backend = RecordingBackend::new();
//!     Engine::run(config, &mut app, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod input;
pub mod events;
pub mod render;
pub mod graphics;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use core::config::EngineConfig;
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application,
        Engine, EngineConfig, EngineError,
        core::config::MisusePolicy,
        events::MouseEvent,
        foundation::{
            collections::NodeId,
            math::{Mat3, Vec2},
            rect::Rect,
            time::{Clock, FixedTimestep, Timer},
        },
        graphics::{Bar, Sprite},
        input::{InputEvent, InputState, KeyCode, MouseButton},
        render::{Color, RecordingBackend, RenderBackend, TextureId},
        scene::{Blank, Capabilities, ClickState, Node, Probe, Scene, SceneError, Tick},
    };
}
