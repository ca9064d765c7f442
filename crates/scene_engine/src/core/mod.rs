//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for all engine subsystems
//! - **Foundation**: Low-level utilities (math, rectangles, handles, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    EngineConfig,
    WindowConfig,
    InputConfig,
    SceneConfig,
    TimingConfig,
    MisusePolicy,
    Config,
    ConfigError,
};
