//! # Unified Configuration System
//!
//! All engine configuration lives here: window/viewport size, input timing,
//! scene-graph misuse policy, frame timing and logging.
//!
//! Every section uses `#[serde(default)]`, so a config file only needs the keys it
//! wants to override:
//!
//! ```toml
//! log_level = "debug"
//!
//! [input]
//! hover_delay_secs = 0.75
//!
//! [scene]
//! misuse_policy = "strict"
//! ```

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Window Configuration
///
/// The window itself is created by the host; the engine only needs its size to
/// build the projection and cull off-screen graphics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Window title, passed through to the host
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Scene Engine".to_string(),
        }
    }
}

/// # Input Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Seconds the pointer must rest on an entity before it receives a hover event
    pub hover_delay_secs: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { hover_delay_secs: 0.5 }
    }
}

/// How the scene graph reacts to tree-mutation misuse
///
/// Misuse means adding a node that already has a parent, or removing a node from a
/// container that does not hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MisusePolicy {
    /// Log a warning and carry out the caller's intent anyway
    #[default]
    Warn,
    /// Refuse the operation and return an error, leaving the tree untouched
    Strict,
}

/// # Scene Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Reaction to double-add and wrong-container removal
    pub misuse_policy: MisusePolicy,
}

/// # Timing Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed seconds per tick; `None` uses the wall clock
    pub fixed_timestep: Option<f32>,
    /// Stop the main loop after this many frames; `None` runs until close is requested
    pub max_frames: Option<u64>,
}

/// # Engine Configuration
///
/// Top-level configuration that applications hand to [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter for the engine (`env_logger` syntax)
    pub log_level: String,
    /// Window and viewport settings
    pub window: WindowConfig,
    /// Pointer timing settings
    pub input: InputConfig,
    /// Scene-graph behaviour
    pub scene: SceneConfig,
    /// Frame timing
    pub timing: TimingConfig,
}

impl EngineConfig {
    /// Create a new engine configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            input: InputConfig::default(),
            scene: SceneConfig::default(),
            timing: TimingConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set hover delay in seconds
    pub fn with_hover_delay(mut self, seconds: f32) -> Self {
        self.input.hover_delay_secs = seconds;
        self
    }

    /// Set misuse policy
    pub fn with_misuse_policy(mut self, policy: MisusePolicy) -> Self {
        self.scene.misuse_policy = policy;
        self
    }

    /// Use a fixed timestep instead of the wall clock
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.timing.fixed_timestep = Some(step);
        self
    }

    /// Stop the main loop after a number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.timing.max_frames = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if !self.input.hover_delay_secs.is_finite() || self.input.hover_delay_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hover delay must be a non-negative number of seconds, got {}",
                self.input.hover_delay_secs
            )));
        }

        if let Some(step) = self.timing.fixed_timestep {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::Invalid(format!("fixed timestep must be positive, got {step}")));
            }
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            log_level = "debug"

            [input]
            hover_delay_secs = 0.75

            [scene]
            misuse_policy = "strict"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.input.hover_delay_secs, 0.75);
        assert_eq!(config.scene.misuse_policy, MisusePolicy::Strict);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.timing.fixed_timestep, None);
    }

    #[test]
    fn test_ron_round_trip_through_text() {
        let config = EngineConfig::new()
            .with_window_size(320, 240)
            .with_fixed_timestep(1.0 / 60.0);
        let text = ron::ser::to_string(&config).unwrap();

        assert_eq!(EngineConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default().with_window_size(0, 600).validate().is_err());
        assert!(EngineConfig::default().with_hover_delay(-1.0).validate().is_err());
        assert!(EngineConfig::default().with_fixed_timestep(0.0).validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = EngineConfig::default().save_to_file("engine.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
