//! Core engine implementation
//!
//! The engine owns the scene and drives it one frame at a time:
//!
//! 1. Update pass over the scene, with a fresh [`Tick`]
//! 2. Click arbitration: the first requester of each contested event wins
//! 3. Render pass through the host's [`RenderBackend`]
//! 4. Input edges roll over to the next frame

use crate::{
    application::{AppError, AppEvent, Application},
    config::ConfigError,
    core::config::EngineConfig,
    events::ClickArbiter,
    foundation::{
        logging,
        math::{self, Mat3},
        rect::Rect,
        time::{Clock, FixedTimestep, Timer},
    },
    input::InputState,
    render::RenderBackend,
    scene::{Scene, Tick},
};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates the scene, input and clock and runs the main loop.
pub struct Engine {
    /// Scene graph driven by this engine
    pub scene: Scene,

    /// Input state fed by the host
    pub input: InputState,

    /// Per-tick mouse-event requests
    clicks: ClickArbiter,

    /// Frame timing
    clock: Box<dyn Clock>,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,

    /// Frames stepped so far
    frame: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let clock: Box<dyn Clock> = match config.timing.fixed_timestep {
            Some(step) => Box::new(FixedTimestep::new(step)),
            None => Box::new(Timer::new()),
        };

        Ok(Self {
            scene: Scene::new(&config),
            input: InputState::new(),
            clicks: ClickArbiter::new(),
            clock,
            config,
            running: true,
            frame: 0,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Stops when the application or host requests it, or once
    /// `timing.max_frames` frames have been stepped.
    pub fn run<T: Application>(
        config: EngineConfig,
        app: &mut T,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        logging::init_with_filter(&config.log_level);
        let mut engine = Self::new(config)?;

        // Initialize application
        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            if engine.config.timing.max_frames.is_some_and(|max| engine.frame >= max) {
                log::info!("Reached frame limit of {}", engine.frame);
                break;
            }
            let delta_time = engine.clock.tick();

            // Update application
            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            engine.step(delta_time, backend);
        }

        // Cleanup
        app.cleanup(&mut engine);

        log::info!("Engine shutdown complete after {} frame(s)", engine.frame);
        Ok(())
    }

    /// Advance the scene by one frame and draw it
    pub fn step(&mut self, delta_time: f32, backend: &mut dyn RenderBackend) {
        {
            let mut tick = Tick::new(delta_time, &self.input, &mut self.clicks);
            self.scene.update(&mut tick);
        }

        for (event, entity) in self.clicks.flush() {
            self.scene.dispatch_mouse_event(entity, event);
        }

        let projection = self.projection();
        self.scene.render(backend, &projection);

        self.input.end_frame();
        self.frame += 1;
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) -> Result<(), AppError> {
        match event {
            AppEvent::WindowCloseRequested => {
                self.quit();
            }
            AppEvent::WindowResized { width, height } => {
                log::debug!("Viewport resized to {}x{}", width, height);
                self.config.window.width = width;
                self.config.window.height = height;
                self.scene.set_viewport(Rect::from_size(width as f32, height as f32));
            }
            AppEvent::Input(input) => {
                self.input.handle_event(input);
            }
            AppEvent::WindowFocused | AppEvent::WindowUnfocused => {}
        }

        Ok(())
    }

    /// Window space to clip space for the current viewport
    pub fn projection(&self) -> Mat3 {
        let viewport = self.scene.viewport();
        math::orthographic(viewport.w, viewport.h)
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Get the scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get mutable access to the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Get the input state
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
