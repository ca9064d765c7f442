//! Headless click-board demo
//!
//! Lays out a grid of clickable tiles, then replays a scripted pointer path through
//! the engine. Tiles light up while hovered, turn and drain their bar when clicked,
//! and pop after their third click. Mouse events and draw calls go to the log.
//!
//! Run with `RUST_LOG=debug` to see the scene graph's own lifecycle logging. An
//! optional first argument names a `.toml` or `.ron` engine config.

use scene_engine::config::Config;
use scene_engine::prelude::*;

const TILE: f32 = 64.0;
const GAP: f32 = 16.0;
const CLICKS_TO_POP: u32 = 3;

const IDLE: Color = Color::rgba(0.3, 0.3, 0.35, 1.0);
const HOT: Color = Color::rgba(0.9, 0.6, 0.2, 1.0);
const PRESSED: Color = Color::rgba(0.9, 0.2, 0.2, 1.0);

/// Entity body of one tile; its first child is the face sprite, its second the bar
struct Tile {
    name: String,
    clicks: u32,
}

impl Tile {
    fn paint(scene: &mut Scene, id: NodeId, color: Color) {
        let Some(&face) = scene.children(id).first() else {
            return;
        };
        if let Some(sprite) = scene.node_mut::<Sprite>(face) {
            sprite.set_color(color);
        }
    }

    fn drain(scene: &mut Scene, id: NodeId, fraction: f32) {
        let Some(&bar) = scene.children(id).get(1) else {
            return;
        };
        if let Some(bar) = scene.node_mut::<Bar>(bar) {
            bar.set_fraction(fraction);
        }
    }
}

impl Node for Tile {
    fn on_mouse_event(&mut self, scene: &mut Scene, id: NodeId, event: MouseEvent) {
        log::info!("{}: {:?}", self.name, event);
        match event {
            MouseEvent::Entered | MouseEvent::LeftReleased => Self::paint(scene, id, HOT),
            MouseEvent::LeftPressed => Self::paint(scene, id, PRESSED),
            MouseEvent::Exited | MouseEvent::Idle => Self::paint(scene, id, IDLE),
            MouseEvent::Hovered => log::info!("{}: {} click(s) so far", self.name, self.clicks),
            MouseEvent::LeftClicked => {
                self.clicks += 1;
                if self.clicks >= CLICKS_TO_POP {
                    log::info!("{} pops", self.name);
                    if let Err(e) = scene.despawn(id) {
                        log::error!("Failed to despawn {}: {}", self.name, e);
                    }
                    return;
                }
                let angle = scene.angle(id).unwrap_or(0.0);
                if let Err(e) = scene.set_angle(id, angle + 15.0) {
                    log::error!("Failed to turn {}: {}", self.name, e);
                }
                Self::drain(scene, id, 1.0 - self.clicks as f32 / CLICKS_TO_POP as f32);
            }
        }
    }
}

/// Board of tiles driven by a scripted pointer
struct Sandbox {
    script: Vec<(u64, InputEvent)>,
    frame: u64,
}

impl Sandbox {
    fn new() -> Self {
        let centre = |column: f32, row: f32| {
            (GAP + column * (TILE + GAP) + TILE / 2.0, GAP + row * (TILE + GAP) + TILE / 2.0)
        };
        let (ax, ay) = centre(0.0, 0.0);
        let (bx, by) = centre(1.0, 0.0);
        let moved = |x, y| InputEvent::PointerMoved { x, y };
        let left = |pressed| InputEvent::MouseButton { button: MouseButton::Left, pressed };

        let mut script = vec![(2, moved(ax, ay))];
        // Three clicks on the first tile pop it
        for click in 0..CLICKS_TO_POP as u64 {
            script.push((5 + click * 4, left(true)));
            script.push((7 + click * 4, left(false)));
        }
        // Press on the second tile, drag off and release outside: no click
        script.extend([
            (24, moved(bx, by)),
            (56, left(true)),
            (58, moved(bx + TILE * 3.0, by)),
            (60, left(false)),
        ]);

        Self { script, frame: 0 }
    }
}

impl Application for Sandbox {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let root = engine.scene.root();
        for row in 0..2 {
            for column in 0..3 {
                let x = GAP + column as f32 * (TILE + GAP);
                let y = GAP + row as f32 * (TILE + GAP);
                let graphics: Vec<Box<dyn Node>> = vec![
                    Box::new(Sprite::new(Rect::from_size(TILE, TILE)).with_color(IDLE).with_resize_with_parent(true)),
                    Box::new(Bar::new(Rect::new(4.0, TILE - 10.0, TILE - 8.0, 6.0), Color::BLACK, Color::WHITE)),
                ];
                let body = Tile { name: format!("tile[{row},{column}]"), clicks: 0 };
                let tile = engine.scene.create_entity_with(Rect::new(x, y, TILE, TILE), 0, body, graphics);
                engine.scene.add(root, tile)?;
            }
        }

        // A backdrop on a higher layer draws first, behind the tiles
        let backdrop = engine.scene.create(Sprite::textured(Rect::from_size(400.0, 200.0), TextureId(1)));
        engine.scene.set_layer(backdrop, 100)?;
        engine.scene.add(root, backdrop)?;

        log::info!("Board ready with {} node(s)", engine.scene.node_count());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        let frame = self.frame;
        let due: Vec<InputEvent> = self
            .script
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, event)| *event)
            .collect();
        for event in due {
            self.handle_event(engine, event.into())?;
        }
        self.frame += 1;
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let root = engine.scene.root();
        let tiles = engine.scene.entities_of::<Tile>(root, false);
        log::info!("{} tile(s) left after {} frame(s)", tiles.len(), engine.frame());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default()
            .with_window_size(400, 200)
            .with_fixed_timestep(1.0 / 60.0)
            .with_max_frames(90),
    };

    let mut app = Sandbox::new();
    let mut backend = RecordingBackend::new();
    Engine::run(config, &mut app, &mut backend)?;

    log::info!("{} draw call(s) recorded", backend.draws().len());
    Ok(())
}
