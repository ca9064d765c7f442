//! Per-entity click and hover state machine
//!
//! Every entity gets a [`ClickController`] child when it is created. Each tick the
//! controller compares the pointer with its entity's outline and the left button's
//! press/release edges, moves between [`ClickState`]s, and turns the transitions
//! into [`MouseEvent`]s.
//!
//! `Exited` and `Idle` go straight to the entity. Every other event is filed with
//! the tick's [`ClickArbiter`](crate::events::ClickArbiter), so when entities
//! overlap only the first one updated this tick receives it.

use super::node::{Capabilities, Node, Tick};
use super::query::Probe;
use super::scene_graph::Scene;
use crate::events::MouseEvent;
use crate::foundation::collections::NodeId;
use crate::foundation::time::Countdown;
use crate::input::MouseButton;

/// Pointer interaction state of one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickState {
    /// Pointer is elsewhere
    #[default]
    None,
    /// Pointer is over the entity, button up
    Hovering,
    /// Button went down on the entity and the pointer is still over it
    PushedAndHovered,
    /// Button went down on the entity and the pointer has left it
    PushedNotHovered,
}

/// Updatable node driving an entity's [`ClickState`]
#[derive(Debug, Clone)]
pub struct ClickController {
    state: ClickState,
    hover: Countdown,
}

impl ClickController {
    /// Create an idle controller with the given hover delay in seconds
    pub fn new(hover_delay: f32) -> Self {
        Self {
            state: ClickState::None,
            hover: Countdown::new(hover_delay),
        }
    }

    /// Current state
    pub fn state(&self) -> ClickState {
        self.state
    }

    /// Advance the state machine by one tick
    ///
    /// `inside` says whether the pointer is over a clickable `entity` this tick.
    /// Contested events are requested from `tick.clicks`; the returned events skip
    /// arbitration and should be delivered to the entity right away.
    pub fn step(&mut self, entity: NodeId, inside: bool, tick: &mut Tick<'_>) -> Vec<MouseEvent> {
        let pressed = tick.input.was_button_pressed(MouseButton::Left);
        let released = tick.input.was_button_released(MouseButton::Left);
        let mut direct = Vec::new();

        match self.state {
            ClickState::None => {
                if inside {
                    self.state = ClickState::Hovering;
                    self.hover.arm();
                    tick.clicks.request(MouseEvent::Entered, entity);
                }
            }
            ClickState::Hovering => {
                if !inside {
                    self.state = ClickState::None;
                    self.hover.disarm();
                    direct.extend([MouseEvent::Exited, MouseEvent::Idle]);
                } else if pressed {
                    self.state = ClickState::PushedAndHovered;
                    self.hover.arm();
                    tick.clicks.request(MouseEvent::LeftPressed, entity);
                } else {
                    // Button held before the pointer arrived
                    if released {
                        tick.clicks.request(MouseEvent::LeftReleased, entity);
                    }
                    if self.hover.advance(tick.elapsed) {
                        tick.clicks.request(MouseEvent::Hovered, entity);
                    }
                }
            }
            ClickState::PushedAndHovered => {
                if !inside {
                    self.hover.disarm();
                    if released {
                        self.state = ClickState::None;
                        direct.push(MouseEvent::Idle);
                    } else {
                        self.state = ClickState::PushedNotHovered;
                    }
                } else if released {
                    self.state = ClickState::None;
                    self.hover.disarm();
                    tick.clicks.request(MouseEvent::LeftReleased, entity);
                    tick.clicks.request(MouseEvent::LeftClicked, entity);
                } else if self.hover.advance(tick.elapsed) {
                    tick.clicks.request(MouseEvent::Hovered, entity);
                }
            }
            ClickState::PushedNotHovered => {
                if released {
                    self.state = ClickState::None;
                    direct.push(MouseEvent::Idle);
                } else if inside {
                    self.state = ClickState::PushedAndHovered;
                    self.hover.arm();
                }
            }
        }
        direct
    }
}

impl Node for ClickController {
    fn capabilities(&self) -> Capabilities {
        Capabilities::UPDATE
    }

    fn update(&mut self, scene: &mut Scene, id: NodeId, tick: &mut Tick<'_>) {
        let Some(entity) = scene.parent(id) else {
            return;
        };
        let Ok(clickable) = scene.clickable(entity) else {
            return;
        };
        let inside = clickable
            && scene
                .collides(entity, &Probe::Point(tick.input.pointer()))
                .unwrap_or(false);

        for event in self.step(entity, inside, tick) {
            scene.dispatch_mouse_event(entity, event);
        }
    }
}

impl Scene {
    /// Click state of an entity, read from its click controller
    ///
    /// `None` once the controller no longer belongs to the entity.
    pub fn click_state(&self, entity: NodeId) -> Option<ClickState> {
        let controller = self.click_controller(entity)?;
        if self.parent(controller) != Some(entity) {
            return None;
        }
        self.node::<ClickController>(controller).map(ClickController::state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ClickArbiter;
    use crate::foundation::collections::NodeMap;
    use crate::input::InputState;

    struct Harness {
        input: InputState,
        clicks: ClickArbiter,
        entity: NodeId,
        controller: ClickController,
    }

    impl Harness {
        fn new() -> Self {
            let mut ids = NodeMap::<()>::with_key();
            Self {
                input: InputState::new(),
                clicks: ClickArbiter::new(),
                entity: ids.insert(()),
                controller: ClickController::new(0.5),
            }
        }

        /// Run one tick and return (direct events, arbitrated winners)
        fn tick(&mut self, inside: bool, button_down: bool, elapsed: f32) -> (Vec<MouseEvent>, Vec<MouseEvent>) {
            self.input.set_button(MouseButton::Left, button_down);
            let mut tick = Tick::new(elapsed, &self.input, &mut self.clicks);
            let direct = self.controller.step(self.entity, inside, &mut tick);
            let won = self.clicks.flush().into_iter().map(|(event, _)| event).collect();
            self.input.end_frame();
            (direct, won)
        }
    }

    #[test]
    fn test_enter_then_exit() {
        let mut h = Harness::new();

        assert_eq!(h.tick(true, false, 0.1), (vec![], vec![MouseEvent::Entered]));
        assert_eq!(h.controller.state(), ClickState::Hovering);

        assert_eq!(h.tick(false, false, 0.1), (vec![MouseEvent::Exited, MouseEvent::Idle], vec![]));
        assert_eq!(h.controller.state(), ClickState::None);

        assert_eq!(h.tick(false, false, 0.1), (vec![], vec![]), "exit fires once");
    }

    #[test]
    fn test_press_release_inside_is_click() {
        let mut h = Harness::new();
        h.tick(true, false, 0.1);

        assert_eq!(h.tick(true, true, 0.1).1, vec![MouseEvent::LeftPressed]);
        assert_eq!(h.controller.state(), ClickState::PushedAndHovered);

        assert_eq!(h.tick(true, false, 0.1).1, vec![MouseEvent::LeftReleased, MouseEvent::LeftClicked]);
        assert_eq!(h.controller.state(), ClickState::None);
    }

    #[test]
    fn test_release_outside_is_not_click() {
        let mut h = Harness::new();
        h.tick(true, false, 0.1);
        h.tick(true, true, 0.1);

        assert_eq!(h.tick(false, true, 0.1), (vec![], vec![]));
        assert_eq!(h.controller.state(), ClickState::PushedNotHovered);

        assert_eq!(h.tick(false, false, 0.1), (vec![MouseEvent::Idle], vec![]));
        assert_eq!(h.controller.state(), ClickState::None);
    }

    #[test]
    fn test_reentering_while_pushed() {
        let mut h = Harness::new();
        h.tick(true, false, 0.1);
        h.tick(true, true, 0.1);
        h.tick(false, true, 0.1);

        h.tick(true, true, 0.1);
        assert_eq!(h.controller.state(), ClickState::PushedAndHovered);
        assert_eq!(h.tick(true, false, 0.1).1, vec![MouseEvent::LeftReleased, MouseEvent::LeftClicked]);
    }

    #[test]
    fn test_hover_fires_once_per_session() {
        let mut h = Harness::new();
        h.tick(true, false, 0.0);

        assert_eq!(h.tick(true, false, 0.3).1, vec![]);
        assert_eq!(h.tick(true, false, 0.3).1, vec![MouseEvent::Hovered]);
        assert_eq!(h.tick(true, false, 1.0).1, vec![]);

        // Leaving and coming back re-arms it
        h.tick(false, false, 0.1);
        h.tick(true, false, 0.0);
        assert_eq!(h.tick(true, false, 0.6).1, vec![MouseEvent::Hovered]);
    }

    #[test]
    fn test_press_restarts_hover_delay() {
        let mut h = Harness::new();
        h.tick(true, false, 0.0);
        assert_eq!(h.tick(true, false, 0.4).1, vec![]);

        assert_eq!(h.tick(true, true, 0.1).1, vec![MouseEvent::LeftPressed]);
        assert_eq!(h.tick(true, true, 0.4).1, vec![], "countdown restarted on press");
        assert_eq!(h.tick(true, true, 0.2).1, vec![MouseEvent::Hovered]);
    }

    #[test]
    fn test_reentry_while_pushed_restarts_hover_delay() {
        let mut h = Harness::new();
        h.tick(true, false, 0.0);
        h.tick(true, true, 0.1);
        h.tick(true, true, 0.4);

        h.tick(false, true, 0.1);
        assert_eq!(h.controller.state(), ClickState::PushedNotHovered);
        assert_eq!(h.tick(true, true, 0.1), (vec![], vec![]));
        assert_eq!(h.controller.state(), ClickState::PushedAndHovered);

        assert_eq!(h.tick(true, true, 0.4).1, vec![], "countdown restarted on re-entry");
        assert_eq!(h.tick(true, true, 0.2).1, vec![MouseEvent::Hovered]);
    }

    #[test]
    fn test_release_without_press_while_hovering() {
        let mut h = Harness::new();
        h.input.set_button(MouseButton::Left, true);
        h.input.end_frame();

        h.tick(true, true, 0.1);
        assert_eq!(h.tick(true, false, 0.1).1, vec![MouseEvent::LeftReleased]);
        assert_eq!(h.controller.state(), ClickState::Hovering);
    }
}
