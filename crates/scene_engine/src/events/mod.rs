//! Mouse events and per-tick click arbitration
//!
//! Click controllers never deliver the contested events themselves. They file a
//! request with the [`ClickArbiter`] for the current tick, and the frame driver
//! flushes the arbiter once after the update pass:
//! - Each category has its own queue
//! - Only the first request in each queue is delivered
//! - Every other request that tick is dropped
//!
//! "First" is update-traversal order, so when two entities overlap, the one whose
//! controller is updated first (earlier in its container's child list, or in an
//! earlier subtree) wins. Only one entity consumes a click per tick.

use crate::foundation::collections::NodeId;

/// Discrete pointer event delivered to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEvent {
    /// Pointer moved onto the entity
    Entered,
    /// Pointer left the entity
    Exited,
    /// Pointer rested on the entity for the hover delay
    Hovered,
    /// Left button went down on the entity
    LeftPressed,
    /// Left button came up on the entity
    LeftReleased,
    /// A full press-release cycle happened on the entity
    LeftClicked,
    /// The interaction ended without a click; entities reset pressed/hover visuals
    Idle,
}

impl MouseEvent {
    /// Arbitration category for this event, or `None` when it is delivered directly
    pub fn category(self) -> Option<EventCategory> {
        match self {
            MouseEvent::LeftPressed => Some(EventCategory::LeftPressed),
            MouseEvent::LeftReleased => Some(EventCategory::LeftReleased),
            MouseEvent::LeftClicked => Some(EventCategory::LeftClicked),
            MouseEvent::Entered => Some(EventCategory::Entered),
            MouseEvent::Hovered => Some(EventCategory::Hovered),
            MouseEvent::Exited | MouseEvent::Idle => None,
        }
    }
}

/// Contested event categories, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Left button pressed
    LeftPressed,
    /// Left button released
    LeftReleased,
    /// Left button clicked
    LeftClicked,
    /// Pointer entered
    Entered,
    /// Pointer hovered
    Hovered,
}

impl EventCategory {
    /// Every category, in dispatch order
    pub const ALL: [EventCategory; 5] = [
        EventCategory::LeftPressed,
        EventCategory::LeftReleased,
        EventCategory::LeftClicked,
        EventCategory::Entered,
        EventCategory::Hovered,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Event delivered to the winner of this category
    pub fn event(self) -> MouseEvent {
        match self {
            EventCategory::LeftPressed => MouseEvent::LeftPressed,
            EventCategory::LeftReleased => MouseEvent::LeftReleased,
            EventCategory::LeftClicked => MouseEvent::LeftClicked,
            EventCategory::Entered => MouseEvent::Entered,
            EventCategory::Hovered => MouseEvent::Hovered,
        }
    }
}

/// Per-tick request queues, one per [`EventCategory`]
///
/// Created by the frame driver and threaded through the update pass. Queues hold
/// plain ids and are cleared on every [`flush`](ClickArbiter::flush).
#[derive(Debug, Default)]
pub struct ClickArbiter {
    queues: [Vec<NodeId>; 5],
}

impl ClickArbiter {
    /// Create an arbiter with empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `entity` as a candidate for `event` this tick
    ///
    /// Events without a category are not arbitrated and are ignored here.
    pub fn request(&mut self, event: MouseEvent, entity: NodeId) {
        match event.category() {
            Some(category) => self.queues[category.index()].push(entity),
            None => log::warn!("{event:?} is delivered directly and cannot be arbitrated"),
        }
    }

    /// Requests queued this tick for a category, in arrival order
    pub fn pending(&self, category: EventCategory) -> &[NodeId] {
        &self.queues[category.index()]
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(Vec::is_empty)
    }

    /// Take the winner of each category and clear every queue
    pub fn flush(&mut self) -> Vec<(MouseEvent, NodeId)> {
        let mut winners = Vec::new();
        for category in EventCategory::ALL {
            let queue = &mut self.queues[category.index()];
            if let Some(&winner) = queue.first() {
                if queue.len() > 1 {
                    log::trace!("{category:?}: {winner:?} wins over {} other request(s)", queue.len() - 1);
                }
                winners.push((category.event(), winner));
            }
            queue.clear();
        }
        winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::NodeMap;

    fn ids(count: usize) -> Vec<NodeId> {
        let mut map = NodeMap::<()>::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_first_request_per_category_wins() {
        let ids = ids(3);
        let mut arbiter = ClickArbiter::new();

        arbiter.request(MouseEvent::LeftClicked, ids[1]);
        arbiter.request(MouseEvent::LeftClicked, ids[0]);
        arbiter.request(MouseEvent::Entered, ids[2]);
        arbiter.request(MouseEvent::Entered, ids[1]);

        let winners = arbiter.flush();
        assert_eq!(winners, vec![(MouseEvent::LeftClicked, ids[1]), (MouseEvent::Entered, ids[2])]);
        assert!(arbiter.is_empty());
        assert!(arbiter.flush().is_empty(), "losers are dropped, not carried over");
    }

    #[test]
    fn test_dispatch_order_follows_categories() {
        let ids = ids(1);
        let mut arbiter = ClickArbiter::new();

        arbiter.request(MouseEvent::Hovered, ids[0]);
        arbiter.request(MouseEvent::LeftClicked, ids[0]);
        arbiter.request(MouseEvent::LeftReleased, ids[0]);

        let events: Vec<_> = arbiter.flush().into_iter().map(|(event, _)| event).collect();
        assert_eq!(events, vec![MouseEvent::LeftReleased, MouseEvent::LeftClicked, MouseEvent::Hovered]);
    }

    #[test]
    fn test_direct_events_are_not_queued() {
        let ids = ids(1);
        let mut arbiter = ClickArbiter::new();

        arbiter.request(MouseEvent::Exited, ids[0]);
        arbiter.request(MouseEvent::Idle, ids[0]);

        assert!(arbiter.is_empty());
        assert_eq!(arbiter.pending(EventCategory::Entered), &[] as &[NodeId]);
    }
}
