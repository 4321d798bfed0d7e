//=========================================================================
// Game Events
//=========================================================================
//
// Notifications raised by the simulation for presentation.
//
// Rules and control push events during `Game::step`; the host drains the
// queue once per tick and hands the batch to the presenter.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::entities::{CharacterId, CollectibleId};

//=== GameEvent ===========================================================

/// Something presentation may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A collectible was picked up; carries the new score.
    TreatCollected { score: u32 },

    /// The last active collectible was picked up.
    LevelComplete,

    /// A character started flashing after touching the hazard.
    HazardHit(CharacterId),

    /// The dig spot produced a new collectible.
    DugUp(CollectibleId),

    /// Control passed to this character.
    Switched(CharacterId),
}

//=== EventQueue ==========================================================

/// FIFO of events raised during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQueue<E> {
    queue: Vec<E>,
}

impl<E> EventQueue<E> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Returns an iterator over the queued events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Returns an iterator that drains all events from the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.queue.drain(..)
    }

    /// Takes all events from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.queue)
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_push_order() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::TreatCollected { score: 10 });
        queue.push(GameEvent::LevelComplete);

        let drained: Vec<_> = queue.drain().collect();

        assert_eq!(
            drained,
            vec![GameEvent::TreatCollected { score: 10 }, GameEvent::LevelComplete]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn take_leaves_queue_empty() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::Switched(CharacterId::Secondary));

        assert_eq!(queue.take().len(), 1);
        assert_eq!(queue.len(), 0);
    }
}
