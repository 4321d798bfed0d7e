//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-thread end of the platform channel. Once per tick it empties the
// channel (up to a cap) into the key batches the input system consumes,
// and reports whether the game should keep ticking.
//
//   Receiver<PlatformEvent> ─► collect_frame() ─► batches() ─► InputSystem
//                                     │
//                                     └─► TickControl::{Continue, Exit}
//
// Whatever exceeds the cap stays queued for the next tick, so key order
// across ticks is preserved.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

/// Channel messages taken per tick before the rest is left for later.
const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// What the logic loop does after collecting a tick's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    batches: Vec<Vec<InputEvent>>,
    received: u64,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            batches: Vec::with_capacity(4),
            received: 0,
        }
    }

    /// Replaces the previous tick's batches with whatever arrived since.
    ///
    /// Returns [`TickControl::Exit`] when the window closed or the platform
    /// side hung up. Batches gathered before a close are discarded with it.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.batches.clear();

        for taken in 0..MAX_EVENTS_PER_FRAME {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => return TickControl::Continue,
                Err(TryRecvError::Disconnected) => {
                    debug!("Platform channel disconnected after {} messages", self.received);
                    return TickControl::Exit;
                }
            };
            self.received += 1;

            match event {
                PlatformEvent::Inputs(batch) if batch.is_empty() => {}
                PlatformEvent::Inputs(batch) => self.batches.push(batch),
                PlatformEvent::WindowClosed => {
                    debug!("Window closed, dropping {} pending batches", self.batches.len());
                    self.batches.clear();
                    return TickControl::Exit;
                }
            }

            if taken + 1 == MAX_EVENTS_PER_FRAME && !self.receiver.is_empty() {
                warn!(
                    "Platform backlog: {} messages deferred to the next tick",
                    self.receiver.len()
                );
            }
        }

        TickControl::Continue
    }

    /// Key batches gathered by the last [`EventCollector::collect_frame`].
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.batches
    }

    /// Channel messages taken since construction.
    pub(crate) fn received(&self) -> u64 {
        self.received
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
