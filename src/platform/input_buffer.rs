//=========================================================================
// Input Buffer
//
// Collects key events between two frame boundaries on the platform side.
//
// Responsibilities:
// - Store incoming key events in arrival order
// - Drop an event identical to the one before it
// - Hand the whole batch over on `drain()`
//
// Notes:
// The buffer lives on the main thread and is emptied on every
// RedrawRequested; nothing in it survives a frame.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient event store for one frame of input.
//
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates so a typical frame never reallocates.
    //
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Appends an event. An exact repeat of the previous event is ignored.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the frame's events and leaves the buffer empty, or `None`
    // when nothing was buffered.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        Some(self.events.drain(..).collect())
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
