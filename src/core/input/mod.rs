//=========================================================================
// Input System
//=========================================================================
//
// High-level interface for input handling within the engine.
//
// Architecture:
//   Vec<Vec<InputEvent>> → StateTracker (keys) → ActionMapper → ActionState
//
// Frame lifecycle: process_frame() → actions() → simulation step
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, ActionState};
pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Turns a frame's raw key events into an [`ActionState`].
///
/// Owned by the logic thread. Bindings are configured before the engine
/// starts; the simulation only ever sees the resulting action state.
pub struct InputSystem<A: Action> {
    tracker: StateTracker,
    mapper: ActionMapper<A>,
    actions: ActionState<A>,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            tracker: StateTracker::new(),
            mapper: ActionMapper::new(),
            actions: ActionState::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` to `action`, replacing any previous binding of the key.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.mapper.bind_key(key, action);
    }

    /// Removes the binding for `key`.
    pub fn unbind_key(&mut self, key: KeyCode) -> Option<A> {
        self.mapper.unbind_key(key)
    }

    /// Removes every key bound to `action`.
    pub fn unbind_action(&mut self, action: A) {
        self.mapper.unbind_action(action);
    }

    /// Returns the action bound to `key`.
    pub fn binding(&self, key: KeyCode) -> Option<A> {
        self.mapper.map_key(key)
    }

    //--- Frame Processing -------------------------------------------------

    /// Consumes the frame's event batches and rebuilds the action state.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.tracker.clear();
        for batch in batches {
            self.tracker.process_events(batch);
        }

        self.actions.clear();
        for (key, action) in self.mapper.bindings() {
            if self.tracker.is_key_down(key) {
                self.actions.set_held(action);
            }
            if self.tracker.is_key_pressed(key) {
                self.actions.set_pressed(action);
            }
        }

        if !batches.is_empty() {
            trace!("Actions this frame: {:?}", self.actions);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Action state for the current frame.
    pub fn actions(&self) -> &ActionState<A> {
        &self.actions
    }

    /// Raw key state, independent of bindings.
    pub fn keys(&self) -> &StateTracker {
        &self.tracker
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
