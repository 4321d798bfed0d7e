//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level keyboard state with per-frame edge tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → query
//
// Frame lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys pressed
/// or released during the current frame).
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    /// Creates a new state tracker with no keys held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Processes input events, updating internal state.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // Only a transition counts as a press; OS key repeat does not.
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                }
            }

            InputEvent::KeyUp { key } => {
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                }
            }

            InputEvent::FocusLost => {
                trace!("Focus lost, releasing {} held keys", self.keys_down.len());
                self.keys_released_this_frame.extend(self.keys_down.drain());
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if the key went UP → DOWN this frame.
    ///
    /// Use for discrete actions such as switching characters.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if the key went DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
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

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key }
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
    }

    //--- Tests ------------------------------------------------------------

    /// A press is visible for exactly one frame; held persists.
    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyS)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyS));
        assert!(tracker.is_key_down(KeyCode::KeyS));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyS));
        assert!(tracker.is_key_down(KeyCode::KeyS));

        frame(&mut tracker, &[key_up(KeyCode::KeyS)]);
        assert!(!tracker.is_key_down(KeyCode::KeyS));
        assert!(tracker.is_key_released(KeyCode::KeyS));
    }

    #[test]
    fn key_down_persists_across_frames() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::ArrowLeft)]);

        for _ in 0..10 {
            frame(&mut tracker, &[]);
            assert!(tracker.is_key_down(KeyCode::ArrowLeft), "Key should remain down");
        }
    }

    /// OS auto-repeat sends KeyDown again while held; it must not re-press.
    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::KeyS)]);

        frame(&mut tracker, &[key_down(KeyCode::KeyS)]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyS));
        assert!(tracker.is_key_down(KeyCode::KeyS));
    }

    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::ArrowUp), key_up(KeyCode::ArrowUp)]);

        assert!(tracker.is_key_pressed(KeyCode::ArrowUp));
        assert!(tracker.is_key_released(KeyCode::ArrowUp));
        assert!(!tracker.is_key_down(KeyCode::ArrowUp));
    }

    #[test]
    fn key_up_without_down_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    #[test]
    fn focus_lost_releases_everything() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::ArrowRight), key_down(KeyCode::KeyD)]);

        frame(&mut tracker, &[InputEvent::FocusLost]);

        assert_eq!(tracker.keys_down().count(), 0);
        assert!(tracker.is_key_released(KeyCode::ArrowRight));
        assert!(tracker.is_key_released(KeyCode::KeyD));
    }
}
