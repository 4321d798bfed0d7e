//=========================================================================
// Action Trait & Action State
//=========================================================================
//
// Game-defined actions and their per-frame state.
//
// Actions: Opaque identifiers routed by the engine, interpreted by the game.
// ActionState: The frame's snapshot of which actions are held and which
//              went down this frame. This is what the simulation consumes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// # Requirements
///
/// - `Copy + Eq + Hash`: Efficient passing and deduplication
/// - `Debug`: Logging support
/// - `Send + 'static`: Thread-safe transfer
///
/// # Example
///
/// ```
/// use twin_paws::core::input::Action;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Confirm, Back }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== ActionState =========================================================

/// Which actions are held and which were pressed during one frame.
///
/// `pressed` is the rising edge: the action went down this frame. A press
/// that was released within the same frame is pressed but not held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionState<A: Action> {
    held: HashSet<A>,
    pressed: HashSet<A>,
}

impl<A: Action> ActionState<A> {
    /// Creates a state with nothing held or pressed.
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
        }
    }

    //--- Builders ---------------------------------------------------------

    /// Marks `action` as held (level only, no edge).
    pub fn with_held(mut self, action: A) -> Self {
        self.held.insert(action);
        self
    }

    /// Marks `action` as pressed this frame and held.
    pub fn with_pressed(mut self, action: A) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }

    //--- Mutation ---------------------------------------------------------

    pub(crate) fn set_held(&mut self, action: A) {
        self.held.insert(action);
    }

    pub(crate) fn set_pressed(&mut self, action: A) {
        self.pressed.insert(action);
    }

    pub(crate) fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while the action is held.
    pub fn is_down(&self, action: A) -> bool {
        self.held.contains(&action)
    }

    /// Returns `true` only on the frame the action went down.
    pub fn was_pressed(&self, action: A) -> bool {
        self.pressed.contains(&action)
    }
}

impl<A: Action> Default for ActionState<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
