//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-level representation of keyboard input.
//
// Platform-specific key events (winit) are normalized into these types
// before crossing the thread boundary, so the simulation never depends
// on the windowing backend.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed / released)
//         ↓
//    ActionState (game actions)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyS` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,

    /// Fallback for keys the input layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level key transition reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key went down.
    KeyDown { key: KeyCode },

    /// Key went up.
    KeyUp { key: KeyCode },

    /// Window lost focus; every held key should be considered released.
    FocusLost,
}

impl InputEvent {
    /// Returns the key this event refers to, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match *self {
            Self::KeyDown { key } | Self::KeyUp { key } => Some(key),
            Self::FocusLost => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
