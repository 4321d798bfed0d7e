//=========================================================================
// Input Processor
//=========================================================================
//
// Winit keyboard and focus events in, engine `InputEvent`s out.
//
// Physical key positions are used, so the arrows plus S and D work on any
// layout. Keys the engine has no code for are dropped here, as are OS
// auto-repeat presses: a held key is one KeyDown until its KeyUp.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Stateless translator from Winit to engine input.
pub(crate) struct InputProcessor;

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Translates one key event. `None` for repeats and unknown keys.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };

        self.key_transition(KeyCode::from(code), key_event.state)
    }

    /// Losing focus releases everything; gaining it produces nothing.
    pub(crate) fn process_focus(&self, focused: bool) -> Option<InputEvent> {
        (!focused).then_some(InputEvent::FocusLost)
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_transition(&self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        match (key, state) {
            (KeyCode::Unidentified, _) => None,
            (key, ElementState::Pressed) => Some(InputEvent::KeyDown { key }),
            (key, ElementState::Released) => Some(InputEvent::KeyUp { key }),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Letters, arrows, Space, Enter and Escape have engine codes; the rest
/// become `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
