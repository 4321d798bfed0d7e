//=========================================================================
// Game Actions
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{Action, KeyCode};

//=== GameAction ==========================================================

/// Everything the player can ask of the active character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Left,
    Right,
    Jump,
    Switch,
    Dig,
}

impl Action for GameAction {}

/// Arrows move and jump, `S` switches, `D` digs.
pub fn default_bindings() -> [(KeyCode, GameAction); 5] {
    [
        (KeyCode::ArrowLeft, GameAction::Left),
        (KeyCode::ArrowRight, GameAction::Right),
        (KeyCode::ArrowUp, GameAction::Jump),
        (KeyCode::KeyS, GameAction::Switch),
        (KeyCode::KeyD, GameAction::Dig),
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_action_has_one_default_key() {
        let bindings = default_bindings();
        let keys: HashSet<_> = bindings.iter().map(|(k, _)| *k).collect();
        let actions: HashSet<_> = bindings.iter().map(|(_, a)| *a).collect();

        assert_eq!(keys.len(), 5);
        assert_eq!(actions.len(), 5);
    }
}
