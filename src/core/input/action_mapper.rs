//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps physical keys to game actions.
//
// Architecture:
//   KeyCode → HashMap → Action
//
// Several keys may drive the same action; each key drives at most one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{action::Action, event::KeyCode};

//=== ActionMapper ========================================================

/// Key → action lookup table.
pub(crate) struct ActionMapper<A: Action> {
    key_bindings: HashMap<KeyCode, A>,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action, replacing any previous binding of that key.
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: A) {
        if let Some(previous) = self.key_bindings.insert(key, action) {
            debug!("Rebound {:?}: {:?} -> {:?}", key, previous, action);
        }
    }

    /// Removes the binding for `key`, returning the action it drove.
    pub(crate) fn unbind_key(&mut self, key: KeyCode) -> Option<A> {
        self.key_bindings.remove(&key)
    }

    /// Removes every key bound to `action`.
    pub(crate) fn unbind_action(&mut self, action: A) {
        self.key_bindings.retain(|_, bound| *bound != action);
    }

    //--- Mapping ----------------------------------------------------------

    /// Returns the action bound to `key`.
    pub(crate) fn map_key(&self, key: KeyCode) -> Option<A> {
        self.key_bindings.get(&key).copied()
    }

    /// Iterates over every `(key, action)` binding.
    pub(crate) fn bindings(&self) -> impl Iterator<Item = (KeyCode, A)> + '_ {
        self.key_bindings.iter().map(|(k, a)| (*k, *a))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
