//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use twin_paws::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Simulation
pub use crate::game::{
    CharacterId, CollectibleId, Game, GameAction, GameConfig, GameEvent, JumpTrigger, Snapshot,
};

// Presentation
pub use crate::game::{AssetError, AssetLoader, LogPresenter, Presenter};

// Input
pub use crate::core::input::{ActionState, InputEvent, InputSystem, KeyCode};

// Math
pub use crate::core::math::Vec2;
