//=========================================================================
// Entity Model
//=========================================================================
//
// Plain data records for everything in the level.
//
// Each entity holds a `BodyHandle` into the physics world; positions and
// velocities live there, gameplay state lives here.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::physics::BodyHandle;

//=== CharacterId =========================================================

/// Identity of a playable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterId {
    /// Deven: starts active, jumps higher.
    Primary,
    /// Sami: the only one who can dig.
    Secondary,
}

impl CharacterId {
    pub const ALL: [CharacterId; 2] = [CharacterId::Primary, CharacterId::Secondary];

    /// Index into per-character tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }

    /// The character control passes to on a switch.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Display name used in logs and the HUD.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "Deven",
            Self::Secondary => "Sami",
        }
    }
}

//=== Character ===========================================================

/// A playable character.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub body: BodyHandle,
    pub jump_velocity: f32,
    /// Remaining flash time after a hazard hit.
    pub flash_timer: Option<Duration>,
}

impl Character {
    pub fn new(id: CharacterId, body: BodyHandle, jump_velocity: f32) -> Self {
        Self {
            id,
            body,
            jump_velocity,
            flash_timer: None,
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer.is_some()
    }

    /// Counts the flash down by `dt`, clearing it at zero.
    pub fn tick_flash(&mut self, dt: Duration) {
        if let Some(remaining) = self.flash_timer {
            let remaining = remaining.saturating_sub(dt);
            self.flash_timer = (!remaining.is_zero()).then_some(remaining);
        }
    }
}

//=== Static Geometry =====================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub body: BodyHandle,
}

/// Hidden dig location; usable once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigSpot {
    pub body: BodyHandle,
    pub consumed: bool,
}

//=== Collectibles ========================================================

/// Index of a collectible in the world registry. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectibleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub body: BodyHandle,
    pub active: bool,
}

//=== Hazard ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub body: BodyHandle,
}

//=== Trigger =============================================================

/// Tag attached to overlap pairs; names the rule to run when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Treat {
        collectible: CollectibleId,
    },
    Hazard {
        character: CharacterId,
    },
    DigSpot {
        character: CharacterId,
    },
}

//=========================================================================
// Unit Tests
//=========================================================================
