//=========================================================================
// Game Configuration
//=========================================================================
//
// Scene constants and their validation.
//
// Level data is fixed; `GameConfig::default()` is the one shipped level.
// Tests shrink or rearrange it to build small worlds. Anything malformed
// is rejected by `validate()` before a world is built, never mid-frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::math::{Aabb, Vec2};
use super::control::JumpTrigger;
use super::entities::CharacterId;

//=== Spec Records ========================================================

/// Placement of one static platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpec {
    pub position: Vec2,
    pub size: Vec2,
}

impl PlatformSpec {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }
}

/// Spawn settings and jump strength for one playable character. The
/// character's name comes from its [`CharacterId`].
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSpec {
    pub spawn: Vec2,
    pub size: Vec2,
    pub bounce: f32,
    /// Upward impulse; negative because +y points down.
    pub jump_velocity: f32,
}

/// Attributes shared by every collectible, batch-created or dug up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectibleTemplate {
    pub size: Vec2,
    pub bounce: f32,
    pub collide_world_bounds: bool,
}

/// Row of collectibles dropped from the top of the screen at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectibleBatch {
    pub count: usize,
    pub start_x: f32,
    pub step_x: f32,
    pub y: f32,
}

impl CollectibleBatch {
    /// Spawn positions of the batch, left to right.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.count).map(|i| Vec2::new(self.start_x + self.step_x * i as f32, self.y))
    }
}

/// The bouncing hazard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSpec {
    pub spawn: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub bounce: f32,
}

/// The hidden dig location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigSpotSpec {
    pub position: Vec2,
    pub size: Vec2,
}

//=== GameConfig ==========================================================

/// Every constant the simulation is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world_size: Vec2,
    pub gravity: f32,
    pub platforms: Vec<PlatformSpec>,

    /// Indexed by [`CharacterId::index`].
    pub characters: [CharacterSpec; 2],
    pub run_speed: f32,
    pub jump_trigger: JumpTrigger,

    pub collectible: CollectibleTemplate,
    pub batch: CollectibleBatch,
    pub reward: u32,

    pub hazard: HazardSpec,
    pub flash_duration: Duration,

    pub dig_spot: DigSpotSpec,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(800.0, 600.0),
            gravity: 300.0,
            platforms: vec![
                PlatformSpec::new(400.0, 568.0, 800.0, 64.0),
                PlatformSpec::new(600.0, 400.0, 400.0, 32.0),
                PlatformSpec::new(50.0, 250.0, 400.0, 32.0),
            ],
            characters: [
                CharacterSpec {
                    spawn: Vec2::new(100.0, 500.0),
                    size: Vec2::new(48.0, 64.0),
                    bounce: 0.2,
                    jump_velocity: -400.0,
                },
                CharacterSpec {
                    spawn: Vec2::new(200.0, 500.0),
                    size: Vec2::new(48.0, 64.0),
                    bounce: 0.2,
                    jump_velocity: -300.0,
                },
            ],
            run_speed: 160.0,
            jump_trigger: JumpTrigger::Held,
            collectible: CollectibleTemplate {
                size: Vec2::new(28.0, 28.0),
                bounce: 0.5,
                collide_world_bounds: true,
            },
            batch: CollectibleBatch {
                count: 6,
                start_x: 100.0,
                step_x: 100.0,
                y: 0.0,
            },
            reward: 10,
            hazard: HazardSpec {
                spawn: Vec2::new(300.0, 500.0),
                size: Vec2::new(32.0, 32.0),
                velocity: Vec2::new(100.0, 0.0),
                bounce: 1.0,
            },
            flash_duration: Duration::from_millis(500),
            dig_spot: DigSpotSpec {
                position: Vec2::new(500.0, 550.0),
                size: Vec2::new(64.0, 40.0),
            },
        }
    }
}

impl GameConfig {
    /// Spawn settings for one character.
    pub fn character(&self, id: CharacterId) -> &CharacterSpec {
        &self.characters[id.index()]
    }

    /// Checks every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_size.x > 0.0 && self.world_size.y > 0.0) {
            return Err(ConfigError::InvalidWorldSize(self.world_size));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if !(self.run_speed.is_finite() && self.run_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.run_speed));
        }
        if self.batch.count == 0 {
            return Err(ConfigError::EmptyCollectibleBatch);
        }
        if self.reward == 0 {
            return Err(ConfigError::ZeroReward);
        }

        for (i, platform) in self.platforms.iter().enumerate() {
            check_body("platform", platform.position, platform.size, 0.0)?;
            for (j, other) in self.platforms.iter().enumerate().skip(i + 1) {
                if platform.aabb().overlaps(&other.aabb()) {
                    return Err(ConfigError::OverlappingPlatforms(i, j));
                }
            }
        }

        for id in CharacterId::ALL {
            let spec = self.character(id);
            check_body(id.name(), spec.spawn, spec.size, spec.bounce)?;
            if !(spec.jump_velocity.is_finite() && spec.jump_velocity < 0.0) {
                return Err(ConfigError::InvalidJumpVelocity {
                    name: id.name(),
                    velocity: spec.jump_velocity,
                });
            }
        }

        let template = &self.collectible;
        for position in self.batch.positions() {
            check_body("collectible", position, template.size, template.bounce)?;
        }
        check_body("hazard", self.hazard.spawn, self.hazard.size, self.hazard.bounce)?;
        check_body("dig spot", self.dig_spot.position, self.dig_spot.size, 0.0)?;

        Ok(())
    }
}

fn check_body(name: &'static str, position: Vec2, size: Vec2, bounce: f32) -> Result<(), ConfigError> {
    if !(size.x > 0.0 && size.y > 0.0) || !position.is_finite() {
        return Err(ConfigError::InvalidBody { name, size });
    }
    if !(0.0..=1.0).contains(&bounce) {
        return Err(ConfigError::InvalidBounce { name, bounce });
    }
    Ok(())
}

//=== ConfigError =========================================================

/// Setup errors, reported before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// World width or height is not positive.
    InvalidWorldSize(Vec2),

    /// Gravity is negative or not finite.
    InvalidGravity(f32),

    /// Horizontal speed is not positive.
    InvalidSpeed(f32),

    /// A body has a non-positive size or a non-finite position.
    InvalidBody { name: &'static str, size: Vec2 },

    /// A bounce coefficient lies outside `[0, 1]`.
    InvalidBounce { name: &'static str, bounce: f32 },

    /// A jump impulse does not point upward.
    InvalidJumpVelocity { name: &'static str, velocity: f32 },

    /// Two platform definitions intersect (indices into `platforms`).
    OverlappingPlatforms(usize, usize),

    /// The setup batch holds no collectibles.
    EmptyCollectibleBatch,

    /// Collecting would not change the score.
    ZeroReward,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorldSize(size) => {
                write!(f, "World size must be positive, got {}x{}", size.x, size.y)
            }
            Self::InvalidGravity(g) => write!(f, "Gravity must be finite and non-negative, got {}", g),
            Self::InvalidSpeed(s) => write!(f, "Run speed must be positive, got {}", s),
            Self::InvalidBody { name, size } => {
                write!(f, "Invalid {} body (size {}x{})", name, size.x, size.y)
            }
            Self::InvalidBounce { name, bounce } => {
                write!(f, "Bounce of {} must lie in [0, 1], got {}", name, bounce)
            }
            Self::InvalidJumpVelocity { name, velocity } => {
                write!(f, "Jump velocity of {} must be negative, got {}", name, velocity)
            }
            Self::OverlappingPlatforms(a, b) => write!(f, "Platforms {} and {} overlap", a, b),
            Self::EmptyCollectibleBatch => write!(f, "Collectible batch is empty"),
            Self::ZeroReward => write!(f, "Collectible reward must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

//=========================================================================
// Unit Tests
//=========================================================================
