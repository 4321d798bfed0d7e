//=========================================================================
// Game
//=========================================================================
//
// The two-character platformer built on the core physics and input.
//
// Architecture:
// ```text
//   Game::step(dt, &ActionState<GameAction>)
//     1. PhysicsWorld::step     integrate, bounds, solid pairs, overlaps
//     2. GameplayRules          dispatch contacts (pickup, hit, dig)
//     3. flash timers           count down by dt
//     4. ControlSystem          switch, steer and jump the active character
//   Game::snapshot() / drain_events() → Presenter
// ```
//
// Single-threaded and synchronous: one `step` per tick, no work outside it.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod actions;
pub mod assets;
pub mod config;
pub mod control;
pub mod entities;
pub mod events;
pub mod present;
pub mod rules;
pub mod score;
pub mod snapshot;
pub mod world;

//=== Public API ==========================================================

pub use actions::{default_bindings, GameAction};
pub use assets::{preload, AssetError, AssetLoader, IMAGE_MANIFEST};
pub use config::{ConfigError, GameConfig};
pub use control::{ControlSystem, JumpTrigger};
pub use entities::{CharacterId, CollectibleId};
pub use events::{EventQueue, GameEvent};
pub use present::{LogPresenter, Presenter};
pub use rules::GameplayRules;
pub use score::{RunState, ScoreTracker};
pub use snapshot::{DebugInfo, Snapshot};
pub use world::World;

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::ActionState;

//=== Game ================================================================

/// One run of the level.
pub struct Game {
    world: World,
    run: RunState,
    rules: GameplayRules,
    control: ControlSystem,
    events: EventQueue<GameEvent>,
    debug: DebugInfo,
    frame: u64,
}

impl Game {
    //--- Construction -----------------------------------------------------

    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        info!(
            "Game ready: {} active, {} collectibles to find",
            CharacterId::Primary.name(),
            world.active_collectible_count()
        );

        Ok(Self {
            world,
            run: RunState::new(),
            rules: GameplayRules::new(config.reward, config.flash_duration),
            control: ControlSystem::new(config.run_speed, config.jump_trigger),
            events: EventQueue::new(),
            debug: DebugInfo::default(),
            frame: 0,
        })
    }

    //--- Simulation -------------------------------------------------------

    /// Advances the simulation by `dt` seconds using this frame's actions.
    ///
    /// A negative or non-finite `dt` is logged and the frame is skipped.
    pub fn step(&mut self, dt: f32, input: &ActionState<GameAction>) {
        let Ok(elapsed) = Duration::try_from_secs_f32(dt) else {
            warn!("Skipping frame {} with invalid dt {}", self.frame, dt);
            return;
        };

        //--- 1. Physics ------------------------------------------------------
        let report = self.world.physics_mut().step(dt);

        //--- 2. Contacts -----------------------------------------------------
        for contacts in [&report.collisions, &report.overlaps] {
            self.rules
                .dispatch(contacts, input, &mut self.world, &mut self.run, &mut self.events);
        }

        //--- 3. Timers -------------------------------------------------------
        self.rules.advance_timers(&mut self.world, elapsed);

        //--- 4. Control ------------------------------------------------------
        self.control
            .update(input, &mut self.world, &mut self.run, &mut self.events);

        let active = self.world.character(self.run.active_character).body;
        self.debug = DebugInfo::new(self.world.physics().is_grounded(active), input);
        self.frame += 1;

        if !report.overlaps.is_empty() {
            trace!("Frame {}: {} overlaps", self.frame, report.overlaps.len());
        }
    }

    //--- Presentation -----------------------------------------------------

    /// Captures the current frame for drawing.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.frame, &self.world, &self.run, self.debug)
    }

    /// Removes and returns every event raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.take()
    }

    //--- Accessors --------------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access, for tooling and tests that stage scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn score(&self) -> u32 {
        self.run.score.score()
    }

    pub fn is_level_complete(&self) -> bool {
        self.run.score.is_level_complete()
    }

    pub fn active_character(&self) -> CharacterId {
        self.run.active_character
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
