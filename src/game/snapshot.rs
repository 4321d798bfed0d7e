//=========================================================================
// Snapshot
//=========================================================================
//
// Read-only view of one frame, built for presentation.
//
// Everything here is copied out of the world so the presenter never holds
// a borrow into simulation state.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::ActionState;
use crate::core::math::Vec2;
use crate::core::physics::{BodyHandle, PhysicsWorld};
use super::actions::GameAction;
use super::entities::{CharacterId, CollectibleId, Trigger};
use super::score::RunState;
use super::world::World;

//=== Views ===============================================================

/// Position and size of something drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub position: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterView {
    pub id: CharacterId,
    pub sprite: SpriteView,
    pub flashing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectibleView {
    pub id: CollectibleId,
    pub sprite: SpriteView,
}

/// Debug overlay fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugInfo {
    /// Whether the active character stood on something this frame.
    pub grounded: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub switch: bool,
    pub dig: bool,
}

impl DebugInfo {
    pub(crate) fn new(grounded: bool, input: &ActionState<GameAction>) -> Self {
        Self {
            grounded,
            left: input.is_down(GameAction::Left),
            right: input.is_down(GameAction::Right),
            jump: input.is_down(GameAction::Jump),
            switch: input.is_down(GameAction::Switch),
            dig: input.is_down(GameAction::Dig),
        }
    }
}

//=== Snapshot ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub frame: u64,
    pub characters: [CharacterView; 2],
    pub platforms: Vec<SpriteView>,
    /// Active collectibles only.
    pub collectibles: Vec<CollectibleView>,
    pub hazard: Option<SpriteView>,
    /// `None` once the spot has been dug.
    pub dig_spot: Option<SpriteView>,
    pub score: u32,
    pub level_complete: bool,
    pub active: CharacterId,
    pub debug: DebugInfo,
}

impl Snapshot {
    pub(crate) fn capture(frame: u64, world: &World, run: &RunState, debug: DebugInfo) -> Self {
        let physics = world.physics();

        let characters = world.characters().clone().map(|c| CharacterView {
            id: c.id,
            sprite: sprite(physics, c.body).unwrap_or(SpriteView {
                position: Vec2::ZERO,
                size: Vec2::ZERO,
            }),
            flashing: c.is_flashing(),
        });

        let collectibles = world
            .collectibles()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .filter_map(|(i, c)| {
                sprite(physics, c.body).map(|sprite| CollectibleView {
                    id: CollectibleId(i),
                    sprite,
                })
            })
            .collect();

        let dig_spot = world.dig_spot();

        Self {
            frame,
            characters,
            platforms: world
                .platforms()
                .iter()
                .filter_map(|p| sprite(physics, p.body))
                .collect(),
            collectibles,
            hazard: sprite(physics, world.hazard().body),
            dig_spot: (!dig_spot.consumed)
                .then(|| sprite(physics, dig_spot.body))
                .flatten(),
            score: run.score.score(),
            level_complete: run.score.is_level_complete(),
            active: run.active_character,
            debug,
        }
    }

    pub fn character(&self, id: CharacterId) -> &CharacterView {
        &self.characters[id.index()]
    }

    /// Text lines for the HUD: score, the controls, then the completion
    /// banner once the level is done.
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Score: {}", self.score)];
        lines.extend(INSTRUCTIONS.iter().map(|line| line.to_string()));
        if self.level_complete {
            lines.push("Level Complete!".to_string());
        }
        lines
    }

    /// Text lines for the debug overlay.
    pub fn debug_lines(&self) -> Vec<String> {
        let primary = self.character(CharacterId::Primary).sprite;
        let secondary = self.character(CharacterId::Secondary).sprite;
        vec![
            format!("Active: {}", self.active.name()),
            format!("Up: {}", self.debug.jump),
            format!("Left: {}", self.debug.left),
            format!("Right: {}", self.debug.right),
            format!("Switch: {}", self.debug.switch),
            format!("Blocked Down: {}", self.debug.grounded),
            format!("Deven Pos: {:.2}, {:.2}", primary.position.x, primary.position.y),
            format!("Sami Pos: {:.2}, {:.2}", secondary.position.x, secondary.position.y),
            format!("Deven Body: {}x{}", primary.size.x, primary.size.y),
            format!("Sami Body: {}x{}", secondary.size.x, secondary.size.y),
        ]
    }
}

/// Controls reminder shown under the score.
pub const INSTRUCTIONS: [&str; 3] = [
    "Use Arrows to move, Up to jump,",
    "S to switch, D to dig!",
    "Collect treats, avoid the ball!",
];

fn sprite(physics: &PhysicsWorld<Trigger>, handle: BodyHandle) -> Option<SpriteView> {
    physics.body(handle).map(|b| SpriteView {
        position: b.position,
        size: b.size,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;

    fn capture(world: &World, run: &RunState) -> Snapshot {
        Snapshot::capture(0, world, run, DebugInfo::default())
    }

    #[test]
    fn initial_snapshot_shows_whole_level() {
        let world = World::new(&GameConfig::default()).expect("valid config");
        let snapshot = capture(&world, &RunState::new());

        assert_eq!(snapshot.platforms.len(), 3);
        assert_eq!(snapshot.collectibles.len(), 6);
        assert!(snapshot.hazard.is_some());
        assert!(snapshot.dig_spot.is_some());
        assert_eq!(snapshot.active, CharacterId::Primary);
        assert_eq!(
            snapshot.character(CharacterId::Secondary).sprite.position,
            Vec2::new(200.0, 500.0)
        );
    }

    #[test]
    fn hud_shows_completion_banner() {
        let world = World::new(&GameConfig::default()).expect("valid config");
        let mut run = RunState::new();
        run.score.award(60);
        run.score.complete_level();

        let lines = capture(&world, &run).hud_lines();

        assert_eq!(lines.first().map(String::as_str), Some("Score: 60"));
        assert_eq!(lines.last().map(String::as_str), Some("Level Complete!"));
    }

    #[test]
    fn hud_always_lists_the_controls() {
        let world = World::new(&GameConfig::default()).expect("valid config");

        let lines = capture(&world, &RunState::new()).hud_lines();

        assert_eq!(
            lines,
            vec![
                "Score: 0",
                "Use Arrows to move, Up to jump,",
                "S to switch, D to dig!",
                "Collect treats, avoid the ball!",
            ]
        );
    }

    #[test]
    fn debug_lines_report_active_and_keys() {
        let world = World::new(&GameConfig::default()).expect("valid config");
        let input = ActionState::new().with_held(GameAction::Left);
        let snapshot = Snapshot::capture(3, &world, &RunState::new(), DebugInfo::new(false, &input));

        let lines = snapshot.debug_lines();

        assert_eq!(lines[0], "Active: Deven");
        assert_eq!(lines[2], "Left: true");
        assert_eq!(lines[6], "Deven Pos: 100.00, 500.00");
    }
}
