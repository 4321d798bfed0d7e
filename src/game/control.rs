//=========================================================================
// Control System
//=========================================================================
//
// Applies the frame's actions to the active character.
//
// Runs once per frame after physics, so the grounded flag it reads is the
// one produced by this frame's collision resolution.
//
//   Switch  rising edge only          → RunState::toggle_active
//   Left    held (wins over Right)    → vx = -speed
//   Right   held                      → vx = +speed
//   Jump    per JumpTrigger, grounded → vy = character jump velocity
//
// The inactive character is left entirely to physics.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::input::ActionState;
use super::actions::GameAction;
use super::events::{EventQueue, GameEvent};
use super::score::RunState;
use super::world::World;

//=== JumpTrigger =========================================================

/// When the jump action counts as asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpTrigger {
    /// Every frame the key is held; holding jump re-jumps on landing.
    #[default]
    Held,
    /// Only on the frame the key goes down.
    Pressed,
}

impl JumpTrigger {
    fn is_asserted(self, input: &ActionState<GameAction>) -> bool {
        match self {
            Self::Held => input.is_down(GameAction::Jump),
            Self::Pressed => input.was_pressed(GameAction::Jump),
        }
    }
}

//=== ControlSystem =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ControlSystem {
    speed: f32,
    jump_trigger: JumpTrigger,
}

impl ControlSystem {
    pub fn new(speed: f32, jump_trigger: JumpTrigger) -> Self {
        Self { speed, jump_trigger }
    }

    /// Switches, steers and jumps the active character.
    pub fn update(
        &self,
        input: &ActionState<GameAction>,
        world: &mut World,
        run: &mut RunState,
        events: &mut EventQueue<GameEvent>,
    ) {
        if input.was_pressed(GameAction::Switch) {
            let active = run.toggle_active();
            debug!("Active character switched to {}", active.name());
            events.push(GameEvent::Switched(active));
        }

        let character = world.character(run.active_character);
        let (id, handle, jump_velocity) = (character.id, character.body, character.jump_velocity);
        let grounded = world.physics().is_grounded(handle);

        let vx = if input.is_down(GameAction::Left) {
            -self.speed
        } else if input.is_down(GameAction::Right) {
            self.speed
        } else {
            0.0
        };
        let jump = self.jump_trigger.is_asserted(input) && grounded;

        let Some(body) = world.physics_mut().body_mut(handle) else {
            return;
        };
        body.velocity.x = vx;
        if jump {
            body.velocity.y = jump_velocity;
            debug!("{} jumped ({})", id.name(), jump_velocity);
        }

        trace!("{} velocity: ({}, {})", id.name(), body.velocity.x, body.velocity.y);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec2;
    use crate::game::config::GameConfig;
    use crate::game::entities::CharacterId;

    const DT: f32 = 1.0 / 60.0;

    //--- Test Helpers -----------------------------------------------------

    struct Fixture {
        world: World,
        run: RunState,
        events: EventQueue<GameEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut world = World::new(&GameConfig::default()).expect("valid config");
            // Let both characters land on the floor.
            for _ in 0..60 {
                world.physics_mut().step(DT);
            }
            Self {
                world,
                run: RunState::new(),
                events: EventQueue::new(),
            }
        }

        fn update(&mut self, control: &ControlSystem, input: &ActionState<GameAction>) {
            control.update(input, &mut self.world, &mut self.run, &mut self.events);
        }

        fn velocity(&self, id: CharacterId) -> Vec2 {
            let handle = self.world.character(id).body;
            self.world
                .physics()
                .body(handle)
                .map(|b| b.velocity)
                .unwrap_or_default()
        }
    }

    fn control() -> ControlSystem {
        ControlSystem::new(160.0, JumpTrigger::Held)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn left_wins_over_right() {
        let mut f = Fixture::new();
        let input = ActionState::new()
            .with_held(GameAction::Left)
            .with_held(GameAction::Right);

        f.update(&control(), &input);

        assert_eq!(f.velocity(CharacterId::Primary).x, -160.0);
    }

    #[test]
    fn no_direction_stops_horizontal_motion() {
        let mut f = Fixture::new();
        f.update(&control(), &ActionState::new().with_held(GameAction::Right));
        assert_eq!(f.velocity(CharacterId::Primary).x, 160.0);

        f.update(&control(), &ActionState::new());
        assert_eq!(f.velocity(CharacterId::Primary).x, 0.0);
    }

    #[test]
    fn grounded_jump_sets_character_velocity() {
        let mut f = Fixture::new();
        assert!(f.world.physics().is_grounded(f.world.character(CharacterId::Primary).body));

        f.update(&control(), &ActionState::new().with_held(GameAction::Jump));

        assert_eq!(f.velocity(CharacterId::Primary).y, -400.0);
    }

    #[test]
    fn secondary_jumps_lower() {
        let mut f = Fixture::new();
        f.run.active_character = CharacterId::Secondary;

        f.update(&control(), &ActionState::new().with_held(GameAction::Jump));

        assert_eq!(f.velocity(CharacterId::Secondary).y, -300.0);
        assert_ne!(f.velocity(CharacterId::Primary).y, -400.0);
    }

    #[test]
    fn pressed_trigger_ignores_plain_hold() {
        let mut f = Fixture::new();
        let control = ControlSystem::new(160.0, JumpTrigger::Pressed);

        f.update(&control, &ActionState::new().with_held(GameAction::Jump));
        assert_ne!(f.velocity(CharacterId::Primary).y, -400.0);

        f.update(&control, &ActionState::new().with_pressed(GameAction::Jump));
        assert_eq!(f.velocity(CharacterId::Primary).y, -400.0);
    }

    #[test]
    fn switch_moves_input_to_other_character() {
        let mut f = Fixture::new();
        let input = ActionState::new()
            .with_pressed(GameAction::Switch)
            .with_held(GameAction::Right);

        f.update(&control(), &input);

        assert_eq!(f.run.active_character, CharacterId::Secondary);
        assert_eq!(f.velocity(CharacterId::Secondary).x, 160.0);
        assert_eq!(f.velocity(CharacterId::Primary).x, 0.0);
        assert_eq!(
            f.events.take(),
            vec![GameEvent::Switched(CharacterId::Secondary)]
        );
    }

    #[test]
    fn held_switch_does_not_toggle_again() {
        let mut f = Fixture::new();

        f.update(&control(), &ActionState::new().with_pressed(GameAction::Switch));
        f.update(&control(), &ActionState::new().with_held(GameAction::Switch));

        assert_eq!(f.run.active_character, CharacterId::Secondary);
        assert_eq!(f.events.len(), 1);
    }
}
