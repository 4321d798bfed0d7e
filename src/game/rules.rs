//=========================================================================
// Gameplay Rules
//=========================================================================
//
// Reactions to physics contacts: pickups, hazard hits and digging.
//
// Architecture:
//   StepReport<Trigger> → dispatch() → collect_treat / hit_hazard / dig
//
// Every rule is a guarded transition. Inactive collectibles and a consumed
// dig spot turn repeat triggers into no-ops, so a contact that fires twice
// in one frame (both characters on one item) is harmless.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::ActionState;
use crate::core::physics::Contact;
use super::actions::GameAction;
use super::entities::{CharacterId, CollectibleId, Trigger};
use super::events::{EventQueue, GameEvent};
use super::score::RunState;
use super::world::World;

//=== GameplayRules =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameplayRules {
    reward: u32,
    flash_duration: Duration,
}

impl GameplayRules {
    pub fn new(reward: u32, flash_duration: Duration) -> Self {
        Self {
            reward,
            flash_duration,
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Runs the rule for each contact, in the order given.
    pub fn dispatch(
        &self,
        contacts: &[Contact<Trigger>],
        input: &ActionState<GameAction>,
        world: &mut World,
        run: &mut RunState,
        events: &mut EventQueue<GameEvent>,
    ) {
        for contact in contacts {
            match contact.tag {
                Trigger::Treat { collectible } => {
                    self.collect_treat(world, run, events, collectible);
                }
                Trigger::Hazard { character } => {
                    self.hit_hazard(world, events, character);
                }
                Trigger::DigSpot { character } => {
                    let asserted = input.is_down(GameAction::Dig)
                        || input.was_pressed(GameAction::Dig);
                    self.dig(world, events, character, asserted);
                }
            }
        }
    }

    //--- Rules ------------------------------------------------------------

    /// Picks up `id` if it is still active. Returns `true` on pickup.
    pub fn collect_treat(
        &self,
        world: &mut World,
        run: &mut RunState,
        events: &mut EventQueue<GameEvent>,
        id: CollectibleId,
    ) -> bool {
        let Some(collectible) = world.collectible_mut(id) else {
            warn!("Pickup of unknown collectible {:?}", id);
            return false;
        };
        if !collectible.active {
            return false;
        }

        collectible.active = false;
        let body = collectible.body;
        world.physics_mut().remove_body(body);

        let score = run.score.award(self.reward);
        debug!("Collected {:?}, score {}", id, score);
        events.push(GameEvent::TreatCollected { score });

        if world.active_collectible_count() == 0 && run.score.complete_level() {
            info!("Level complete with score {}", score);
            events.push(GameEvent::LevelComplete);
        }

        true
    }

    /// Starts (or restarts) the character's flash.
    pub fn hit_hazard(
        &self,
        world: &mut World,
        events: &mut EventQueue<GameEvent>,
        id: CharacterId,
    ) {
        let character = world.character_mut(id);
        let was_flashing = character.is_flashing();
        character.flash_timer = Some(self.flash_duration);

        if !was_flashing {
            debug!("{} hit the hazard", id.name());
            events.push(GameEvent::HazardHit(id));
        }
    }

    /// Digs up a collectible at the dig spot.
    ///
    /// Succeeds at most once per run, and only for the secondary character
    /// while it overlaps the spot with the dig key asserted.
    pub fn dig(
        &self,
        world: &mut World,
        events: &mut EventQueue<GameEvent>,
        character: CharacterId,
        dig_asserted: bool,
    ) -> Option<CollectibleId> {
        if character != CharacterId::Secondary || !dig_asserted || world.dig_spot().consumed {
            return None;
        }

        let spot = world.dig_spot().body;
        let digger = world.character(character).body;
        let physics = world.physics();
        let (spot_box, digger_box) = (physics.body(spot)?.aabb(), physics.body(digger)?.aabb());
        if !digger_box.overlaps(&spot_box) {
            return None;
        }

        let position = world.physics_mut().remove_body(spot)?.position;
        world.dig_spot_mut().consumed = true;

        let id = world.spawn_collectible(position);
        info!("{} dug up {:?}", character.name(), id);
        events.push(GameEvent::DugUp(id));
        Some(id)
    }

    //--- Timers -----------------------------------------------------------

    /// Counts every flash down by `dt`.
    pub fn advance_timers(&self, world: &mut World, dt: Duration) {
        for character in world.characters_mut() {
            character.tick_flash(dt);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, InputSystem, KeyCode};
    use crate::core::math::Vec2;
    use crate::game::config::GameConfig;

    //--- Test Helpers -----------------------------------------------------

    fn rules() -> GameplayRules {
        GameplayRules::new(10, Duration::from_millis(500))
    }

    fn setup() -> (World, RunState, EventQueue<GameEvent>) {
        let world = World::new(&GameConfig::default()).expect("valid config");
        (world, RunState::new(), EventQueue::new())
    }

    fn place(world: &mut World, id: CharacterId, position: Vec2) {
        let handle = world.character(id).body;
        if let Some(body) = world.physics_mut().body_mut(handle) {
            body.position = position;
        }
    }

    //=====================================================================
    // Pickup
    //=====================================================================

    #[test]
    fn collect_scores_once() {
        let (mut world, mut run, mut events) = setup();
        let rules = rules();

        assert!(rules.collect_treat(&mut world, &mut run, &mut events, CollectibleId(0)));
        assert!(!rules.collect_treat(&mut world, &mut run, &mut events, CollectibleId(0)));

        assert_eq!(run.score.score(), 10);
        assert_eq!(world.active_collectible_count(), 5);
        assert_eq!(events.take(), vec![GameEvent::TreatCollected { score: 10 }]);
    }

    #[test]
    fn collected_body_leaves_physics() {
        let (mut world, mut run, mut events) = setup();
        let handle = world.collectibles()[2].body;

        rules().collect_treat(&mut world, &mut run, &mut events, CollectibleId(2));

        assert!(!world.physics().contains(handle));
    }

    #[test]
    fn last_pickup_completes_level_once() {
        let (mut world, mut run, mut events) = setup();
        let rules = rules();

        for i in 0..6 {
            rules.collect_treat(&mut world, &mut run, &mut events, CollectibleId(i));
            assert_eq!(run.score.is_level_complete(), i == 5);
        }

        let completions = events.iter().filter(|e| **e == GameEvent::LevelComplete).count();
        assert_eq!(completions, 1);
        assert_eq!(run.score.score(), 60);
    }

    #[test]
    fn unknown_collectible_is_ignored() {
        let (mut world, mut run, mut events) = setup();
        assert!(!rules().collect_treat(&mut world, &mut run, &mut events, CollectibleId(99)));
        assert!(events.is_empty());
    }

    //=====================================================================
    // Hazard
    //=====================================================================

    #[test]
    fn hit_starts_flash_and_reports_once() {
        let (mut world, _, mut events) = setup();
        let rules = rules();

        rules.hit_hazard(&mut world, &mut events, CharacterId::Primary);
        rules.advance_timers(&mut world, Duration::from_millis(300));
        rules.hit_hazard(&mut world, &mut events, CharacterId::Primary);

        let primary = world.character(CharacterId::Primary);
        assert_eq!(primary.flash_timer, Some(Duration::from_millis(500)));
        assert_eq!(events.take(), vec![GameEvent::HazardHit(CharacterId::Primary)]);
    }

    #[test]
    fn flash_expires_after_duration() {
        let (mut world, _, mut events) = setup();
        let rules = rules();

        rules.hit_hazard(&mut world, &mut events, CharacterId::Secondary);
        rules.advance_timers(&mut world, Duration::from_millis(499));
        assert!(world.character(CharacterId::Secondary).is_flashing());

        rules.advance_timers(&mut world, Duration::from_millis(1));
        assert!(!world.character(CharacterId::Secondary).is_flashing());
    }

    //=====================================================================
    // Dig
    //=====================================================================

    #[test]
    fn dig_requires_overlap() {
        let (mut world, _, mut events) = setup();

        let dug = rules().dig(&mut world, &mut events, CharacterId::Secondary, true);

        assert_eq!(dug, None);
        assert!(!world.dig_spot().consumed);
    }

    #[test]
    fn dig_requires_secondary_and_key() {
        let (mut world, _, mut events) = setup();
        place(&mut world, CharacterId::Primary, Vec2::new(500.0, 504.0));
        place(&mut world, CharacterId::Secondary, Vec2::new(500.0, 504.0));
        let rules = rules();

        assert_eq!(rules.dig(&mut world, &mut events, CharacterId::Primary, true), None);
        assert_eq!(rules.dig(&mut world, &mut events, CharacterId::Secondary, false), None);
        assert!(events.is_empty());
    }

    #[test]
    fn dig_spawns_once_at_spot() {
        let (mut world, _, mut events) = setup();
        place(&mut world, CharacterId::Secondary, Vec2::new(500.0, 504.0));
        let rules = rules();

        let first = rules.dig(&mut world, &mut events, CharacterId::Secondary, true);
        let second = rules.dig(&mut world, &mut events, CharacterId::Secondary, true);

        assert_eq!(first, Some(CollectibleId(6)));
        assert_eq!(second, None);
        assert!(world.dig_spot().consumed);
        assert_eq!(world.collectibles().len(), 7);

        let spawned = world.collectibles()[6].body;
        let position = world.physics().body(spawned).map(|b| b.position);
        assert_eq!(position, Some(Vec2::new(500.0, 550.0)));
        assert_eq!(events.take(), vec![GameEvent::DugUp(CollectibleId(6))]);
    }

    #[test]
    fn dig_after_completion_still_scores() {
        let (mut world, mut run, mut events) = setup();
        place(&mut world, CharacterId::Secondary, Vec2::new(500.0, 504.0));
        let rules = rules();
        for i in 0..6 {
            rules.collect_treat(&mut world, &mut run, &mut events, CollectibleId(i));
        }

        let dug = rules.dig(&mut world, &mut events, CharacterId::Secondary, true);
        let collected = dug.is_some_and(|id| rules.collect_treat(&mut world, &mut run, &mut events, id));

        assert!(collected);
        assert!(run.score.is_level_complete());
        assert_eq!(run.score.score(), 70);
    }

    //=====================================================================
    // Dispatch
    //=====================================================================

    #[test]
    fn dispatch_routes_dig_with_key_state() {
        let (mut world, mut run, mut events) = setup();
        place(&mut world, CharacterId::Secondary, Vec2::new(500.0, 504.0));
        let contact = Contact {
            a: world.character(CharacterId::Secondary).body,
            b: world.dig_spot().body,
            tag: Trigger::DigSpot { character: CharacterId::Secondary },
        };
        let rules = rules();

        rules.dispatch(&[contact], &ActionState::new(), &mut world, &mut run, &mut events);
        assert!(!world.dig_spot().consumed);

        let dig = ActionState::new().with_held(GameAction::Dig);
        rules.dispatch(&[contact, contact], &dig, &mut world, &mut run, &mut events);
        assert!(world.dig_spot().consumed);
        assert_eq!(world.collectibles().len(), 7);
    }

    #[test]
    fn dig_key_tapped_within_one_frame_still_digs() {
        let (mut world, mut run, mut events) = setup();
        place(&mut world, CharacterId::Secondary, Vec2::new(500.0, 504.0));
        let contact = Contact {
            a: world.character(CharacterId::Secondary).body,
            b: world.dig_spot().body,
            tag: Trigger::DigSpot { character: CharacterId::Secondary },
        };

        let mut input = InputSystem::new();
        input.bind_key(KeyCode::KeyD, GameAction::Dig);
        input.process_frame(&[vec![
            InputEvent::KeyDown { key: KeyCode::KeyD },
            InputEvent::KeyUp { key: KeyCode::KeyD },
        ]]);
        assert!(!input.actions().is_down(GameAction::Dig));

        rules().dispatch(&[contact], input.actions(), &mut world, &mut run, &mut events);

        assert!(world.dig_spot().consumed);
        assert_eq!(events.take(), vec![GameEvent::DugUp(CollectibleId(6))]);
    }
}
