//=========================================================================
// World Registry
//=========================================================================
//
// Owns the physics world and every entity record of the level.
//
// Architecture:
//   GameConfig → World::new() → PhysicsWorld<Trigger> + entity records
//
// Registration order (fixes pair resolution order for the whole run):
//   1. platforms           static
//   2. characters          solid vs every platform
//   3. collectible batch   solid vs every platform, overlap vs characters
//   4. hazard              solid vs every platform, overlap vs characters
//   5. dig spot            static, overlap vs the secondary only
//
// Dug collectibles are appended later through `spawn_collectible`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::math::Vec2;
use crate::core::physics::{Body, PhysicsWorld};
use super::config::{CollectibleTemplate, ConfigError, GameConfig};
use super::entities::{
    Character, CharacterId, Collectible, CollectibleId, DigSpot, Hazard, Platform, Trigger,
};

//=== World ===============================================================

/// Entity registry for one run of the level.
pub struct World {
    physics: PhysicsWorld<Trigger>,
    platforms: Vec<Platform>,
    characters: [Character; 2],
    collectibles: Vec<Collectible>,
    hazard: Hazard,
    dig_spot: DigSpot,
    template: CollectibleTemplate,
}

impl World {
    //--- Construction -----------------------------------------------------

    /// Validates `config` and builds the level from it.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut physics = PhysicsWorld::new(config.world_size, config.gravity);

        //--- 1. Platforms --------------------------------------------------
        let platforms: Vec<Platform> = config
            .platforms
            .iter()
            .map(|spec| Platform {
                body: physics.register_static(Body::fixed(spec.position, spec.size)),
            })
            .collect();

        //--- 2. Characters -------------------------------------------------
        let characters = CharacterId::ALL.map(|id| {
            let spec = config.character(id);
            let body = physics.register_dynamic(
                Body::new(spec.spawn, spec.size)
                    .with_bounce(spec.bounce)
                    .with_world_bounds(true),
            );
            for platform in &platforms {
                physics.add_solid_pair(body, platform.body, None);
            }
            Character::new(id, body, spec.jump_velocity)
        });

        //--- 3. Collectible batch -----------------------------------------
        let template = config.collectible;
        let collectibles: Vec<Collectible> = config
            .batch
            .positions()
            .enumerate()
            .map(|(i, position)| {
                register_collectible(
                    &mut physics,
                    &platforms,
                    &characters,
                    &template,
                    CollectibleId(i),
                    position,
                )
            })
            .collect();

        //--- 4. Hazard -----------------------------------------------------
        let spec = &config.hazard;
        let hazard = Hazard {
            body: physics.register_dynamic(
                Body::new(spec.spawn, spec.size)
                    .with_velocity(spec.velocity)
                    .with_bounce(spec.bounce)
                    .with_world_bounds(true),
            ),
        };
        for platform in &platforms {
            physics.add_solid_pair(hazard.body, platform.body, None);
        }
        for character in &characters {
            physics.add_overlap_pair(
                character.body,
                hazard.body,
                Trigger::Hazard { character: character.id },
            );
        }

        //--- 5. Dig spot ---------------------------------------------------
        let spec = &config.dig_spot;
        let dig_spot = DigSpot {
            body: physics.register_static(Body::fixed(spec.position, spec.size)),
            consumed: false,
        };
        physics.add_overlap_pair(
            characters[CharacterId::Secondary.index()].body,
            dig_spot.body,
            Trigger::DigSpot { character: CharacterId::Secondary },
        );

        let world = Self {
            physics,
            platforms,
            characters,
            collectibles,
            hazard,
            dig_spot,
            template,
        };

        info!(
            "World built: {} platforms, {} collectibles, {} bodies",
            world.platforms.len(),
            world.collectibles.len(),
            world.physics.body_count()
        );

        Ok(world)
    }

    //--- Spawning ---------------------------------------------------------

    /// Creates an active collectible at `position` from the shared template.
    ///
    /// The new body collides with every platform and triggers a pickup when
    /// either character overlaps it.
    pub fn spawn_collectible(&mut self, position: Vec2) -> CollectibleId {
        let id = CollectibleId(self.collectibles.len());
        let collectible = register_collectible(
            &mut self.physics,
            &self.platforms,
            &self.characters,
            &self.template,
            id,
            position,
        );

        self.collectibles.push(collectible);
        debug!("Spawned collectible {:?} at ({}, {})", id, position.x, position.y);
        id
    }

    //--- Entity Access ----------------------------------------------------

    pub fn physics(&self) -> &PhysicsWorld<Trigger> {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld<Trigger> {
        &mut self.physics
    }

    pub fn character(&self, id: CharacterId) -> &Character {
        &self.characters[id.index()]
    }

    pub fn character_mut(&mut self, id: CharacterId) -> &mut Character {
        &mut self.characters[id.index()]
    }

    pub fn characters(&self) -> &[Character; 2] {
        &self.characters
    }

    pub(crate) fn characters_mut(&mut self) -> &mut [Character; 2] {
        &mut self.characters
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn collectible(&self, id: CollectibleId) -> Option<&Collectible> {
        self.collectibles.get(id.0)
    }

    pub(crate) fn collectible_mut(&mut self, id: CollectibleId) -> Option<&mut Collectible> {
        self.collectibles.get_mut(id.0)
    }

    /// Every collectible ever created, active or not, in creation order.
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    /// Collectibles that can still be picked up.
    pub fn active_collectible_count(&self) -> usize {
        self.collectibles.iter().filter(|c| c.active).count()
    }

    pub fn hazard(&self) -> &Hazard {
        &self.hazard
    }

    pub fn dig_spot(&self) -> &DigSpot {
        &self.dig_spot
    }

    pub(crate) fn dig_spot_mut(&mut self) -> &mut DigSpot {
        &mut self.dig_spot
    }
}

//--- Internal Helpers ----------------------------------------------------

fn register_collectible(
    physics: &mut PhysicsWorld<Trigger>,
    platforms: &[Platform],
    characters: &[Character; 2],
    template: &CollectibleTemplate,
    id: CollectibleId,
    position: Vec2,
) -> Collectible {
    let body = physics.register_dynamic(
        Body::new(position, template.size)
            .with_bounce(template.bounce)
            .with_world_bounds(template.collide_world_bounds),
    );
    for platform in platforms {
        physics.add_solid_pair(body, platform.body, None);
    }
    for character in characters {
        physics.add_overlap_pair(character.body, body, Trigger::Treat { collectible: id });
    }
    Collectible { body, active: true }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(&GameConfig::default()).expect("default config is valid")
    }

    #[test]
    fn builds_every_entity() {
        let world = world();

        assert_eq!(world.platforms().len(), 3);
        assert_eq!(world.collectibles().len(), 6);
        assert_eq!(world.active_collectible_count(), 6);
        assert!(!world.dig_spot().consumed);
        // 3 platforms + 2 characters + 6 collectibles + hazard + dig spot
        assert_eq!(world.physics().body_count(), 13);
    }

    #[test]
    fn pairs_follow_registration_plan() {
        let world = world();

        // characters, collectibles and hazard each pair with 3 platforms
        assert_eq!(world.physics().solid_pair_count(), (2 + 6 + 1) * 3);
        // 6 collectibles x 2 characters, hazard x 2 characters, dig spot x 1
        assert_eq!(world.physics().overlap_pair_count(), 12 + 2 + 1);
    }

    #[test]
    fn characters_spawn_at_configured_positions() {
        let world = world();
        let primary = world.character(CharacterId::Primary);
        let secondary = world.character(CharacterId::Secondary);

        let p = world.physics().body(primary.body).map(|b| b.position);
        let s = world.physics().body(secondary.body).map(|b| b.position);

        assert_eq!(p, Some(Vec2::new(100.0, 500.0)));
        assert_eq!(s, Some(Vec2::new(200.0, 500.0)));
        assert_eq!(primary.jump_velocity, -400.0);
        assert_eq!(secondary.jump_velocity, -300.0);
    }

    #[test]
    fn hazard_starts_moving_right() {
        let world = world();
        let body = world.physics().body(world.hazard().body).copied();

        assert_eq!(body.map(|b| b.velocity), Some(Vec2::new(100.0, 0.0)));
        assert_eq!(body.map(|b| b.bounce), Some(1.0));
    }

    #[test]
    fn spawned_collectible_gets_next_id_and_pairs() {
        let mut world = world();
        let overlaps = world.physics().overlap_pair_count();
        let solids = world.physics().solid_pair_count();

        let id = world.spawn_collectible(Vec2::new(500.0, 550.0));

        assert_eq!(id, CollectibleId(6));
        assert_eq!(world.active_collectible_count(), 7);
        assert_eq!(world.physics().overlap_pair_count(), overlaps + 2);
        assert_eq!(world.physics().solid_pair_count(), solids + world.platforms().len());
    }

    #[test]
    fn spawned_collectible_uses_template_and_lands_on_floor() {
        let mut world = world();
        let id = world.spawn_collectible(Vec2::new(500.0, 550.0));
        let handle = world.collectible(id).map(|c| c.body).expect("spawned collectible");

        let body = world.physics().body(handle).copied().expect("body is registered");
        assert_eq!(body.bounce, 0.5);
        assert!(body.collide_world_bounds);
        assert!(!body.is_static);

        // Nothing dispatches contacts here, so nobody picks it up.
        for _ in 0..120 {
            world.physics_mut().step(1.0 / 60.0);
        }

        let bottom = world.physics().body(handle).map(|b| b.aabb().max.y);
        assert!(bottom.is_some_and(|y| (y - 536.0).abs() < 1e-3), "bottom = {:?}", bottom);
        assert!(world.physics().is_grounded(handle));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.run_speed = 0.0;
        assert!(matches!(World::new(&config), Err(ConfigError::InvalidSpeed(_))));
    }
}
