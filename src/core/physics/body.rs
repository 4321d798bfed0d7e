//=========================================================================
// Physics Body
//=========================================================================
//
// Kinematic state attached to every entity.
//
// Bodies are plain `Copy` records. The physics world stores them in an
// arena and hands out `BodyHandle`s; entities keep the handle, never the
// body itself.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{Aabb, Vec2};

//=== BodyHandle ==========================================================

/// Arena index of a body registered with a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Handles are never reused: removing a body leaves its slot empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

//=== Body ================================================================

/// Position, velocity and collision response settings of one entity.
///
/// `position` is the centre of the body's box. `bounce` is the fraction of
/// the incoming velocity reflected along a collision axis (0 absorbs, 1 is
/// fully elastic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub is_static: bool,
    pub bounce: f32,
    pub collide_world_bounds: bool,
}

impl Body {
    /// Creates a resting dynamic body with no bounce and no world clamp.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            is_static: false,
            bounce: 0.0,
            collide_world_bounds: false,
        }
    }

    /// Creates an immovable body.
    pub fn fixed(position: Vec2, size: Vec2) -> Self {
        Self {
            is_static: true,
            ..Self::new(position, size)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the bounce coefficient, clamped to `[0, 1]`.
    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce.clamp(0.0, 1.0);
        self
    }

    pub fn with_world_bounds(mut self, enabled: bool) -> Self {
        self.collide_world_bounds = enabled;
        self
    }

    /// Current bounding box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    /// Size is strictly positive and every field is finite.
    pub fn is_valid(&self) -> bool {
        self.size.x > 0.0
            && self.size.y > 0.0
            && self.position.is_finite()
            && self.velocity.is_finite()
            && (0.0..=1.0).contains(&self.bounce)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_body_is_dynamic_and_resting() {
        let body = Body::new(Vec2::new(1.0, 2.0), Vec2::new(4.0, 4.0));
        assert!(!body.is_static);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.bounce, 0.0);
        assert!(!body.collide_world_bounds);
    }

    #[test]
    fn fixed_body_is_static() {
        let body = Body::fixed(Vec2::ZERO, Vec2::new(4.0, 4.0));
        assert!(body.is_static);
    }

    #[test]
    fn bounce_is_clamped() {
        let size = Vec2::new(1.0, 1.0);
        assert_eq!(Body::new(Vec2::ZERO, size).with_bounce(2.0).bounce, 1.0);
        assert_eq!(Body::new(Vec2::ZERO, size).with_bounce(-1.0).bounce, 0.0);
    }

    #[test]
    fn zero_size_body_is_invalid() {
        assert!(!Body::new(Vec2::ZERO, Vec2::new(0.0, 5.0)).is_valid());
        assert!(Body::new(Vec2::ZERO, Vec2::new(1.0, 5.0)).is_valid());
    }

    #[test]
    fn aabb_is_centred_on_position() {
        let body = Body::new(Vec2::new(10.0, 10.0), Vec2::new(4.0, 2.0));
        let aabb = body.aabb();
        assert_eq!(aabb.min, Vec2::new(8.0, 9.0));
        assert_eq!(aabb.max, Vec2::new(12.0, 11.0));
    }
}
