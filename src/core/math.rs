//=========================================================================
// Vector & AABB Primitives
//=========================================================================
//
// 2D math used by the physics world and the entity model. Vectors are
// `glam::Vec2`; boxes are a thin min/max wrapper over them.
//
// Coordinate system: screen space, origin top-left, +y points down.
// Bodies are positioned by their centre; an `Aabb` is derived on demand.
//
//=========================================================================

//=== External Dependencies ===============================================

/// Positions, velocities and sizes.
pub use glam::Vec2;

//=== Aabb ================================================================

/// Axis-aligned bounding box stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Builds a box from its centre and full size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict intersection test. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Signed push that moves `self` out of `other` along each axis.
    ///
    /// The x component is negative when `self` should move left, the y
    /// component negative when it should move up. Only meaningful when the
    /// boxes overlap.
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        let push_left = self.max.x - other.min.x;
        let push_right = other.max.x - self.min.x;
        let push_up = self.max.y - other.min.y;
        let push_down = other.max.y - self.min.y;

        let x = if push_left < push_right { -push_left } else { push_right };
        let y = if push_up < push_down { -push_up } else { push_down };

        Vec2::new(x, y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
