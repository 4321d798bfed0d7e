//=========================================================================
// Physics World
//=========================================================================
//
// Arcade-style AABB physics for a fixed-step 2D simulation.
//
// Architecture:
//   register_*() → slots: Vec<Option<BodySlot>>
//   add_*_pair() → solid_pairs / overlap_pairs (tagged with T)
//
// Step pipeline:
//   1. integrate   gravity + velocity for every dynamic body
//   2. bounds      clamp to the world rectangle, reflect velocity
//   3. solid       push out along minimum penetration, bounce
//   4. overlap     report tagged contacts, no positional effect
//
// Callbacks are plain tags: `step()` returns the contacts that fired, in
// pair registration order, and the caller dispatches them. The world never
// owns entities, only bodies and pairing rules.
//
//=========================================================================

//=== Module Declarations =================================================

mod body;

//=== Public API ==========================================================

pub use body::{Body, BodyHandle};

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::math::{Aabb, Vec2};

//=== Pairs & Contacts ====================================================

/// A solid pairing: overlapping bodies are separated and bounced.
#[derive(Debug, Clone, Copy)]
struct SolidPair<T> {
    a: BodyHandle,
    b: BodyHandle,
    on_collide: Option<T>,
}

/// A trigger pairing: overlap is reported, bodies are untouched.
#[derive(Debug, Clone, Copy)]
struct OverlapPair<T> {
    a: BodyHandle,
    b: BodyHandle,
    on_overlap: T,
}

/// A pair that fired during a step, carrying the tag it was registered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<T> {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub tag: T,
}

/// Contacts produced by one [`PhysicsWorld::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport<T> {
    /// Solid pairs that collided and had a tag attached.
    pub collisions: Vec<Contact<T>>,

    /// Overlap pairs whose boxes intersected after resolution.
    pub overlaps: Vec<Contact<T>>,
}

impl<T> Default for StepReport<T> {
    fn default() -> Self {
        Self {
            collisions: Vec::new(),
            overlaps: Vec::new(),
        }
    }
}

//=== BodySlot ============================================================

#[derive(Debug, Clone, Copy)]
struct BodySlot {
    body: Body,
    grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

//=== PhysicsWorld ========================================================

/// Owns registered bodies and the pairing rules between them.
///
/// `T` is the tag type attached to pairs; it comes back inside [`Contact`]s
/// so the caller knows which gameplay rule to run.
pub struct PhysicsWorld<T> {
    gravity: f32,
    bounds: Aabb,
    slots: Vec<Option<BodySlot>>,
    solid_pairs: Vec<SolidPair<T>>,
    overlap_pairs: Vec<OverlapPair<T>>,
}

impl<T: Copy> PhysicsWorld<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty world spanning `(0, 0)..size` with downward gravity.
    pub fn new(size: Vec2, gravity: f32) -> Self {
        Self {
            gravity,
            bounds: Aabb {
                min: Vec2::ZERO,
                max: size,
            },
            slots: Vec::new(),
            solid_pairs: Vec::new(),
            overlap_pairs: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers an immovable body. Integration never touches it.
    pub fn register_static(&mut self, mut body: Body) -> BodyHandle {
        body.is_static = true;
        self.insert(body)
    }

    /// Registers a body affected by gravity, velocity and collisions.
    pub fn register_dynamic(&mut self, mut body: Body) -> BodyHandle {
        body.is_static = false;
        self.insert(body)
    }

    /// Separates `a` and `b` whenever they overlap. A tag, if given, is
    /// reported in [`StepReport::collisions`] each step they collide.
    pub fn add_solid_pair(&mut self, a: BodyHandle, b: BodyHandle, on_collide: Option<T>) {
        if !self.contains(a) || !self.contains(b) {
            warn!("Solid pair references a missing body ({:?}, {:?}), ignored", a, b);
            return;
        }
        self.solid_pairs.push(SolidPair { a, b, on_collide });
    }

    /// Reports `on_overlap` in [`StepReport::overlaps`] each step `a` and `b`
    /// intersect.
    pub fn add_overlap_pair(&mut self, a: BodyHandle, b: BodyHandle, on_overlap: T) {
        if !self.contains(a) || !self.contains(b) {
            warn!("Overlap pair references a missing body ({:?}, {:?}), ignored", a, b);
            return;
        }
        self.overlap_pairs.push(OverlapPair { a, b, on_overlap });
    }

    /// Unregisters a body and every pair that references it.
    ///
    /// Returns the body's final state, or `None` if it was already removed.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index())?.take()?;

        self.solid_pairs.retain(|p| p.a != handle && p.b != handle);
        self.overlap_pairs.retain(|p| p.a != handle && p.b != handle);

        trace!("Removed body {:?}", handle);
        Some(slot.body)
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.slot(handle).is_some()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.slot(handle).map(|s| &s.body)
    }

    /// Mutable access for direct velocity control (e.g. player input).
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .map(|s| &mut s.body)
    }

    /// Whether the body landed on something beneath it during the last step.
    pub fn is_grounded(&self, handle: BodyHandle) -> bool {
        self.slot(handle).is_some_and(|s| s.grounded)
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn overlap_pair_count(&self) -> usize {
        self.overlap_pairs.len()
    }

    pub fn solid_pair_count(&self) -> usize {
        self.solid_pairs.len()
    }

    //--- Simulation -------------------------------------------------------

    /// Advances every dynamic body by `dt` seconds and resolves pairs.
    pub fn step(&mut self, dt: f32) -> StepReport<T> {
        let mut report = StepReport::default();

        //--- 1. Integrate ---------------------------------------------------
        let gravity = self.gravity;
        let bounds = self.bounds;
        for slot in self.slots.iter_mut().flatten() {
            slot.grounded = false;

            if slot.body.is_static {
                continue;
            }

            slot.body.velocity.y += gravity * dt;
            slot.body.position += slot.body.velocity * dt;

            //--- 2. World bounds --------------------------------------------
            if slot.body.collide_world_bounds {
                slot.grounded |= clamp_to_bounds(&mut slot.body, &bounds);
            }
        }

        //--- 3. Solid pairs -------------------------------------------------
        for i in 0..self.solid_pairs.len() {
            let pair = self.solid_pairs[i];
            if self.separate(pair.a, pair.b) {
                if let Some(tag) = pair.on_collide {
                    report.collisions.push(Contact { a: pair.a, b: pair.b, tag });
                }
            }
        }

        //--- 4. Overlap pairs -----------------------------------------------
        for pair in &self.overlap_pairs {
            let (Some(a), Some(b)) = (self.slot(pair.a), self.slot(pair.b)) else {
                continue;
            };
            if a.body.aabb().overlaps(&b.body.aabb()) {
                report.overlaps.push(Contact {
                    a: pair.a,
                    b: pair.b,
                    tag: pair.on_overlap,
                });
            }
        }

        report
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert(&mut self, body: Body) -> BodyHandle {
        debug_assert!(body.is_valid(), "Registered body is invalid: {:?}", body);

        let handle = BodyHandle(self.slots.len() as u32);
        self.slots.push(Some(BodySlot {
            body,
            grounded: false,
        }));
        handle
    }

    fn slot(&self, handle: BodyHandle) -> Option<&BodySlot> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    /// Resolves one solid pair. Returns `true` if the bodies overlapped.
    fn separate(&mut self, a: BodyHandle, b: BodyHandle) -> bool {
        let (Some(sa), Some(sb)) = (self.slot(a).copied(), self.slot(b).copied()) else {
            return false;
        };
        let (mut sa, mut sb) = (sa, sb);

        if sa.body.is_static && sb.body.is_static {
            return false;
        }

        let box_a = sa.body.aabb();
        let box_b = sb.body.aabb();
        if !box_a.overlaps(&box_b) {
            return false;
        }

        // Push that moves `a` out of `b`; ties go to the vertical axis.
        let push = box_a.penetration(&box_b);
        let axis = if push.x.abs() < push.y.abs() { Axis::X } else { Axis::Y };
        let push = match axis {
            Axis::X => Vec2::new(push.x, 0.0),
            Axis::Y => Vec2::new(0.0, push.y),
        };

        let (share_a, share_b) = match (sa.body.is_static, sb.body.is_static) {
            (false, true) => (1.0, 0.0),
            (true, false) => (0.0, 1.0),
            _ => (0.5, 0.5),
        };

        if share_a > 0.0 {
            sa.body.position += push * share_a;
            bounce_off(&mut sa.body, axis, push);
            sa.grounded |= axis == Axis::Y && push.y < 0.0;
        }
        if share_b > 0.0 {
            let push_b = -push;
            sb.body.position += push_b * share_b;
            bounce_off(&mut sb.body, axis, push_b);
            sb.grounded |= axis == Axis::Y && push_b.y < 0.0;
        }

        trace!("Separated {:?} / {:?} along {:?} by {:?}", a, b, axis, push);

        self.slots[a.index()] = Some(sa);
        self.slots[b.index()] = Some(sb);
        true
    }
}

//=== Free Helpers ========================================================

/// Reflects the velocity component along `axis` if it points against `push`.
fn bounce_off(body: &mut Body, axis: Axis, push: Vec2) {
    let (v, p) = match axis {
        Axis::X => (&mut body.velocity.x, push.x),
        Axis::Y => (&mut body.velocity.y, push.y),
    };
    if *v * p < 0.0 {
        *v = -*v * body.bounce;
    }
}

/// Keeps `body` inside `bounds`. Returns `true` when it hit the floor.
fn clamp_to_bounds(body: &mut Body, bounds: &Aabb) -> bool {
    let aabb = body.aabb();
    let mut on_floor = false;

    if aabb.min.x < bounds.min.x {
        body.position.x += bounds.min.x - aabb.min.x;
        if body.velocity.x < 0.0 {
            body.velocity.x = -body.velocity.x * body.bounce;
        }
    } else if aabb.max.x > bounds.max.x {
        body.position.x -= aabb.max.x - bounds.max.x;
        if body.velocity.x > 0.0 {
            body.velocity.x = -body.velocity.x * body.bounce;
        }
    }

    if aabb.min.y < bounds.min.y {
        body.position.y += bounds.min.y - aabb.min.y;
        if body.velocity.y < 0.0 {
            body.velocity.y = -body.velocity.y * body.bounce;
        }
    } else if aabb.max.y > bounds.max.y {
        body.position.y -= aabb.max.y - bounds.max.y;
        if body.velocity.y > 0.0 {
            body.velocity.y = -body.velocity.y * body.bounce;
        }
        on_floor = true;
    }

    on_floor
}

//=========================================================================
// Unit Tests
//=========================================================================
