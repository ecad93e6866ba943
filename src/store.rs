//! Thing model and the fixed-size object pool.
//!
//! The pool is created once per session and never grows or shrinks. A store
//! value is cheap to clone: clones share the underlying slice, and every
//! mutating operation returns a new store that leaves the original untouched.
//! When an operation changes nothing the returned store still shares storage
//! with its input.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::rc::Rc;

use rand::Rng;

use crate::geom::{Point, Rect};
use crate::gesture;

/// Index of a thing within its pool (`0..len`).
pub type ThingId = usize;

/// A manipulable object in the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Thing {
    /// Stable index assigned at creation.
    pub id: ThingId,
    /// Center in normalized space, always inside the unit square.
    pub position: Point,
    /// Radius in normalized units, fixed at creation.
    pub radius: f64,
    /// Whether the thing overlaps the gesture region.
    pub selected: bool,
    /// Carried for a future physics step; never integrated.
    pub velocity: Point,
    /// Carried for a future physics step; never integrated.
    pub mass: f64,
    /// Carried for a future physics step; never integrated.
    pub acceleration: Point,
}

impl Thing {
    /// A resting, unselected thing.
    #[must_use]
    pub fn new(id: ThingId, position: Point, radius: f64, mass: f64) -> Self {
        Self {
            id,
            position: position.clamp_unit(),
            radius,
            selected: false,
            velocity: Point::zero(),
            mass,
            acceleration: Point::zero(),
        }
    }

    /// Square bound used for selection tests.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::around(self.position, self.radius)
    }

    /// Whether the thing's square bound overlaps `region`.
    #[must_use]
    pub fn intersects(&self, region: &Rect) -> bool {
        self.bounds().intersects(region)
    }

    /// Whether `p` falls within the thing's circle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.position.distance(p) <= self.radius
    }
}

/// Result of moving the selected things by a shared offset.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The store with selected things moved.
    pub store: ObjectStore,
    /// The offset after one decay step per moved thing.
    pub offset: Point,
    /// How many things were moved.
    pub moved: usize,
}

/// The pool of things.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    things: Rc<[Thing]>,
}

impl ObjectStore {
    /// Create `count` things at uniformly random positions with random mass.
    #[must_use]
    pub fn create_pool<R: Rng + ?Sized>(count: usize, radius: f64, rng: &mut R) -> Self {
        let things: Vec<Thing> = (0..count)
            .map(|id| {
                let position = Point::new(rng.random::<f64>(), rng.random::<f64>());
                let mass = rng.random::<f64>();
                Thing::new(id, position, radius, mass)
            })
            .collect();
        Self { things: things.into() }
    }

    /// Build a pool from explicit things. Ids are reassigned to match their
    /// index and positions are clamped into the unit square.
    #[must_use]
    pub fn from_things(things: Vec<Thing>) -> Self {
        let things: Vec<Thing> = things
            .into_iter()
            .enumerate()
            .map(|(id, t)| Thing { id, position: t.position.clamp_unit(), ..t })
            .collect();
        Self { things: things.into() }
    }

    /// All things, ordered by id.
    #[must_use]
    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    #[must_use]
    pub fn get(&self, id: ThingId) -> Option<&Thing> {
        self.things.get(id)
    }

    /// Number of things in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.things.len()
    }

    /// Returns `true` if the pool holds no things.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.things.iter().filter(|t| t.selected).count()
    }

    /// Ids of things whose circle contains `p`.
    #[must_use]
    pub fn things_at(&self, p: Point) -> Vec<ThingId> {
        self.things.iter().filter(|t| t.contains(p)).map(|t| t.id).collect()
    }

    /// Whether both stores share the same underlying storage.
    #[must_use]
    pub fn shares_storage(&self, other: &ObjectStore) -> bool {
        Rc::ptr_eq(&self.things, &other.things)
    }

    /// Select exactly the things overlapping `region`. No region deselects all.
    #[must_use]
    pub fn recompute_selection(&self, region: Option<&Rect>) -> Self {
        let selected = |t: &Thing| region.is_some_and(|r| t.intersects(r));
        if self.things.iter().all(|t| t.selected == selected(t)) {
            return self.clone();
        }
        let things: Vec<Thing> = self
            .things
            .iter()
            .map(|t| Thing { selected: selected(t), ..t.clone() })
            .collect();
        Self { things: things.into() }
    }

    /// Move every selected thing by the same offset, clamping into the unit
    /// square.
    ///
    /// The returned offset leaks `decay_factor` of itself once per moved
    /// thing, so it shrinks faster the more things are selected.
    #[must_use]
    pub fn apply_offset(&self, offset: Point, decay_factor: f64) -> Applied {
        if self.selected_count() == 0 {
            return Applied { store: self.clone(), offset, moved: 0 };
        }
        let mut current = offset;
        let mut moved = 0;
        let things: Vec<Thing> = self
            .things
            .iter()
            .map(|t| {
                if !t.selected {
                    return t.clone();
                }
                current = gesture::decay(current, decay_factor);
                moved += 1;
                Thing { position: (t.position + offset).clamp_unit(), ..t.clone() }
            })
            .collect();
        Applied { store: Self { things: things.into() }, offset: current, moved }
    }
}
