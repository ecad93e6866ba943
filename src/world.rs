//! Versioned world snapshot.
//!
//! DESIGN
//! ======
//! `WorldState` is an immutable value. The only way to change it is to build
//! the next version from a [`Mutation`] and swap it in through [`World`],
//! which is owned by exactly one engine. Readers hold an `Rc<WorldState>` and
//! keep seeing the version they took even after newer ones are committed, so
//! a half-applied update is never observable.
//!
//! The thing pool inside a snapshot is shared between versions until a
//! mutation actually changes it (see [`crate::store::ObjectStore`]).

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;

use std::rc::Rc;

use crate::geom::{Point, Rect};
use crate::gesture::GesturePhase;
use crate::store::ObjectStore;

/// One consistent view of everything the engine derives.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    version: u64,
    store: ObjectStore,
    region: Option<Rect>,
    phase: GesturePhase,
    offset: Point,
}

/// The complete set of state transitions.
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Install the thing pool at setup.
    Pool(ObjectStore),
    /// Result of a contact callback: region, phase and selection re-evaluated.
    Contact { region: Option<Rect>, phase: GesturePhase, store: ObjectStore },
    /// Result of a frame tick.
    Frame { region: Option<Rect>, phase: GesturePhase, store: ObjectStore, offset: Point },
}

impl WorldState {
    /// Incremented by every committed mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// The gesture region as of this version.
    #[must_use]
    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The gesture anchor; present exactly when a region is.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.phase.anchor()
    }

    /// The drag offset, carried over from the last active frame when idle.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Build the next version. The phase is reconciled with the region so a
    /// snapshot never holds an anchor without a region or the reverse.
    #[must_use]
    pub fn apply(&self, mutation: Mutation) -> WorldState {
        let mut next = self.clone();
        next.version = self.version + 1;
        match mutation {
            Mutation::Pool(store) => {
                next.store = store;
            }
            Mutation::Contact { region, phase, store } => {
                debug_assert_eq!(store.len(), self.store.len(), "pool size is fixed after setup");
                next.region = region;
                next.phase = phase.observe(region.as_ref());
                next.store = store;
            }
            Mutation::Frame { region, phase, store, offset } => {
                debug_assert_eq!(store.len(), self.store.len(), "pool size is fixed after setup");
                next.region = region;
                next.phase = phase.observe(region.as_ref());
                next.store = store;
                next.offset = offset;
            }
        }
        next
    }
}

/// Single owner of the current snapshot.
#[derive(Debug, Default)]
pub struct World {
    current: Rc<WorldState>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the current version.
    #[must_use]
    pub fn current(&self) -> &WorldState {
        &self.current
    }

    /// Take a handle on the current version that outlives later commits.
    #[must_use]
    pub fn snapshot(&self) -> Rc<WorldState> {
        Rc::clone(&self.current)
    }

    /// Replace the current version with the result of `mutation`.
    pub fn commit(&mut self, mutation: Mutation) -> &WorldState {
        self.current = Rc::new(self.current.apply(mutation));
        &self.current
    }
}
