//! Active contact tracking.
//!
//! `PointerTracker` holds exactly one position per contact that is currently
//! touching the surface. Positions are overwritten in place; nothing is
//! smoothed or kept once superseded. Contacts are reported in the order they
//! first arrived, which is the order the gesture region sees them.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use std::fmt;

use tracing::debug;

use crate::geom::Point;

/// Identifier of a contact, stable from contact-start to contact-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i64);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One live contact and its latest normalized position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Point,
}

/// Live set of contacts, ordered by age.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    samples: Vec<PointerSample>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new contact. An id that is already tracked has its position
    /// overwritten and keeps its age.
    ///
    /// Returns `false` if the sample was discarded as malformed.
    pub fn on_contact_start(&mut self, id: PointerId, position: Point) -> bool {
        self.upsert(id, position)
    }

    /// Update a contact's position. Unknown ids are inserted.
    ///
    /// Returns `false` if the sample was discarded as malformed.
    pub fn on_contact_move(&mut self, id: PointerId, position: Point) -> bool {
        self.upsert(id, position)
    }

    /// Forget a contact. Returns whether it was tracked.
    pub fn on_contact_end(&mut self, id: PointerId) -> bool {
        let before = self.samples.len();
        self.samples.retain(|s| s.id != id);
        before != self.samples.len()
    }

    /// Number of contacts currently held.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.samples.len()
    }

    /// Positions of all held contacts, oldest first.
    #[must_use]
    pub fn active_positions(&self) -> Vec<Point> {
        self.samples.iter().map(|s| s.position).collect()
    }

    /// Latest position of one contact.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.samples.iter().find(|s| s.id == id).map(|s| s.position)
    }

    /// All held contacts, oldest first.
    #[must_use]
    pub fn samples(&self) -> &[PointerSample] {
        &self.samples
    }

    fn upsert(&mut self, id: PointerId, position: Point) -> bool {
        if !position.is_finite() {
            debug!(%id, x = position.x, y = position.y, "discarding non-finite contact sample");
            return false;
        }
        let clamped = position.clamp_unit();
        if clamped != position {
            debug!(%id, x = position.x, y = position.y, "clamping out-of-range contact sample");
        }
        let position = clamped;
        match self.samples.iter_mut().find(|s| s.id == id) {
            Some(sample) => sample.position = position,
            None => self.samples.push(PointerSample { id, position }),
        }
        true
    }
}
