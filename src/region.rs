//! The gesture region: one bounding box over every active contact.

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;

use crate::geom::Rect;
use crate::pointer::PointerTracker;

/// Bounding box over all tracked contacts, or `None` when fewer than
/// `min_contacts` are held.
///
/// No outlier rejection is done; every contact widens the box. A single
/// contact gives a zero-size box at its position.
#[must_use]
pub fn gesture_region(tracker: &PointerTracker, min_contacts: usize) -> Option<Rect> {
    if tracker.active_count() < min_contacts {
        return None;
    }
    Rect::bounding(&tracker.active_positions())
}
