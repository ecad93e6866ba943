//! Gesture phase state machine and drag offset math.
//!
//! A gesture is `Idle` while there is no gesture region and `Active` while
//! there is one. Entering `Active` captures an anchor at the region's top-left
//! corner; each frame the drag offset is the distance the top-left corner has
//! travelled from that anchor. Leaving `Active` drops the anchor but not the
//! offset, which carries over to whoever reads it next.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::config::AnchorPolicy;
use crate::geom::{Point, Rect};

/// Whether a gesture is in progress, and where it is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    /// No gesture region exists.
    #[default]
    Idle,
    /// A gesture region exists.
    Active {
        /// Reference corner the current offset is measured from.
        anchor: Point,
    },
}

impl GesturePhase {
    /// The anchor, if a gesture is active.
    #[must_use]
    pub fn anchor(self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Active { anchor } => Some(anchor),
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Follow the region through the `Idle`/`Active` transitions.
    ///
    /// `Idle` becomes `Active` anchored at the region's origin. `Active` loses
    /// its anchor when the region disappears and otherwise keeps it.
    #[must_use]
    pub fn observe(self, region: Option<&Rect>) -> Self {
        match (self, region) {
            (_, None) => Self::Idle,
            (Self::Idle, Some(r)) => Self::Active { anchor: r.origin() },
            (active @ Self::Active { .. }, Some(_)) => active,
        }
    }

    /// Anchor at the region's origin regardless of the current phase.
    #[must_use]
    pub fn recapture(region: Option<&Rect>) -> Self {
        region.map_or(Self::Idle, |r| Self::Active { anchor: r.origin() })
    }

    /// Anchor for the next frame once this frame's offset has been applied.
    #[must_use]
    pub fn advance(self, region: &Rect, policy: AnchorPolicy) -> Self {
        match (self, policy) {
            (Self::Idle, _) => Self::Idle,
            (Self::Active { .. }, AnchorPolicy::RollForward) => Self::Active { anchor: region.origin() },
            (held @ Self::Active { .. }, AnchorPolicy::Hold) => held,
        }
    }
}

/// Drag offset for this frame: how far the region's origin has moved from
/// the anchor.
#[must_use]
pub fn frame_offset(anchor: Point, region: &Rect) -> Point {
    region.origin() - anchor
}

/// The offset after one application to a selected thing, with `factor` of
/// its own length leaked away.
#[must_use]
pub fn decay(offset: Point, factor: f64) -> Point {
    offset - offset * factor
}
