//! Renderer seam.
//!
//! The engine never draws anything itself. Once per frame it hands every
//! thing to a [`Renderer`] as a [`ThingView`], including things that did not
//! move, so the renderer stays in charge of pixel placement (for example after
//! a viewport resize). A renderer that needs a target (a canvas, a DOM
//! container) must claim it in [`Renderer::setup`] so a missing target stops
//! the engine at startup rather than on some later frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::geom::Point;
use crate::store::{Thing, ThingId};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render target unavailable: {0}")]
    TargetUnavailable(String),
}

/// Everything a renderer needs to place one thing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThingView {
    pub id: ThingId,
    /// Center in normalized space.
    pub position: Point,
    /// Radius in normalized units.
    pub radius: f64,
    pub selected: bool,
}

impl From<&Thing> for ThingView {
    fn from(thing: &Thing) -> Self {
        Self { id: thing.id, position: thing.position, radius: thing.radius, selected: thing.selected }
    }
}

/// Consumer of published frames.
pub trait Renderer {
    /// Called once with the initial layout before the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the renderer cannot reach its target.
    fn setup(&mut self, things: &[ThingView]) -> Result<(), RenderError> {
        for view in things {
            self.draw(view);
        }
        Ok(())
    }

    /// Place one thing.
    fn draw(&mut self, view: &ThingView);

    /// Called after every thing of a frame has been drawn.
    fn end_frame(&mut self) {}
}

/// Renderer that keeps the most recent frame in memory, for hosts that pull
/// frames instead of being called back.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: Vec<ThingView>,
    last_frame: Vec<ThingView>,
    frames: u64,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last completed frame.
    #[must_use]
    pub fn last_frame(&self) -> &[ThingView] {
        &self.last_frame
    }

    /// Number of completed frames.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn setup(&mut self, things: &[ThingView]) -> Result<(), RenderError> {
        self.last_frame = things.to_vec();
        Ok(())
    }

    fn draw(&mut self, view: &ThingView) {
        self.pending.push(*view);
    }

    fn end_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}

/// Serialize a frame for a renderer on the other side of a language bridge.
///
/// # Errors
///
/// Returns the serializer error if a coordinate cannot be represented in JSON.
pub fn frame_to_json(frame: &[ThingView]) -> Result<String, serde_json::Error> {
    serde_json::to_string(frame)
}
