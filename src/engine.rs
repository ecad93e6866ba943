use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::{Config, ConfigError, SelectionPolicy};
use crate::geom::{Point, Rect};
use crate::gesture::{self, GesturePhase};
use crate::pointer::{PointerId, PointerTracker};
use crate::region::gesture_region;
use crate::render::{RenderError, Renderer, ThingView};
use crate::store::{ObjectStore, ThingId};
use crate::world::{Mutation, World, WorldState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("renderer setup failed: {0}")]
    Render(#[from] RenderError),
}

/// Core engine state: contacts, the world snapshot and the frame step.
///
/// Separated from `Engine` so it can be tested without a renderer.
#[derive(Debug)]
pub struct EngineCore {
    config: Config,
    tracker: PointerTracker,
    world: World,
}

impl EngineCore {
    /// Validate `config` and create a pool laid out from its seed (or from
    /// fresh entropy when no seed is set).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let store = ObjectStore::create_pool(config.pool_size, config.thing_radius, &mut rng);
        Self::with_store(config, store)
    }

    /// Validate `config` and adopt an explicit pool. `config.pool_size` is
    /// ignored in favor of the pool's own size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is invalid.
    pub fn with_store(config: Config, store: ObjectStore) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            pool_size = store.len(),
            min_contacts = config.min_contacts,
            offset_decay = config.offset_decay,
            anchor_policy = ?config.anchor_policy,
            selection_policy = ?config.selection_policy,
            "gesture engine ready"
        );
        let mut world = World::new();
        world.commit(Mutation::Pool(store));
        Ok(Self { config, tracker: PointerTracker::new(), world })
    }

    // --- Input callbacks ---

    /// A contact touched down. Re-anchors the gesture and re-evaluates
    /// selection.
    pub fn on_contact_start(&mut self, id: PointerId, position: Point) {
        if !self.tracker.on_contact_start(id, position) {
            return;
        }
        debug!(%id, x = position.x, y = position.y, active = self.tracker.active_count(), "contact start");
        let region = self.current_region();
        self.commit_contact(region, GesturePhase::recapture(region.as_ref()), true);
    }

    /// A contact moved. Updates the region; selection is re-evaluated only
    /// under [`SelectionPolicy::RegionChange`], or if the id was unknown and
    /// therefore joined the gesture.
    pub fn on_contact_move(&mut self, id: PointerId, position: Point) {
        let before = self.tracker.active_count();
        if !self.tracker.on_contact_move(id, position) {
            return;
        }
        let joined = self.tracker.active_count() != before;
        if joined {
            debug!(%id, x = position.x, y = position.y, "move from unknown contact, tracking it");
        }
        let region = self.current_region();
        let phase = if joined {
            GesturePhase::recapture(region.as_ref())
        } else {
            self.world.current().phase().observe(region.as_ref())
        };
        let reselect = joined || self.config.selection_policy == SelectionPolicy::RegionChange;
        self.commit_contact(region, phase, reselect);
    }

    /// A contact lifted. Unknown ids are ignored.
    pub fn on_contact_end(&mut self, id: PointerId) {
        if !self.tracker.on_contact_end(id) {
            return;
        }
        debug!(%id, active = self.tracker.active_count(), "contact end");
        let region = self.current_region();
        let phase = self.world.current().phase().observe(region.as_ref());
        self.commit_contact(region, phase, true);
    }

    // --- Frame ---

    /// Advance one frame and return the view of every thing.
    ///
    /// While a gesture is active the region's movement since the anchor is
    /// applied to the selected things, then the anchor moves according to the
    /// anchor policy. While idle nothing moves, but every thing is still
    /// returned.
    pub fn tick(&mut self) -> Vec<ThingView> {
        let region = self.current_region();
        let state = self.world.current();
        let phase = state.phase().observe(region.as_ref());
        let mutation = match (region, phase.anchor()) {
            (Some(region), Some(anchor)) => {
                let offset = gesture::frame_offset(anchor, &region);
                let applied = state.store().apply_offset(offset, self.config.offset_decay);
                trace!(dx = offset.x, dy = offset.y, moved = applied.moved, "active frame");
                Mutation::Frame {
                    region: Some(region),
                    phase: phase.advance(&region, self.config.anchor_policy),
                    store: applied.store,
                    offset: applied.offset,
                }
            }
            _ => Mutation::Frame { region: None, phase, store: state.store().clone(), offset: state.offset() },
        };
        self.world.commit(mutation);
        self.views()
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// The current world version.
    #[must_use]
    pub fn state(&self) -> &WorldState {
        self.world.current()
    }

    /// A handle on the current world version that later updates leave alone.
    #[must_use]
    pub fn snapshot(&self) -> Rc<WorldState> {
        self.world.snapshot()
    }

    #[must_use]
    pub fn region(&self) -> Option<Rect> {
        self.state().region()
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.state().anchor()
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.state().offset()
    }

    #[must_use]
    pub fn store(&self) -> &ObjectStore {
        self.state().store()
    }

    /// Ids of things under a single contact position.
    #[must_use]
    pub fn things_at(&self, position: Point) -> Vec<ThingId> {
        self.store().things_at(position)
    }

    /// Distance from the middle of the gesture region to `position`, or
    /// `None` when no gesture is in progress.
    #[must_use]
    pub fn distance_from_region_center(&self, position: Point) -> Option<f64> {
        self.region().map(|r| r.distance_from_center(position))
    }

    /// Distance of one held contact from the middle of the gesture region.
    #[must_use]
    pub fn contact_distance_from_center(&self, id: PointerId) -> Option<f64> {
        self.distance_from_region_center(self.tracker.position(id)?)
    }

    /// Render views of every thing in the current version.
    #[must_use]
    pub fn views(&self) -> Vec<ThingView> {
        self.store().things().iter().map(ThingView::from).collect()
    }

    fn current_region(&self) -> Option<Rect> {
        gesture_region(&self.tracker, self.config.min_contacts)
    }

    fn commit_contact(&mut self, region: Option<Rect>, phase: GesturePhase, reselect: bool) {
        let state = self.world.current();
        let was_active = state.phase().is_active();
        let store = if reselect || region.is_none() {
            state.store().recompute_selection(region.as_ref())
        } else {
            state.store().clone()
        };
        let next = self.world.commit(Mutation::Contact { region, phase, store });
        match (was_active, next.phase().is_active()) {
            (false, true) => debug!(selected = next.store().selected_count(), "gesture started"),
            (true, false) => debug!(offset_x = next.offset().x, offset_y = next.offset().y, "gesture ended"),
            _ => {}
        }
    }
}

/// The full engine: an `EngineCore` publishing to a renderer.
pub struct Engine<R: Renderer> {
    renderer: R,
    pub core: EngineCore,
}

impl<R: Renderer> Engine<R> {
    /// Build the core from `config` and hand the initial layout to `renderer`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the renderer cannot set up.
    pub fn new(config: Config, renderer: R) -> Result<Self, EngineError> {
        Self::from_core(EngineCore::new(config)?, renderer)
    }

    /// Attach an existing core to `renderer`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Render`] if the renderer cannot set up.
    pub fn from_core(core: EngineCore, mut renderer: R) -> Result<Self, EngineError> {
        renderer.setup(&core.views())?;
        Ok(Self { renderer, core })
    }

    // --- Delegated input callbacks ---

    pub fn on_contact_start(&mut self, id: PointerId, position: Point) {
        self.core.on_contact_start(id, position);
    }

    pub fn on_contact_move(&mut self, id: PointerId, position: Point) {
        self.core.on_contact_move(id, position);
    }

    pub fn on_contact_end(&mut self, id: PointerId) {
        self.core.on_contact_end(id);
    }

    // --- Frame ---

    /// Advance one frame and publish every thing to the renderer.
    pub fn tick(&mut self) {
        for view in self.core.tick() {
            self.renderer.draw(&view);
        }
        self.renderer.end_frame();
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
