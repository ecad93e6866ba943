//! Multi-contact gesture engine for dragging a pool of on-screen objects.
//!
//! The engine tracks every pointer currently touching the surface, derives one
//! bounding gesture region from them, and turns the movement of that region
//! into a drag vector. Objects ("things") that overlap the region are selected
//! and nudged by the vector on every frame. The host is responsible only for
//! normalizing pointer coordinates, calling [`engine::Engine::tick`] once per
//! display refresh, and drawing the [`render::ThingView`]s it receives.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Frame loop: [`engine::EngineCore`] and the renderer-bound [`engine::Engine`] |
//! | [`world`] | Versioned world snapshot and the enumerated mutations that replace it |
//! | [`pointer`] | Live set of active contacts |
//! | [`region`] | Bounding gesture region over the active contacts |
//! | [`gesture`] | Gesture phase state machine and drag offset math |
//! | [`store`] | Thing model and the fixed-size object pool |
//! | [`geom`] | Points, rectangles and normalized-space helpers |
//! | [`render`] | Renderer seam and per-thing render views |
//! | [`config`] | Startup configuration |
//! | [`logging`] | Tracing subscriber installation |
//! | [`consts`] | Shared default constants |

pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod gesture;
pub mod logging;
pub mod pointer;
pub mod region;
pub mod render;
pub mod store;
pub mod world;
