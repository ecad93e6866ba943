//! End-to-end gesture scenarios driven through the public API.
#![allow(clippy::float_cmp)]

use multitouch::config::{AnchorPolicy, Config};
use multitouch::engine::{Engine, EngineCore};
use multitouch::geom::{Point, Rect};
use multitouch::pointer::PointerId;
use multitouch::render::{RecordingRenderer, frame_to_json};
use multitouch::store::{ObjectStore, Thing};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pool(positions: &[(f64, f64)]) -> ObjectStore {
    ObjectStore::from_things(positions.iter().map(|(x, y)| Thing::new(0, pt(*x, *y), 0.05, 0.5)).collect())
}

#[test]
fn single_finger_drag_scenario() {
    let mut core = EngineCore::with_store(Config::default(), pool(&[(0.1, 0.9)])).unwrap();

    core.on_contact_start(PointerId(1), pt(0.5, 0.5));
    assert_eq!(core.region(), Some(Rect::new(0.5, 0.5, 0.0, 0.0)));

    core.on_contact_move(PointerId(1), pt(0.6, 0.5));
    assert_eq!(core.region(), Some(Rect::new(0.6, 0.5, 0.0, 0.0)));

    core.tick();
    assert!(approx(core.offset().x, 0.1));
    assert!(approx(core.offset().y, 0.0));
}

#[test]
fn region_selects_only_covered_thing() {
    let mut core = EngineCore::with_store(Config::default(), pool(&[(0.0, 0.0), (0.5, 0.5), (0.9, 0.9)])).unwrap();
    core.on_contact_start(PointerId(1), pt(0.5, 0.5));
    let selected: Vec<usize> = core.store().things().iter().filter(|t| t.selected).map(|t| t.id).collect();
    assert_eq!(selected, vec![1]);
}

#[test]
fn contacts_ending_while_another_starts() {
    let mut core = EngineCore::with_store(Config::default(), pool(&[(0.5, 0.5)])).unwrap();
    core.on_contact_start(PointerId(1), pt(0.1, 0.1));
    core.on_contact_start(PointerId(2), pt(0.9, 0.9));
    core.tick();
    core.on_contact_end(PointerId(1));
    core.on_contact_start(PointerId(3), pt(0.4, 0.4));
    core.on_contact_end(PointerId(2));
    core.tick();
    assert_eq!(core.tracker().active_count(), 1);
    assert_eq!(core.store().len(), 1);
}

#[test]
fn pinch_region_drags_group() {
    let mut core =
        EngineCore::with_store(Config::default(), pool(&[(0.3, 0.3), (0.4, 0.4), (0.8, 0.8)])).unwrap();
    core.on_contact_start(PointerId(1), pt(0.25, 0.25));
    core.on_contact_start(PointerId(2), pt(0.45, 0.45));
    assert_eq!(core.store().selected_count(), 2);

    core.on_contact_move(PointerId(1), pt(0.35, 0.25));
    core.on_contact_move(PointerId(2), pt(0.55, 0.45));
    core.tick();

    let things = core.store().things();
    assert!(approx(things[0].position.x, 0.4));
    assert!(approx(things[1].position.x, 0.5));
    assert_eq!(things[2].position, pt(0.8, 0.8));
}

#[test]
fn stacked_things_drag_as_one() {
    let mut core = EngineCore::with_store(Config::default(), pool(&[(0.3, 0.3); 50])).unwrap();
    core.on_contact_start(PointerId(1), pt(0.3, 0.3));
    core.on_contact_move(PointerId(1), pt(0.4, 0.3));
    core.tick();

    let things = core.store().things();
    assert_eq!(core.store().selected_count(), 50);
    let first = things[0].position.x - 0.3;
    let last = things[49].position.x - 0.3;
    assert!(approx(first, 0.1));
    assert!(approx(last, first), "first dx={first} last dx={last}");
}

#[test]
fn hold_policy_via_json_config() {
    let config = Config::from_json(r#"{"anchor_policy": "hold", "pool_size": 0}"#).unwrap();
    assert_eq!(config.anchor_policy, AnchorPolicy::Hold);
    let mut core = EngineCore::with_store(config, pool(&[(0.2, 0.5)])).unwrap();
    core.on_contact_start(PointerId(1), pt(0.2, 0.5));
    core.on_contact_move(PointerId(1), pt(0.3, 0.5));
    for _ in 0..3 {
        core.tick();
    }
    assert!(approx(core.store().things()[0].position.x, 0.5));
}

#[test]
fn engine_frames_serialize_for_host() {
    let core = EngineCore::with_store(Config::default(), pool(&[(0.5, 0.5), (0.2, 0.2)])).unwrap();
    let mut engine = Engine::from_core(core, RecordingRenderer::new()).unwrap();
    engine.on_contact_start(PointerId(1), pt(0.5, 0.5));
    engine.tick();
    let json = frame_to_json(engine.renderer().last_frame()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert_eq!(value[0]["selected"], true);
    assert_eq!(value[1]["selected"], false);
}
