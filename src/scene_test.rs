#![allow(clippy::float_cmp)]

use super::*;
use crate::bounds::Bounds;
use crate::model::{LaneSegment, TrafficSignal};

fn vehicle(x: f64, y: f64, width: f64, length: f64, color: &str) -> Vehicle {
    Vehicle {
        x,
        y,
        heading: 0.0,
        width,
        length,
        color: color.to_string(),
    }
}

fn signal(x: f64, y: f64, color: &str) -> TrafficSignal {
    TrafficSignal { x, y, color: color.to_string() }
}

fn crossing() -> Snapshot {
    Snapshot {
        lanes: vec![
            LaneSegment::new((0.0, 50.0), (100.0, 50.0), 6.0),
            LaneSegment::new((50.0, 0.0), (50.0, 100.0), 6.0),
        ],
        vehicles: vec![vehicle(50.0, 50.0, 4.0, 8.0, "blue")],
        signals: vec![signal(50.0, 50.0, "green")],
    }
}

fn fit(snapshot: &Snapshot, width: u32, height: u32) -> ViewportTransform {
    let bounds = Bounds::from_lanes(&snapshot.lanes).unwrap();
    ViewportTransform::fit(&bounds, width, height)
}

#[test]
fn layers_are_clear_lanes_vehicles_signals() {
    let snapshot = crossing();
    let scene = compose(&snapshot, &fit(&snapshot, 200, 200), &ViewerConfig::default());
    let commands = scene.commands();

    assert_eq!(commands.len(), 5);
    assert!(matches!(commands[0], DrawCommand::Clear(c) if c == Color::WHITE));
    assert!(matches!(commands[1], DrawCommand::Line { .. }));
    assert!(matches!(commands[2], DrawCommand::Line { .. }));
    assert!(matches!(commands[3], DrawCommand::Rect { color, .. } if color == Color::new(0, 0, 0xff)));
    assert!(matches!(commands[4], DrawCommand::Rect { color, .. } if color == Color::new(0, 0x80, 0)));
}

#[test]
fn signal_is_the_visible_top_layer() {
    let snapshot = crossing();
    let mut buf = vec![0; 200 * 200 * 4];
    let mut canvas = Canvas::new(&mut buf, 200, 200);
    compose(&snapshot, &fit(&snapshot, 200, 200), &ViewerConfig::default()).render(&mut canvas);

    // every layer covers (100, 100); only the signal may show there
    assert_eq!(canvas.pixel(100, 100), Some(Color::new(0, 0x80, 0)));
    // signal is 8x16 world = 16x32 px; vehicle 8x16 px; lane 12 px wide
    assert_eq!(canvas.pixel(100, 125), Some(Color::GRAY));
    assert_eq!(canvas.pixel(20, 100), Some(Color::GRAY));
    assert_eq!(canvas.pixel(20, 20), Some(Color::WHITE));
}

#[test]
fn vehicle_sits_above_lane() {
    let mut snapshot = crossing();
    snapshot.signals.clear();
    let mut buf = vec![0; 200 * 200 * 4];
    let mut canvas = Canvas::new(&mut buf, 200, 200);
    compose(&snapshot, &fit(&snapshot, 200, 200), &ViewerConfig::default()).render(&mut canvas);

    assert_eq!(canvas.pixel(100, 100), Some(Color::new(0, 0, 0xff)));
}

#[test]
fn horizontal_road_scenario() {
    let snapshot = Snapshot {
        lanes: vec![LaneSegment::new((0.0, 0.0), (100.0, 0.0), 2.0)],
        vehicles: vec![vehicle(50.0, 0.0, 1.0, 2.0, "red")],
        signals: vec![],
    };
    let scene = compose(&snapshot, &fit(&snapshot, 200, 100), &ViewerConfig::default());

    assert_eq!(
        scene.commands()[1],
        DrawCommand::Line {
            from: (0.0, 0.0),
            to: (200.0, 0.0),
            thickness: 4.0,
            color: Color::GRAY,
        }
    );
    match &scene.commands()[2] {
        DrawCommand::Rect { center, width, height, rotation, .. } => {
            assert_eq!(*center, (100.0, 0.0));
            assert_eq!((*width, *height), (2.0, 4.0));
            assert_eq!(*rotation, 0.0);
        }
        other => panic!("expected vehicle rect, got {other:?}"),
    }
}

#[test]
fn vehicle_heading_becomes_rotation() {
    let mut snapshot = crossing();
    snapshot.vehicles[0].heading = 1.25;
    let scene = compose(&snapshot, &fit(&snapshot, 200, 200), &ViewerConfig::default());
    assert!(matches!(scene.commands()[3], DrawCommand::Rect { rotation, .. } if rotation == 1.25));
}

#[test]
fn signals_are_sized_from_the_first_vehicle() {
    let mut snapshot = crossing();
    snapshot.vehicles.push(vehicle(10.0, 50.0, 100.0, 100.0, "red"));
    let transform = fit(&snapshot, 200, 200);
    let scene = compose(&snapshot, &transform, &ViewerConfig::default());

    let signal = scene.commands().last().unwrap();
    assert!(matches!(signal, DrawCommand::Rect { width, height, .. } if *width == 16.0 && *height == 32.0));
}

#[test]
fn signals_without_vehicles_use_reference_size() {
    let mut snapshot = crossing();
    snapshot.vehicles.clear();
    let config = ViewerConfig::builder().signal_reference_size(3.0).build();
    let scene = compose(&snapshot, &fit(&snapshot, 200, 200), &config);

    let signal = scene.commands().last().unwrap();
    assert!(matches!(signal, DrawCommand::Rect { width, height, .. } if *width == 12.0 && *height == 12.0));
}

#[test]
fn unknown_colors_use_the_fallback() {
    let mut snapshot = crossing();
    snapshot.vehicles[0].color = "sparkly".to_string();
    let config = ViewerConfig::builder().fallback_color(Color::new(1, 2, 3)).build();
    let scene = compose(&snapshot, &fit(&snapshot, 200, 200), &config);
    assert!(matches!(scene.commands()[3], DrawCommand::Rect { color, .. } if color == Color::new(1, 2, 3)));
}

#[test]
fn empty_snapshot_only_clears() {
    let config = ViewerConfig::builder().background_color(Color::BLACK).build();
    let scene = compose(&Snapshot::default(), &ViewportTransform::default(), &config);
    assert_eq!(scene.commands(), &[DrawCommand::Clear(Color::BLACK)]);
}
