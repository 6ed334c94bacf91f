#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn random_lanes(rng: &mut StdRng) -> Vec<LaneSegment> {
    let count = rng.random_range(1..40);
    (0..count)
        .map(|_| {
            LaneSegment::new(
                (rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)),
                (rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)),
                rng.random_range(0.5..5.0),
            )
        })
        .collect()
}

fn endpoints(lanes: &[LaneSegment]) -> impl Iterator<Item = (f64, f64)> + '_ {
    lanes
        .iter()
        .flat_map(|l| [(l.start_x, l.start_y), (l.end_x, l.end_y)])
}

#[test]
fn empty_lanes_is_an_error() {
    assert_eq!(Bounds::from_lanes(&[]), Err(GeometryError::Empty));
}

#[test]
fn single_lane_spans_its_endpoints() {
    let lanes = [LaneSegment::new((10.0, 40.0), (-5.0, 20.0), 2.0)];
    let b = Bounds::from_lanes(&lanes).unwrap();
    assert_eq!(b, Bounds { min_x: -5.0, min_y: 20.0, max_x: 10.0, max_y: 40.0 });
    assert_eq!(b.width(), 15.0);
    assert_eq!(b.height(), 20.0);
}

#[test]
fn horizontal_lane_is_degenerate_on_y() {
    let lanes = [LaneSegment::new((0.0, 0.0), (100.0, 0.0), 2.0)];
    let b = Bounds::from_lanes(&lanes).unwrap();
    assert_eq!(b.width(), 100.0);
    assert_eq!(b.height(), 0.0);
}

#[test]
fn lane_width_does_not_widen_the_box() {
    let lanes = [LaneSegment::new((0.0, 0.0), (0.0, 10.0), 50.0)];
    let b = Bounds::from_lanes(&lanes).unwrap();
    assert_eq!(b.width(), 0.0);
}

#[test]
fn random_lane_sets_are_contained_and_tight() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let lanes = random_lanes(&mut rng);
        let b = Bounds::from_lanes(&lanes).unwrap();

        assert!(endpoints(&lanes).all(|(x, y)| b.contains(x, y)));
        assert!(endpoints(&lanes).any(|(x, _)| x == b.min_x));
        assert!(endpoints(&lanes).any(|(x, _)| x == b.max_x));
        assert!(endpoints(&lanes).any(|(_, y)| y == b.min_y));
        assert!(endpoints(&lanes).any(|(_, y)| y == b.max_y));
    }
}
