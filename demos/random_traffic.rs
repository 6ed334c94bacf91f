use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use traffic_viewer::{LaneSegment, Snapshot, TrafficSignal, Vehicle, Viewer, ViewerCommand, ViewerConfig};

const CAR_COLORS: [&str; 5] = ["red", "blue", "orange", "purple", "#2a9d8f"];
const LIGHT_COLORS: [&str; 3] = ["green", "yellow", "red"];

/// A square grid of two-way streets, 100 world units per block.
fn grid(blocks: usize) -> Vec<LaneSegment> {
    let extent = blocks as f64 * 100.0;
    (0..=blocks)
        .flat_map(|i| {
            let at = i as f64 * 100.0;
            [
                LaneSegment::new((0.0, at), (extent, at), 6.0),
                LaneSegment::new((at, 0.0), (at, extent), 6.0),
            ]
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ViewerConfig::builder()
        .title("Random traffic")
        .window_width(800)
        .window_height(800)
        .build();
    let viewer = Viewer::new(config);

    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let mut rng = rand::rng();
        let lanes = grid(4);
        let mut vehicles: Vec<Vehicle> = (0..40)
            .map(|i| Vehicle {
                x: rng.random_range(0.0..400.0),
                y: f64::from(rng.random_range(0..=4) * 100),
                heading: std::f64::consts::FRAC_PI_2,
                width: 2.0,
                length: 4.5,
                color: CAR_COLORS[i % CAR_COLORS.len()].to_string(),
            })
            .collect();

        for cycle in 1.. {
            for vehicle in &mut vehicles {
                vehicle.x = (vehicle.x + rng.random_range(0.5..3.0)) % 400.0;
            }
            let phase = (cycle / 30) as usize % LIGHT_COLORS.len();
            let signals = (1..4)
                .flat_map(|i| (1..4).map(move |j| (i, j)))
                .map(|(i, j)| TrafficSignal {
                    x: f64::from(i * 100),
                    y: f64::from(j * 100),
                    color: LIGHT_COLORS[phase].to_string(),
                })
                .collect();

            let snapshot = Snapshot {
                lanes: lanes.clone(),
                vehicles: vehicles.clone(),
                signals,
            };
            if sender.send(ViewerCommand::Snapshot { cycle, snapshot }).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
    });

    println!("Displaying a 4x4 street grid with randomly moving cars");
    println!("Close the window to exit");

    viewer.show_with_commands(receiver)?;
    Ok(())
}
