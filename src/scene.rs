// ============================================================================
// SCENE RENDERER
// ============================================================================
//
// A frame is composed as a retained list of draw commands, then replayed onto
// the canvas. Layer order is fixed: clear, lanes, vehicles, signals.

use tracing::debug;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::ViewerConfig;
use crate::model::{Snapshot, Vehicle};
use crate::viewport::ViewportTransform;

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

/// Signals are this many reference vehicles wide and long.
const SIGNAL_SIZE_FACTOR: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        from: (f64, f64),
        to: (f64, f64),
        thickness: f64,
        color: Color,
    },
    Rect {
        center: (f64, f64),
        width: f64,
        height: f64,
        rotation: f64,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => canvas.stroke_line(*from, *to, *thickness, *color),
                DrawCommand::Rect {
                    center,
                    width,
                    height,
                    rotation,
                    color,
                } => canvas.fill_rotated_rect(*center, *width, *height, *rotation, *color),
            }
        }
    }
}

/// Build the full frame for `snapshot` as seen through `transform`.
pub fn compose(snapshot: &Snapshot, transform: &ViewportTransform, config: &ViewerConfig) -> Scene {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color));

    for lane in &snapshot.lanes {
        scene.add_command(DrawCommand::Line {
            from: transform.apply(lane.start_x, lane.start_y),
            to: transform.apply(lane.end_x, lane.end_y),
            thickness: transform.length(lane.width),
            color: config.lane_color,
        });
    }

    for vehicle in &snapshot.vehicles {
        scene.add_command(DrawCommand::Rect {
            center: transform.apply(vehicle.x, vehicle.y),
            width: transform.length(vehicle.width),
            height: transform.length(vehicle.length),
            rotation: vehicle.heading,
            color: resolve_color(&vehicle.color, config.fallback_color),
        });
    }

    let (ref_width, ref_length) = signal_reference(snapshot.vehicles.first(), config.signal_reference_size);
    for signal in &snapshot.signals {
        scene.add_command(DrawCommand::Rect {
            center: transform.apply(signal.x, signal.y),
            width: transform.length(ref_width * SIGNAL_SIZE_FACTOR),
            height: transform.length(ref_length * SIGNAL_SIZE_FACTOR),
            rotation: 0.0,
            color: resolve_color(&signal.color, config.fallback_color),
        });
    }

    scene
}

/// World-unit width and length a signal is sized from.
fn signal_reference(first: Option<&Vehicle>, fallback: f64) -> (f64, f64) {
    let usable = |v: f64| if v > 0.0 && v.is_finite() { v } else { fallback };
    match first {
        Some(vehicle) => (usable(vehicle.width), usable(vehicle.length)),
        None => (fallback, fallback),
    }
}

fn resolve_color(value: &str, fallback: Color) -> Color {
    Color::parse(value).unwrap_or_else(|| {
        debug!(color = value, "unknown color, using fallback");
        fallback
    })
}
