// ============================================================================
// REFRESH LOOP CONTROLLER
// ============================================================================

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, error, info, trace, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::bounds::Bounds;
use crate::canvas::Canvas;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::fetch::spawn_feed;
use crate::model::Snapshot;
use crate::scene::{compose, Scene};
use crate::viewport::ViewportTransform;

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

/// Messages a feed sends to the viewer.
#[derive(Debug, Clone)]
pub enum ViewerCommand {
    /// A fetched snapshot, numbered by the cycle that requested it.
    Snapshot { cycle: u64, snapshot: Snapshot },
    Close,
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Window that keeps the latest simulation snapshot framed and on screen.
#[derive(Debug, Clone)]
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Poll the simulation service and display it until the window closes.
    ///
    /// # Errors
    ///
    /// Returns setup failures of the feed, the window, or the pixel surface.
    pub fn show(&self) -> Result<(), ViewerError> {
        let (sender, receiver) = mpsc::channel();
        let feed = spawn_feed(&self.config, sender)?;
        let result = self.run_window(receiver);
        feed.stop();
        result
    }

    /// Display snapshots from any other source.
    ///
    /// # Errors
    ///
    /// Returns setup failures of the window or the pixel surface.
    pub fn show_with_commands(&self, receiver: Receiver<ViewerCommand>) -> Result<(), ViewerError> {
        self.run_window(receiver)
    }

    fn run_window(&self, receiver: Receiver<ViewerCommand>) -> Result<(), ViewerError> {
        let config = &self.config;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(true)
            .build(&event_loop)?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        let mut state = ViewerState::new(size.width, size.height);
        info!(width = size.width, height = size.height, title = %config.title, "viewer window opened");

        let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("viewer window closed");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    let resized = if new_size.width > 0 && new_size.height > 0 {
                        pixels.resize_buffer(new_size.width, new_size.height)
                    } else {
                        Ok(())
                    };
                    if !resize_frame(&mut state, resized, new_size.width, new_size.height) {
                        return;
                    }
                    if new_size.width > 0 && new_size.height > 0 {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!(error = %err, "resizing surface failed");
                        }
                    }
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let (width, height) = state.surface_size();
                    if width == 0 || height == 0 {
                        return;
                    }
                    let mut canvas = Canvas::new(pixels.frame_mut(), width as usize, height as usize);
                    state.render_into(&mut canvas, config);
                    if let Err(err) = pixels.render() {
                        error!(error = %err, "presenting frame failed");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if !state.update_with_commands(&receiver) {
                    info!("feed requested close");
                    window_target.exit();
                    return;
                }
                let now = Instant::now();
                if state.needs_redraw() && now.duration_since(last_frame) >= frame_duration {
                    window.request_redraw();
                    last_frame = now;
                }
                window_target.set_control_flow(ControlFlow::WaitUntil(next_wake(
                    last_frame,
                    frame_duration,
                    now,
                )));
            }
            _ => {}
        })?;

        Ok(())
    }
}

/// Follow a pixel buffer resize. The canvas stride must match the buffer pixels
/// actually holds, so a refused resize leaves the state at its previous size.
fn resize_frame<E: std::fmt::Display>(
    state: &mut ViewerState,
    resized: Result<(), E>,
    width: u32,
    height: u32,
) -> bool {
    match resized {
        Ok(()) => {
            state.resize(width, height);
            true
        }
        Err(err) => {
            warn!(error = %err, width, height, "resizing pixel buffer failed, keeping previous size");
            false
        }
    }
}

/// When the event loop should next wake to poll the feed. Never in the past, so
/// an idle window sleeps a full frame instead of spinning.
fn next_wake(last_frame: Instant, frame_duration: Duration, now: Instant) -> Instant {
    let due = last_frame + frame_duration;
    if due > now {
        due
    } else {
        now + frame_duration
    }
}

// ============================================================================
// VIEWER STATE
// ============================================================================

/// Everything the window shows, owned by the event loop thread.
///
/// The snapshot is only ever replaced whole. The transform is refit when lane
/// geometry or the surface size changes and is otherwise reused.
#[derive(Debug)]
pub struct ViewerState {
    snapshot: Option<Snapshot>,
    cycle: Option<u64>,
    transform: Option<ViewportTransform>,
    surface: (u32, u32),
    dirty: bool,
}

impl ViewerState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            snapshot: None,
            cycle: None,
            transform: None,
            surface: (width, height),
            dirty: true,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn transform(&self) -> Option<&ViewportTransform> {
        self.transform.as_ref()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Replace the displayed snapshot. Results from cycles not newer than the
    /// current one are dropped, so a slow response cannot roll the view back.
    pub fn apply_snapshot(&mut self, cycle: u64, snapshot: Snapshot) -> bool {
        if self.cycle.is_some_and(|current| cycle <= current) {
            trace!(cycle, current = ?self.cycle, "dropping stale snapshot");
            return false;
        }
        let geometry_changed = self
            .snapshot
            .as_ref()
            .map_or(true, |current| !current.same_geometry(&snapshot));

        self.snapshot = Some(snapshot);
        self.cycle = Some(cycle);
        if geometry_changed || self.transform.is_none() {
            self.refit();
        }
        self.dirty = true;
        true
    }

    /// Surface dimensions changed; refit from the last known geometry.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface == (width, height) {
            return;
        }
        self.surface = (width, height);
        self.refit();
        self.dirty = true;
    }

    fn refit(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let (width, height) = self.surface;
        if width == 0 || height == 0 {
            return;
        }
        match Bounds::from_lanes(&snapshot.lanes) {
            Ok(bounds) => {
                let transform = ViewportTransform::fit(&bounds, width, height);
                debug!(scale = transform.scale, width, height, "viewport fitted");
                self.transform = Some(transform);
            }
            Err(err) => debug!(error = %err, "keeping previous viewport"),
        }
    }

    /// Drain pending feed messages without blocking. Returns `false` once the
    /// feed asks the viewer to close.
    pub fn update_with_commands(&mut self, receiver: &Receiver<ViewerCommand>) -> bool {
        loop {
            match receiver.try_recv() {
                Ok(ViewerCommand::Snapshot { cycle, snapshot }) => {
                    self.apply_snapshot(cycle, snapshot);
                }
                Ok(ViewerCommand::Close) => return false,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return true,
            }
        }
    }

    /// The frame for the current snapshot, once one has been framed.
    pub fn scene(&self, config: &ViewerConfig) -> Option<Scene> {
        let snapshot = self.snapshot.as_ref()?;
        let transform = self.transform.as_ref()?;
        Some(compose(snapshot, transform, config))
    }

    /// Redraw the whole surface. Before anything can be framed it shows only the
    /// background.
    pub fn render_into(&mut self, canvas: &mut Canvas, config: &ViewerConfig) {
        match self.scene(config) {
            Some(scene) => scene.render(canvas),
            None => canvas.clear(config.background_color),
        }
        self.dirty = false;
    }
}
