// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Live view of a traffic simulation.
//!
//! A background feed polls the simulation service for snapshots (and asks it to
//! advance one step per poll); the window fits all lane geometry into view and
//! redraws lanes, vehicles, and signals whenever the snapshot or window size
//! changes.
//!
//! ```no_run
//! use traffic_viewer::{Viewer, ViewerConfig};
//!
//! let config = ViewerConfig::builder()
//!     .snapshot_url("http://localhost:5005/api/render-data")
//!     .build();
//! Viewer::new(config).show().unwrap();
//! ```

pub mod bounds;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod scene;
pub mod viewer;
pub mod viewport;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use bounds::Bounds;
pub use canvas::Canvas;
pub use color::Color;
pub use config::ViewerConfig;
pub use error::{FetchError, GeometryError, ViewerError};
pub use fetch::{spawn_feed, FeedHandle, SnapshotFetcher};
pub use model::{LaneSegment, Snapshot, TrafficSignal, Vehicle};
pub use scene::{compose, DrawCommand, Scene};
pub use viewer::{Viewer, ViewerCommand, ViewerState};
pub use viewport::ViewportTransform;
