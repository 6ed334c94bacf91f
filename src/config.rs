use std::time::Duration;

use bon::Builder;

use crate::color::Color;

pub const DEFAULT_SNAPSHOT_URL: &str = "http://localhost:5005/api/render-data";
pub const DEFAULT_ADVANCE_URL: &str = "http://localhost:5005/api/simulation/update";

#[derive(Debug, Clone, Builder)]
pub struct ViewerConfig {
    // Simulation service
    #[builder(default = DEFAULT_SNAPSHOT_URL.to_string(), into)]
    pub snapshot_url: String,
    #[builder(default = DEFAULT_ADVANCE_URL.to_string(), into)]
    pub advance_url: String,
    #[builder(default = Duration::from_millis(100))]
    pub poll_interval: Duration,
    #[builder(default = Duration::from_secs(2))]
    pub request_timeout: Duration,

    // Window configuration
    #[builder(default = "Traffic Viewer".to_string(), into)]
    pub title: String,
    #[builder(default = 1024)]
    pub window_width: usize,
    #[builder(default = 768)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Colors
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = Color::GRAY)]
    pub lane_color: Color,
    /// Used when a vehicle or signal color string cannot be resolved.
    #[builder(default = Color::BLACK)]
    pub fallback_color: Color,

    /// World-unit size a signal is derived from when no vehicle is present.
    #[builder(default = 1.0)]
    pub signal_reference_size: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
