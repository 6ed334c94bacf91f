use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use traffic_viewer::config::{DEFAULT_ADVANCE_URL, DEFAULT_SNAPSHOT_URL};
use traffic_viewer::{Viewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "traffic-viewer", about = "Live window onto a traffic simulation service")]
struct Cli {
    /// Endpoint returning the current snapshot.
    #[arg(long, env = "TRAFFIC_SNAPSHOT_URL", default_value = DEFAULT_SNAPSHOT_URL)]
    snapshot_url: String,

    /// Endpoint that advances the simulation by one step.
    #[arg(long, env = "TRAFFIC_ADVANCE_URL", default_value = DEFAULT_ADVANCE_URL)]
    advance_url: String,

    #[arg(long, env = "TRAFFIC_POLL_INTERVAL_MS", default_value_t = 100)]
    poll_interval_ms: u64,

    #[arg(long, default_value_t = 1024)]
    width: usize,

    #[arg(long, default_value_t = 768)]
    height: usize,

    #[arg(long, default_value = "Traffic Viewer")]
    title: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = ViewerConfig::builder()
        .snapshot_url(cli.snapshot_url)
        .advance_url(cli.advance_url)
        .poll_interval(Duration::from_millis(cli.poll_interval_ms))
        .window_width(cli.width)
        .window_height(cli.height)
        .title(cli.title)
        .build();

    match Viewer::new(config).show() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "viewer failed");
            ExitCode::FAILURE
        }
    }
}
