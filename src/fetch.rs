//! Snapshot fetcher and the background feed that drives it.
//!
//! DESIGN
//! ======
//! The feed owns a dedicated thread running a current-thread tokio runtime, so
//! all network work is cooperatively scheduled on one thread and never touches
//! viewer state directly. Each tick spawns an advance request and then a
//! snapshot request; results are numbered by cycle and sent to the viewer,
//! which keeps only the newest. Ticks may overlap when the service is slow.
//!
//! ERROR HANDLING
//! ==============
//! A failed advance or fetch is logged and the cycle is dropped. The viewer keeps
//! showing its previous snapshot; the next tick is the retry.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::config::ViewerConfig;
use crate::error::{FetchError, ViewerError};
use crate::model::Snapshot;
use crate::viewer::ViewerCommand;

/// `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// HTTP client for the simulation service's two endpoints.
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    client: reqwest::Client,
    snapshot_url: String,
    advance_url: String,
}

impl SnapshotFetcher {
    /// # Errors
    ///
    /// Returns the client builder error if the TLS backend cannot be initialised.
    pub fn new(config: &ViewerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            snapshot_url: config.snapshot_url.clone(),
            advance_url: config.advance_url.clone(),
        })
    }

    /// Ask the service to step the simulation once. The response body is only logged.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`] or [`FetchError::Status`].
    pub async fn advance(&self) -> Result<(), FetchError> {
        let resp = self.client.post(&self.advance_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: self.advance_url.clone(), status });
        }
        let body = resp.text().await?;
        debug!(%body, "simulation advanced");
        Ok(())
    }

    /// Download and decode the current snapshot.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`], [`FetchError::Status`], or [`FetchError::Parse`]
    /// when the payload is not snapshot-shaped.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let resp = self.client.get(&self.snapshot_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: self.snapshot_url.clone(), status });
        }
        let body = resp.text().await?;
        Ok(Snapshot::from_json(&body)?)
    }
}

/// Fetch one snapshot and hand it to the viewer.
///
/// Returns `false` only when the viewer has hung up; a failed fetch still counts
/// as delivered so the feed keeps ticking.
pub async fn run_cycle(fetcher: &SnapshotFetcher, cycle: u64, sender: &Sender<ViewerCommand>) -> bool {
    match fetcher.fetch_snapshot().await {
        Ok(snapshot) => {
            trace!(
                cycle,
                lanes = snapshot.lanes.len(),
                vehicles = snapshot.vehicles.len(),
                signals = snapshot.signals.len(),
                "snapshot fetched"
            );
            sender.send(ViewerCommand::Snapshot { cycle, snapshot }).is_ok()
        }
        Err(err) => {
            warn!(cycle, error = %err, "snapshot fetch failed, keeping previous frame");
            true
        }
    }
}

/// Tick until `shutdown` flips or the viewer hangs up.
///
/// Outstanding requests are aborted on exit.
pub async fn run_feed(
    fetcher: Arc<SnapshotFetcher>,
    period: Duration,
    sender: Sender<ViewerCommand>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tasks: JoinSet<bool> = JoinSet::new();
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                cycle += 1;
                let advancer = Arc::clone(&fetcher);
                tasks.spawn(async move {
                    if let Err(err) = advancer.advance().await {
                        warn!(cycle, error = %err, "simulation advance failed");
                    }
                    true
                });
                let fetcher = Arc::clone(&fetcher);
                let sender = sender.clone();
                tasks.spawn(async move { run_cycle(&fetcher, cycle, &sender).await });
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if matches!(joined, Ok(false)) {
                    debug!(cycle, "viewer hung up");
                    break;
                }
            }
        }
    }

    tasks.abort_all();
    info!(cycles = cycle, "snapshot feed stopped");
}

/// Owns the feed thread. Stopping (or dropping) it cancels in-flight requests.
pub struct FeedHandle {
    shutdown: watch::Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("snapshot feed thread panicked");
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}

/// Start polling the simulation service on its own thread.
///
/// # Errors
///
/// Fails if the HTTP client, the runtime, or the thread cannot be created.
pub fn spawn_feed(config: &ViewerConfig, sender: Sender<ViewerCommand>) -> Result<FeedHandle, ViewerError> {
    let fetcher = Arc::new(SnapshotFetcher::new(config)?);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (shutdown, shutdown_rx) = watch::channel(false);
    let period = config.poll_interval;

    info!(
        snapshot_url = %config.snapshot_url,
        advance_url = %config.advance_url,
        poll_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
        "starting snapshot feed"
    );
    let thread = std::thread::Builder::new()
        .name("snapshot-feed".to_string())
        .spawn(move || runtime.block_on(run_feed(fetcher, period, sender, shutdown_rx)))?;

    Ok(FeedHandle { shutdown, thread: Some(thread) })
}
