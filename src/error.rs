//! Error types. Only [`ViewerError`] ever reaches the caller of the viewer; fetch
//! failures are logged at the feed boundary and geometry errors are guarded
//! by the refresh loop.

/// One failed snapshot or advance request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("simulation service unreachable: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("malformed snapshot payload: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("no lane geometry to frame")]
    Empty,
}

/// Setup failures of the window, the surface, or the feed runtime.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Os(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("feed runtime error: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
