use thiserror::Error;

/// Lookup and structural errors for the node tree.
///
/// These are the only errors surfaced to callers as hard failures; everything
/// platform-side is reported by return value and logged so the frame loop
/// stays alive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no node found at path `{0}`")]
    NotFound(String),
    #[error("node at `{path}` is not a `{expected}`")]
    WrongType {
        path: String,
        expected: &'static str,
    },
    #[error("reparenting `{0}` under itself or one of its descendants would create a cycle")]
    WouldCycle(String),
    #[error("node is no longer in the tree")]
    Stale,
}

/// Platform-boundary failures.
///
/// Never propagated across the platform boundary as a panic; call sites
/// translate these into `false`/`None` and keep running.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("window creation failed: {0}")]
    CreateFailed(String),
    #[error("graphics initialization failed: {0}")]
    GraphicsFailed(String),
    #[error("event loop unavailable: {0}")]
    EventLoop(String),
}
