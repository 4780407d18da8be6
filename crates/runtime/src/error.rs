use emberveil_core::SceneId;

/// Errors surfaced by the runtime orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no scene named '{0}' is available")]
    SceneNotFound(SceneId),

    #[error("no scene load is in flight")]
    NoLoadInFlight,

    #[error("failed to load content: {0}")]
    ContentLoad(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
