/// Result alias carrying the crate error type
pub type Result<T> = std::result::Result<T, GardenError>;

/// Failures reported by the external audio collaborators.
///
/// Precondition violations (e.g. toggling play before the context is ready)
/// are deliberately not errors; they surface as status messages only.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    /// The audio asset is missing or corrupt. Terminal: playback controls
    /// become permanent no-ops.
    #[error("audio asset failed to load: {0}")]
    AssetLoad(String),

    /// The platform denied audio activation. Retryable on the next user
    /// attempt.
    #[error("audio context initialization failed: {0}")]
    AudioInit(String),
}
