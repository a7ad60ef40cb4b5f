//! Engine error type.
use thiserror::Error;

use crate::schedule::ScheduleError;

/// Errors surfaced by the career engine. Any failed operation leaves the
/// session exactly as it was before the call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller picked a choice index that does not exist, or one whose
    /// cost the player cannot pay.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// A turn could not be resolved; no state was committed.
    #[error("action failed: {0}")]
    ActionFailed(String),

    /// Loading or storing data through a platform collaborator failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    ScheduleGeneration(#[from] ScheduleError),
}
