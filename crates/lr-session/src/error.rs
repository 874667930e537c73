//! Error types for the session engine.

use thiserror::Error;

use crate::centering::{CenteringAction, CenteringPhase};
use crate::state::AppState;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An action needs the card catalog, which has not been loaded yet.
    #[error("card catalog not loaded")]
    CatalogNotLoaded,

    /// The requested navigation is not allowed from the current state.
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        /// State the session was in.
        from: AppState,
        /// Requested target state.
        to: AppState,
    },

    /// The card is not part of the loaded catalog.
    #[error("unknown card: {0}")]
    UnknownCard(String),

    /// A centering action was attempted outside the centering state.
    #[error("not centering (current state: {0})")]
    NotCentering(AppState),

    /// A centering action does not apply to the current sub-phase.
    #[error("cannot {action} during the {phase} phase")]
    InvalidCenteringAction {
        /// The attempted action.
        action: CenteringAction,
        /// The sub-phase the centering ritual was in.
        phase: CenteringPhase,
    },

    /// The key-value store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored data could not be encoded or decoded.
    #[error("invalid stored data: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure in a file-backed capability.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The card catalog could not be loaded.
    #[error(transparent)]
    Card(#[from] lr_cards::CardError),
}
