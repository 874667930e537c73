//! Session engine for Love Resilience.
//!
//! A session walks a small state machine: the welcome screen, an optional
//! guided centering ritual, a shuffled spread to draw from, a reading of the
//! drawn card, and a deterministic card of the day. [`SessionStore`] holds
//! all of it and exposes synchronous actions; [`SessionRuntime`] wraps a store
//! and turns the centering ritual's timed advances into Tokio tasks.

/// Guided centering sub-phases and their timers.
pub mod centering;
/// Date sources for the daily card.
pub mod clock;
/// Session configuration.
pub mod config;
/// Deterministic card-of-the-day selection.
pub mod daily;
/// Error types used throughout the crate.
pub mod error;
/// Persistent user identifier.
pub mod identity;
/// Reading progression for a shown card.
pub mod reading;
/// Async session owner that drives centering timers.
pub mod runtime;
/// Uniform shuffling.
pub mod shuffle;
/// Top-level application states and allowed transitions.
pub mod state;
/// The session store.
pub mod store;

/// Re-export centering types.
pub use centering::{CenteringAction, CenteringPhase, ScheduledAdvance, TimerToken};
/// Re-export clocks.
pub use clock::{Clock, FixedClock, LocalClock};
/// Re-export configuration types.
pub use config::{CenteringTimings, DEFAULT_USER_ID_KEY, SessionConfig};
/// Re-export daily selection.
pub use daily::select_daily;
/// Re-export error types.
pub use error::{SessionError, SessionResult};
/// Re-export identity stores.
pub use identity::{FALLBACK_USER_ID, JsonFileStore, KeyValueStore, MemoryStore};
/// Re-export the reading progression.
pub use reading::ReadingSection;
/// Re-export the session runtime.
pub use runtime::SessionRuntime;
/// Re-export the shuffle.
pub use shuffle::shuffle;
/// Re-export application states.
pub use state::AppState;
/// Re-export the store.
pub use store::{SessionSnapshot, SessionStore};
