//! Configuration for a card session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Storage key holding the persistent user identifier.
pub const DEFAULT_USER_ID_KEY: &str = "loveResilience_userId";

/// Delays between the timed centering sub-phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenteringTimings {
    /// Guided breathing, before the intention prompt.
    pub breathe_ms: u64,
    /// Intention prompt, before the ready message.
    pub intention_ms: u64,
    /// Ready message, before the card spread appears.
    pub ready_ms: u64,
}

impl Default for CenteringTimings {
    fn default() -> Self {
        Self {
            breathe_ms: 8_000,
            intention_ms: 3_000,
            ready_ms: 2_000,
        }
    }
}

impl CenteringTimings {
    /// Breathing duration.
    pub fn breathe(&self) -> Duration {
        Duration::from_millis(self.breathe_ms)
    }

    /// Intention duration.
    pub fn intention(&self) -> Duration {
        Duration::from_millis(self.intention_ms)
    }

    /// Delay after the ready message.
    pub fn ready(&self) -> Duration {
        Duration::from_millis(self.ready_ms)
    }
}

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for reproducible shuffles. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Centering sub-phase delays.
    pub timings: CenteringTimings,
    /// Storage key for the persistent user identifier.
    pub user_id_key: String,
    /// Length of a newly generated user identifier (4-32).
    pub user_id_len: usize,
    /// Number of shuffled cards offered in the selection spread.
    pub spread_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            timings: CenteringTimings::default(),
            user_id_key: DEFAULT_USER_ID_KEY.to_string(),
            user_id_len: 8,
            spread_size: 12,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the centering delays.
    pub fn with_timings(mut self, timings: CenteringTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the user identifier storage key.
    pub fn with_user_id_key(mut self, key: impl Into<String>) -> Self {
        self.user_id_key = key.into();
        self
    }

    /// Set the generated user identifier length (clamped to 4-32).
    pub fn with_user_id_len(mut self, len: usize) -> Self {
        self.user_id_len = len.clamp(4, 32);
        self
    }

    /// Set the spread size (at least 1).
    pub fn with_spread_size(mut self, size: usize) -> Self {
        self.spread_size = size.max(1);
        self
    }
}
