//! The guided centering ritual that precedes a draw.
//!
//! Sub-phases run `check → breathe → intention → ready`, after which the
//! session moves on to the card spread. Every timed step is a
//! [`ScheduledAdvance`] identified by a [`TimerToken`]; only the most
//! recently scheduled token can fire, so a superseded or cancelled timer is
//! a harmless no-op rather than a stray transition.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::CenteringTimings;
use crate::error::{SessionError, SessionResult};

/// Sub-phase of the centering ritual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CenteringPhase {
    /// Asking how the user feels.
    Check,
    /// Guided breathing.
    Breathe,
    /// Setting an intention.
    Intention,
    /// Centered; the spread follows shortly.
    Ready,
}

impl CenteringPhase {
    /// Progress value reached on entering this phase.
    pub fn progress(self) -> f64 {
        match self {
            Self::Check => 0.0,
            Self::Breathe => 0.3,
            Self::Intention => 0.7,
            Self::Ready => 1.0,
        }
    }

    /// The guidance shown during this phase.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Check => "How are you feeling right now?",
            Self::Breathe => "Follow the gentle rhythm with your breath",
            Self::Intention => "Set your intention for this moment",
            Self::Ready => "You are centered and ready",
        }
    }
}

impl fmt::Display for CenteringPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Breathe => write!(f, "breathe"),
            Self::Intention => write!(f, "intention"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// User actions available inside the ritual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenteringAction {
    /// Start guided breathing.
    Begin,
    /// Leave breathing early.
    Skip,
    /// Decline the ritual.
    AlreadyCentered,
}

impl fmt::Display for CenteringAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => write!(f, "begin"),
            Self::Skip => write!(f, "skip"),
            Self::AlreadyCentered => write!(f, "declare already centered"),
        }
    }
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerToken(u64);

/// A pending auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    /// Token to present when the delay elapses.
    pub token: TimerToken,
    /// Phase the timer advances out of.
    pub from: CenteringPhase,
    /// How long to wait.
    pub delay: Duration,
}

/// Outcome of firing a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenteringStep {
    /// The token was cancelled or superseded; nothing changed.
    Stale,
    /// Moved to a new sub-phase.
    Entered(CenteringPhase),
    /// The ritual is finished and the spread should be shown.
    Complete,
}

/// State of one centering pass.
#[derive(Debug, Clone)]
pub struct Centering {
    phase: CenteringPhase,
    progress: f64,
    pending: Option<ScheduledAdvance>,
    next_token: u64,
    timings: CenteringTimings,
}

impl Centering {
    /// A fresh ritual in the `check` phase.
    pub fn new(timings: CenteringTimings) -> Self {
        Self {
            phase: CenteringPhase::Check,
            progress: 0.0,
            pending: None,
            next_token: 0,
            timings,
        }
    }

    /// Current sub-phase.
    pub fn phase(&self) -> CenteringPhase {
        self.phase
    }

    /// Progress in `[0, 1]`. Never decreases within a pass.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The timer that should currently be running, if any.
    pub fn pending(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    /// Start a new pass: back to `check` with zero progress.
    pub fn restart(&mut self) {
        self.cancel();
        self.phase = CenteringPhase::Check;
        self.progress = 0.0;
    }

    /// Return to `check` for another pass, keeping the progress reached.
    pub fn rewind(&mut self) {
        self.cancel();
        self.phase = CenteringPhase::Check;
    }

    /// Drop the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            tracing::debug!(token = timer.token.0, from = %timer.from, "centering timer cancelled");
        }
    }

    /// Raise progress to `value` (clamped to `[0, 1]`). Lower values and
    /// NaN are ignored. Returns the resulting progress.
    pub fn raise_progress(&mut self, value: f64) -> f64 {
        if !value.is_nan() {
            self.progress = self.progress.max(value.clamp(0.0, 1.0));
        }
        self.progress
    }

    /// Begin guided breathing from `check`.
    pub fn begin(&mut self) -> SessionResult<ScheduledAdvance> {
        self.require(CenteringAction::Begin, CenteringPhase::Check)?;
        Ok(self.enter(CenteringPhase::Breathe))
    }

    /// Leave breathing early. The ritual completes immediately.
    pub fn skip(&mut self) -> SessionResult<()> {
        self.require(CenteringAction::Skip, CenteringPhase::Breathe)?;
        self.finish();
        Ok(())
    }

    /// Decline the ritual from `check`. The ritual completes immediately.
    pub fn already_centered(&mut self) -> SessionResult<()> {
        self.require(CenteringAction::AlreadyCentered, CenteringPhase::Check)?;
        self.finish();
        Ok(())
    }

    /// Fire the timer identified by `token`.
    pub fn fire(&mut self, token: TimerToken) -> CenteringStep {
        let Some(timer) = self.pending.filter(|t| t.token == token) else {
            tracing::debug!(token = token.0, "stale centering timer ignored");
            return CenteringStep::Stale;
        };
        self.pending = None;
        match timer.from {
            CenteringPhase::Breathe => {
                self.enter(CenteringPhase::Intention);
                CenteringStep::Entered(CenteringPhase::Intention)
            }
            CenteringPhase::Intention => {
                self.enter(CenteringPhase::Ready);
                CenteringStep::Entered(CenteringPhase::Ready)
            }
            CenteringPhase::Ready | CenteringPhase::Check => CenteringStep::Complete,
        }
    }

    fn require(&self, action: CenteringAction, phase: CenteringPhase) -> SessionResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(SessionError::InvalidCenteringAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn enter(&mut self, phase: CenteringPhase) -> ScheduledAdvance {
        self.phase = phase;
        self.raise_progress(phase.progress());
        let delay = match phase {
            CenteringPhase::Breathe => self.timings.breathe(),
            CenteringPhase::Intention => self.timings.intention(),
            CenteringPhase::Check | CenteringPhase::Ready => self.timings.ready(),
        };
        self.schedule(phase, delay)
    }

    fn schedule(&mut self, from: CenteringPhase, delay: Duration) -> ScheduledAdvance {
        self.cancel();
        self.next_token += 1;
        let timer = ScheduledAdvance {
            token: TimerToken(self.next_token),
            from,
            delay,
        };
        tracing::debug!(token = self.next_token, %from, ?delay, "centering timer scheduled");
        self.pending = Some(timer);
        timer
    }

    fn finish(&mut self) {
        self.cancel();
        self.phase = CenteringPhase::Ready;
        self.raise_progress(1.0);
    }
}
