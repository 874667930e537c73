//! Top-level navigation states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The screen-level state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    /// Landing screen. Initial state and target of every reset.
    #[default]
    Welcome,
    /// The centering ritual before a draw.
    Centering,
    /// Choosing a card from the shuffled spread.
    Selection,
    /// Reading a drawn card.
    Viewing,
    /// Reading the card of the day.
    Daily,
}

impl AppState {
    /// Whether the state shows a card and so needs one selected.
    pub fn needs_card(self) -> bool {
        matches!(self, Self::Viewing | Self::Daily)
    }

    /// Whether navigation from `self` to `to` is allowed.
    ///
    /// Returning to `Welcome` is always allowed (it is a reset). Staying in
    /// the same state is allowed.
    pub fn can_transition_to(self, to: Self) -> bool {
        use AppState::*;
        if self == to || to == Welcome {
            return true;
        }
        matches!(
            (self, to),
            (Welcome, Daily)
                | (Welcome, Centering)
                | (Welcome, Selection)
                | (Centering, Selection)
                | (Selection, Viewing)
                | (Viewing, Selection)
                | (Daily, Viewing)
                | (Daily, Centering)
        )
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => write!(f, "welcome"),
            Self::Centering => write!(f, "centering"),
            Self::Selection => write!(f, "selection"),
            Self::Viewing => write!(f, "viewing"),
            Self::Daily => write!(f, "daily"),
        }
    }
}
