//! Step-by-step reading of a drawn card.

use serde::Serialize;

/// Section of a card reading, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSection {
    /// The card's meaning.
    #[default]
    Meaning,
    /// Reflection questions.
    Questions,
    /// Inspired actions.
    Actions,
}

impl ReadingSection {
    /// The following section, or `None` after the last one.
    pub fn following(self) -> Option<Self> {
        match self {
            Self::Meaning => Some(Self::Questions),
            Self::Questions => Some(Self::Actions),
            Self::Actions => None,
        }
    }

    /// Heading for the section.
    pub fn title(self) -> &'static str {
        match self {
            Self::Meaning => "Meaning",
            Self::Questions => "Reflection Questions",
            Self::Actions => "Inspired Actions",
        }
    }
}
