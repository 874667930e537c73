use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};

/// Identifier of a card, taken verbatim from the leading file-name token.
///
/// The original text is kept so that ids such as `"007"` survive untouched;
/// ordering uses the numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId {
    raw: String,
    value: u64,
}

impl CardId {
    /// Parse an id token. Only ASCII decimal digits are accepted.
    pub fn parse(raw: &str) -> CardResult<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::InvalidId(raw.to_string()));
        }
        let value = raw
            .parse::<u64>()
            .map_err(|_| CardError::InvalidId(raw.to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// The id exactly as it appeared in the file name.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric value used for catalog ordering.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for CardId {
    type Error = CardError;

    fn try_from(raw: String) -> CardResult<Self> {
        Self::parse(&raw)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.raw
    }
}

/// An upper-case category tag such as `POSITIVE_EMOTIONS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Build a category from a trailing run of capitals, e.g.
    /// `"IMPULSE CONTROL"`. Whitespace runs become single underscores.
    ///
    /// Returns `None` if the run contains nothing but whitespace, or any
    /// character other than `A-Z`, `&`, `_` and whitespace.
    pub fn from_caps_run(run: &str) -> Option<Self> {
        let valid = run
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '&' || c == '_' || c.is_whitespace());
        if !valid {
            return None;
        }
        let words: Vec<&str> = run.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        Some(Self(words.join("_")))
    }

    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The guided reading attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reflection {
    /// A short interpretation of the theme.
    pub meaning: String,
    /// Reflection questions, in reading order.
    pub questions: Vec<String>,
    /// Suggested actions, in reading order.
    pub actions: Vec<String>,
}

/// A single oracle card.
///
/// Cards are immutable once built. The theme is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    name: String,
    theme: String,
    category: Option<Category>,
    image_path: String,
    reflection: Option<Reflection>,
}

impl Card {
    /// Create a card without category or reflection.
    ///
    /// The name is derived as `<id>_<theme with whitespace as underscores>`.
    pub fn new(id: CardId, theme: &str, image_path: impl Into<String>) -> CardResult<Self> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(CardError::EmptyTheme(id.to_string()));
        }
        let name = slug(&id, theme);
        Ok(Self {
            id,
            name,
            theme: theme.to_string(),
            category: None,
            image_path: image_path.into(),
            reflection: None,
        })
    }

    /// Attach a category tag.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach reflective content.
    pub fn with_reflection(mut self, reflection: Reflection) -> Self {
        self.reflection = Some(reflection);
        self
    }

    /// The card id.
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Slug of the form `<id>_<theme_words>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable theme phrase.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Category tag, if the file name carried one.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Opaque reference to the card's image asset.
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Reflective content, if any was attached.
    pub fn reflection(&self) -> Option<&Reflection> {
        self.reflection.as_ref()
    }
}

/// Derive the `<id>_<theme_words>` slug used as a card name.
pub(crate) fn slug(id: &CardId, theme: &str) -> String {
    let words: Vec<&str> = theme.split_whitespace().collect();
    format!("{id}_{}", words.join("_"))
}
