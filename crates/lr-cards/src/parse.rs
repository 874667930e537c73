//! Card file-name parser.
//!
//! Grammar: `<digits>_<word>(_<word>)*.jpg`. Words are joined with spaces to
//! form the theme. A trailing run of all-caps words (letters, whitespace and
//! `&`) preceded by at least one other word is split off as the category.
//!
//! The category split is a heuristic: a theme that ends in an all-caps word,
//! such as `5_HOPE_AND_LOVE.jpg`, is read as theme `HOPE` with category
//! `AND_LOVE`.

use std::sync::LazyLock;

use regex::Regex;

use crate::card::{Card, CardId, Category, slug};
use crate::content::default_reflection;
use crate::error::{CardError, CardResult};

static TRAILING_CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s+([A-Z\s&]+)$").unwrap_or_else(|e| unreachable!("static regex: {e}"))
});

/// The structured parts of a card file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Leading numeric token.
    pub id: CardId,
    /// `<id>_<theme_words>` slug.
    pub name: String,
    /// Theme phrase with the category removed.
    pub theme: String,
    /// Trailing all-caps category, if present.
    pub category: Option<Category>,
}

impl ParsedName {
    /// Turn the parsed name into a card with the default reflection.
    pub fn into_card(self, image_path: impl Into<String>) -> CardResult<Card> {
        let reflection = default_reflection(&self.theme);
        let card = Card::new(self.id, &self.theme, image_path)?.with_reflection(reflection);
        Ok(match self.category {
            Some(category) => card.with_category(category),
            None => card,
        })
    }
}

/// Parse a card asset file name (or path) into its parts.
///
/// Leading directories (`/` or `\` separated) are ignored and a `.jpg`
/// extension is stripped.
pub fn parse_file_name(file_name: &str) -> CardResult<ParsedName> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = base.strip_suffix(".jpg").unwrap_or(base);

    let mut tokens = stem.split('_');
    let id_token = tokens.next().unwrap_or_default();
    let id = CardId::parse(id_token).map_err(|_| CardError::InvalidFileName(base.to_string()))?;

    let candidate = tokens.collect::<Vec<_>>().join(" ");
    let (theme, category) = split_category(&candidate);
    if theme.is_empty() {
        return Err(CardError::EmptyTheme(id.to_string()));
    }

    Ok(ParsedName {
        name: slug(&id, &theme),
        id,
        theme,
        category,
    })
}

fn split_category(candidate: &str) -> (String, Option<Category>) {
    if let Some(caps) = TRAILING_CATEGORY.captures(candidate) {
        let lead = caps.get(1).map_or("", |m| m.as_str()).trim();
        let tail = caps.get(2).map_or("", |m| m.as_str());
        if let Some(category) = Category::from_caps_run(tail) {
            return (lead.to_string(), Some(category));
        }
        return (lead.to_string(), None);
    }
    (candidate.trim().to_string(), None)
}
