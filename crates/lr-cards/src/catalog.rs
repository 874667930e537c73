use std::collections::HashSet;

use serde::Serialize;

use crate::card::Card;
use crate::error::CardResult;
use crate::parse::parse_file_name;
use crate::source::{AssetListing, AssetSource};

/// The full card collection plus the shared back and cover assets.
///
/// Cards are ordered ascending by the numeric value of their id. A catalog
/// never changes after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardCatalog {
    cards: Vec<Card>,
    backside: String,
    cover: String,
}

impl CardCatalog {
    /// Build a catalog from already-constructed cards.
    ///
    /// Cards are sorted by id value; equal ids keep their relative order.
    pub fn new(mut cards: Vec<Card>, backside: impl Into<String>, cover: impl Into<String>) -> Self {
        cards.sort_by_key(|c| c.id().value());
        Self {
            cards,
            backside: backside.into(),
            cover: cover.into(),
        }
    }

    /// All cards, in id order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The shared card back reference.
    pub fn backside(&self) -> &str {
        &self.backside
    }

    /// The cover reference.
    pub fn cover(&self) -> &str {
        &self.cover
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index` in id order.
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Look up a card by its id text.
    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id().as_str() == id)
    }

    /// Whether this exact card belongs to the catalog.
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.iter().any(|c| c == card)
    }
}

/// Turns asset listings into catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRepository;

impl CardRepository {
    /// Parse a listing. Entries whose names do not parse are skipped.
    pub fn from_listing(listing: AssetListing) -> CardCatalog {
        let total = listing.card_paths.len();
        let mut seen = HashSet::new();
        let mut cards = Vec::with_capacity(total);

        for path in listing.card_paths {
            let card = parse_file_name(&path).and_then(|parsed| parsed.into_card(path.as_str()));
            match card {
                Ok(card) => {
                    if !seen.insert(card.id().value()) {
                        tracing::warn!(id = %card.id(), path = %path, "duplicate card id");
                    }
                    cards.push(card);
                }
                Err(e) => tracing::debug!(path = %path, error = %e, "skipping card asset"),
            }
        }

        let catalog = CardCatalog::new(cards, listing.backside, listing.cover);
        tracing::info!(
            cards = catalog.len(),
            skipped = total - catalog.len(),
            "card catalog built"
        );
        catalog
    }

    /// List assets from `source` and parse them.
    ///
    /// Only a failure of the source itself is an error; unparseable entries
    /// are skipped.
    pub async fn load<S: AssetSource>(source: &S) -> CardResult<CardCatalog> {
        let listing = source.list_assets().await?;
        Ok(Self::from_listing(listing))
    }
}
