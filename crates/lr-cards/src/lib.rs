//! Card catalog model for Love Resilience.
//!
//! Cards are described entirely by their image file names
//! (`<id>_<theme words>[_<CATEGORY WORDS>].jpg`). This crate parses those
//! names into [`Card`] records, fills in the default reflective content and
//! assembles them into an ordered [`CardCatalog`].

/// Card records and their validated parts.
pub mod card;
/// Catalog assembly and the card repository.
pub mod catalog;
/// Default reflective content generated from a card theme.
pub mod content;
/// Error types used throughout the crate.
pub mod error;
/// File-name parser for card assets.
pub mod parse;
/// Sources that list card assets.
pub mod source;

/// Re-export card types.
pub use card::{Card, CardId, Category, Reflection};
/// Re-export catalog types.
pub use catalog::{CardCatalog, CardRepository};
/// Re-export error types.
pub use error::{CardError, CardResult};
/// Re-export parser entry points.
pub use parse::{ParsedName, parse_file_name};
/// Re-export asset sources.
pub use source::{AssetListing, AssetSource, DirectoryAssets, StaticAssets};
