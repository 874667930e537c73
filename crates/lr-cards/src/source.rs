use std::future::Future;
use std::path::PathBuf;

use crate::error::{CardError, CardResult};

/// Default reference for the shared card back.
pub const DEFAULT_BACKSIDE: &str = "/Backside.jpg";
/// Default reference for the catalog cover.
pub const DEFAULT_COVER: &str = "/Cover.png";

/// Raw asset references, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetListing {
    /// One entry per card image. Entries are parsed by file name.
    pub card_paths: Vec<String>,
    /// Card back shared by the catalog. Passed through untouched.
    pub backside: String,
    /// Cover image shared by the catalog. Passed through untouched.
    pub cover: String,
}

impl AssetListing {
    /// A listing with the default backside and cover references.
    pub fn new(card_paths: Vec<String>) -> Self {
        Self {
            card_paths,
            backside: DEFAULT_BACKSIDE.to_string(),
            cover: DEFAULT_COVER.to_string(),
        }
    }
}

/// Something that can list card assets, possibly asynchronously.
pub trait AssetSource {
    /// List every card asset plus the shared backside and cover.
    fn list_assets(&self) -> impl Future<Output = CardResult<AssetListing>> + Send;
}

/// A fixed, in-memory listing.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    listing: AssetListing,
}

impl StaticAssets {
    /// Serve the given card paths with default backside and cover.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            listing: AssetListing::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    /// Serve a complete listing.
    pub fn from_listing(listing: AssetListing) -> Self {
        Self { listing }
    }
}

impl AssetSource for StaticAssets {
    async fn list_assets(&self) -> CardResult<AssetListing> {
        Ok(self.listing.clone())
    }
}

/// Card images read from a directory on disk.
///
/// Every `*.jpg` file directly inside the directory is listed. Image paths
/// are the full file paths.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    dir: PathBuf,
    backside: String,
    cover: String,
}

impl DirectoryAssets {
    /// Read card images from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            backside: DEFAULT_BACKSIDE.to_string(),
            cover: DEFAULT_COVER.to_string(),
        }
    }

    /// Override the backside reference.
    pub fn with_backside(mut self, backside: impl Into<String>) -> Self {
        self.backside = backside.into();
        self
    }

    /// Override the cover reference.
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = cover.into();
        self
    }
}

impl AssetSource for DirectoryAssets {
    async fn list_assets(&self) -> CardResult<AssetListing> {
        let io_err = |source: std::io::Error| CardError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(io_err)?;

        let mut card_paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            let is_jpg = path.extension().is_some_and(|ext| ext == "jpg");
            if !is_jpg {
                continue;
            }
            match path.to_str() {
                Some(p) => card_paths.push(p.to_string()),
                None => tracing::debug!(path = %path.display(), "skipping non UTF-8 asset path"),
            }
        }
        card_paths.sort();

        Ok(AssetListing {
            card_paths,
            backside: self.backside.clone(),
            cover: self.cover.clone(),
        })
    }
}
