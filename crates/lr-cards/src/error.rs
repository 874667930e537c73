use std::path::PathBuf;

/// Alias for `Result<T, CardError>`.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur while parsing or loading cards.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// The file name does not follow the `<id>_<theme>.jpg` convention.
    #[error("invalid card file name: \"{0}\"")]
    InvalidFileName(String),

    /// The leading token is not a decimal card id.
    #[error("invalid card id: \"{0}\"")]
    InvalidId(String),

    /// Parsing left nothing to use as the theme.
    #[error("card \"{0}\" has an empty theme")]
    EmptyTheme(String),

    /// Reading the asset source failed.
    #[error("failed to read card assets at {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
