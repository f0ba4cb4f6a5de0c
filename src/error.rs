use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SlideshowError>;

#[derive(Debug, thiserror::Error)]
pub enum SlideshowError {
    #[error("a slideshow needs at least one slide")]
    NoSlides,

    #[error("interval must be greater than zero, got {0} ms")]
    InvalidInterval(u64),

    #[error("invalid slide selector '{pattern}': {source}")]
    InvalidSelector {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
