use thiserror::Error;

/// Result type for showcase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by I/O-facing operations. Normalization itself never fails;
/// it reports "not ready" as `None`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Failed to load OBJ '{path}': {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Target size must be positive and finite, got {0}")]
    InvalidTargetSize(f32),

    #[error("Unknown product category: {0}")]
    UnknownCategory(String),

    #[error("Asset '{0}' has no displayable geometry")]
    NotReady(String),
}
