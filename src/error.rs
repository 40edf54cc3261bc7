use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Ufo2FeaError {
    #[error("Unknown file type for file {path:?}")]
    UnknownFileType { path: PathBuf },

    #[error("IO Error: {0}")]
    IO(#[from] io::Error),

    #[cfg(feature = "ufo")]
    #[error("Error loading UFO: {0}")]
    UfoLoad(#[from] norad::error::FontLoadError),

    #[error("Error reading glyph name map: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when no free name could be found below the retry ceiling.
    /// This means the collision set was corrupt, not that the input was bad.
    #[error("Internal error: could not find a unique name for {name:?}")]
    UniqueNameExhausted { name: String },
}
