//! Error types for playback, frame loading and configuration.

use std::path::PathBuf;

/// Errors raised at the playback controller boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// Frame rate must be a positive number of frames per second
    #[error("invalid frame rate {0}: must be at least 1 fps")]
    InvalidFrameRate(i32),
}

/// Errors raised while enumerating or decoding frame files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read frame directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frame files must be named after their integer position, e.g. `12.png`
    #[error("frame file name is not an integer: {path}")]
    NonNumericStem { path: PathBuf },

    #[cfg(feature = "png")]
    #[error("failed to decode frame {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors raised while reading the character list.
///
/// [`crate::CharacterConfig::load`] never surfaces these; it logs them and
/// falls back to the built-in list.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when applying settings to an [`crate::Overlay`].
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("failed to load frames for character {id}: {source}")]
    Load {
        id: i32,
        #[source]
        source: LoadError,
    },
}
