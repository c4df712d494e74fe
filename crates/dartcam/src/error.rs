use crate::board::{ConfigurationError, DartcamConfigError, DartcamIoError, InvalidPointError};
use crate::core::RectifyError;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DartcamError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Rectify(#[from] RectifyError),

    #[error(transparent)]
    InvalidPoint(#[from] InvalidPointError),

    #[error(transparent)]
    Io(#[from] DartcamIoError),

    #[cfg(feature = "image")]
    #[error("image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: ::image::ImageError,
    },

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<DartcamConfigError> for DartcamError {
    fn from(err: DartcamConfigError) -> Self {
        match err {
            DartcamConfigError::Board(e) => Self::Configuration(e),
            DartcamConfigError::Rectify(e) => Self::Rectify(e),
        }
    }
}
