//! Pipeline error types.

use std::path::PathBuf;

use equicube_cubemap::{CubemapError, SkyboxFace};

/// Errors raised while converting panoramas into cubemap faces.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Face identity, face size, or source dimensions are unusable.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] CubemapError),

    /// The input location does not exist.
    #[error("input not found: {}", path.display())]
    InputNotFound {
        /// Missing file or folder.
        path: PathBuf,
    },

    /// An input folder could not be listed.
    #[error("failed to list input folder {}: {source}", path.display())]
    InputDir {
        /// Folder being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be opened or decoded as an image.
    #[error("failed to decode {}: {source}", path.display())]
    InputDecode {
        /// Input file.
        path: PathBuf,
        /// Underlying decode or I/O error.
        #[source]
        source: image::ImageError,
    },

    /// An output folder could not be created, cleaned up, or moved into.
    #[error("failed to prepare output {}: {source}", path.display())]
    OutputDir {
        /// Folder or file being created, removed, or renamed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A face could not be encoded or written.
    #[error("failed to write {face} to {}: {source}", path.display())]
    OutputWrite {
        /// Face being written.
        face: SkyboxFace,
        /// Destination file.
        path: PathBuf,
        /// Underlying encode or I/O error.
        #[source]
        source: image::ImageError,
    },

    /// A face worker thread could not be started or stopped unexpectedly.
    #[error("face worker pool failure: {0}")]
    WorkerPool(String),
}

impl PipelineError {
    /// Whether this error comes from configuration rather than from I/O.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, PipelineError::Configuration(_))
    }
}
