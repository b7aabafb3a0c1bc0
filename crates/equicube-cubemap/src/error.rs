//! Error types for cubemap face construction.

/// Errors raised while building cubemap faces.
///
/// All variants describe programming or configuration faults: the six faces
/// are fixed, so none of these depend on the pixels of the source image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CubemapError {
    /// A direction kind name did not match any of the six cube directions.
    #[error("unknown direction kind: {0:?}")]
    UnknownDirection(String),

    /// A face identity or face code did not match any of the six skybox faces.
    #[error("unknown skybox face: {0:?}")]
    UnknownFace(String),

    /// The requested face edge length was zero.
    #[error("face size must be positive, got {0}")]
    InvalidFaceSize(u32),

    /// The source image has no pixels.
    #[error("equirectangular source must be at least 1x1, got {width}x{height}")]
    EmptySource {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },
}
