//! Equirectangular-to-cubemap geometry: per-face view directions, spherical
//! nearest-neighbor sampling, and skybox orientation fix-ups.

mod cubemap;
mod direction;
mod error;
mod face;
pub mod orientation;
mod raster;
pub mod sampler;

pub use cubemap::{Cubemap, render_face, sample_face};
pub use direction::{DirectionField, DirectionKind, face_axis};
pub use error::CubemapError;
pub use face::{FACE_SPECS, FaceSpec, QuarterTurn, SkyboxFace};
pub use raster::{EquirectangularImage, FaceImage};
