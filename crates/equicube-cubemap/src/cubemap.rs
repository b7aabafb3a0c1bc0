//! Rendering whole faces: direction field, sampling, orientation fix-up.

use crate::orientation::correct;
use crate::sampler::sample;
use crate::{
    CubemapError, DirectionField, DirectionKind, EquirectangularImage, FaceImage, FaceSpec,
    SkyboxFace,
};

/// Sample a face of `kind` without any orientation correction.
///
/// Pixel `(x, y)` holds the source color along the direction generated for
/// column `x`, row `y`.
pub fn sample_face(
    source: &EquirectangularImage,
    kind: DirectionKind,
    face_size: u32,
) -> Result<FaceImage, CubemapError> {
    let field = DirectionField::generate(kind, face_size)?;
    Ok(FaceImage::from_fn(face_size, |x, y| {
        sample(source, field.get(x, y))
    }))
}

/// Render one finished face: sample it, then apply its orientation fix-up.
pub fn render_face(
    source: &EquirectangularImage,
    spec: &FaceSpec,
    face_size: u32,
) -> Result<FaceImage, CubemapError> {
    let raw = sample_face(source, spec.direction, face_size)?;
    Ok(correct(&raw, spec))
}

/// All six finished faces of one source image, held in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Cubemap {
    faces: [FaceImage; 6],
}

impl Cubemap {
    /// Render all six faces of `source` at `face_size`.
    pub fn from_equirectangular(
        source: &EquirectangularImage,
        face_size: u32,
    ) -> Result<Self, CubemapError> {
        let [bk, dn, ft, lf, rt, up] = SkyboxFace::ALL;
        Ok(Self {
            faces: [
                render_face(source, bk.spec(), face_size)?,
                render_face(source, dn.spec(), face_size)?,
                render_face(source, ft.spec(), face_size)?,
                render_face(source, lf.spec(), face_size)?,
                render_face(source, rt.spec(), face_size)?,
                render_face(source, up.spec(), face_size)?,
            ],
        })
    }

    /// The finished image of `face`.
    #[must_use]
    pub fn face(&self, face: SkyboxFace) -> &FaceImage {
        &self.faces[face as usize]
    }

    /// Faces paired with their identity, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (SkyboxFace, &FaceImage)> {
        SkyboxFace::ALL.into_iter().zip(self.faces.iter())
    }
}
