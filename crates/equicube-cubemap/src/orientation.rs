//! Skybox orientation fix-ups applied to freshly sampled faces.
//!
//! Every face is rotated 180°, then Left/Right are mirrored horizontally, then
//! Top/Bottom get their extra quarter-turn. The order matters: swapping any two
//! steps changes the output for at least one face.

use image::imageops;

use crate::{FaceImage, FaceSpec, QuarterTurn};

/// Apply the fixed correction sequence of `spec` to `face`.
#[must_use]
pub fn correct(face: &FaceImage, spec: &FaceSpec) -> FaceImage {
    let mut pixels = imageops::rotate180(face.as_rgb());

    if spec.mirror {
        imageops::flip_horizontal_in_place(&mut pixels);
    }

    let pixels = match spec.extra_rotation {
        // `imageops::rotate90` turns clockwise.
        Some(QuarterTurn::CounterClockwise) => imageops::rotate270(&pixels),
        Some(QuarterTurn::Clockwise) => imageops::rotate90(&pixels),
        None => pixels,
    };

    FaceImage::from_rgb_unchecked(pixels)
}
