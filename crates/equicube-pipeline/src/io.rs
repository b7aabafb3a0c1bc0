//! Image decode/encode at the pipeline boundary.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use equicube_cubemap::{EquirectangularImage, FaceImage, SkyboxFace};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageError};

use crate::PipelineError;

/// Decode `path` into an RGB8 equirectangular source.
///
/// Any format the `image` crate was built with is accepted; color is converted
/// to RGB8 without tone-mapping.
pub fn load_equirectangular(path: &Path) -> Result<EquirectangularImage, PipelineError> {
    let decoded = image::open(path).map_err(|source| PipelineError::InputDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let source = EquirectangularImage::new(decoded.into_rgb8())?;
    if !source.is_two_to_one() {
        let (width, height) = source.dimensions();
        tracing::warn!(
            path = %path.display(),
            width,
            height,
            "source is not 2:1; sampling it as equirectangular anyway"
        );
    }
    Ok(source)
}

/// The input file name without its extension.
#[must_use]
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Where `face` of the input `base_name` is written inside `output_dir`.
#[must_use]
pub fn face_output_path(output_dir: &Path, face: SkyboxFace, base_name: &str) -> PathBuf {
    output_dir.join(face.file_name(base_name))
}

/// Encode `image` as an RGB8 PNG at `path`.
pub fn write_face_png(
    image: &FaceImage,
    face: SkyboxFace,
    path: &Path,
) -> Result<(), PipelineError> {
    let wrap = |source: ImageError| PipelineError::OutputWrite {
        face,
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| wrap(ImageError::IoError(e)))?;
    let writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    let pixels = image.as_rgb();
    encoder
        .write_image(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(wrap)
}
