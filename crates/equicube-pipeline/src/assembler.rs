//! Converting one panorama into six face files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use equicube_config::{Config, FailurePolicy};
use equicube_cubemap::{CubemapError, EquirectangularImage, SkyboxFace};

use crate::io::{base_name, face_output_path, load_equirectangular, write_face_png};
use crate::pool::FaceRenderer;
use crate::PipelineError;

/// Settings the converter runs with, taken from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Output face edge length in pixels.
    pub face_size: u32,
    /// Face rendering threads; 1 is inline, 0 is one per CPU.
    pub workers: usize,
    /// What folder mode does when a file fails.
    pub failure_policy: FailurePolicy,
    /// Stage faces and move them into place only after all six are written.
    pub atomic_output: bool,
}

impl From<&Config> for ConvertOptions {
    fn from(config: &Config) -> Self {
        Self {
            face_size: config.conversion.face_size,
            workers: config.conversion.workers,
            failure_policy: config.batch.failure_policy,
            atomic_output: config.batch.atomic_output,
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// The outcome of converting one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// The input file, if the source came from disk.
    pub input: Option<PathBuf>,
    /// Folder holding the six faces.
    pub output_dir: PathBuf,
    /// Written face files, in emission order.
    pub faces: Vec<PathBuf>,
}

/// Drives face rendering and writing for one panorama at a time.
pub struct CubemapAssembler {
    options: ConvertOptions,
    renderer: FaceRenderer,
}

impl CubemapAssembler {
    /// Create an assembler, starting worker threads if `options.workers != 1`.
    pub fn new(options: ConvertOptions) -> Result<Self, PipelineError> {
        if options.face_size == 0 {
            return Err(CubemapError::InvalidFaceSize(options.face_size).into());
        }
        let renderer = FaceRenderer::for_workers(options.workers)?;
        Ok(Self { options, renderer })
    }

    /// The options this assembler was built with.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Decode `input` and write its six faces into `output_dir`.
    pub fn convert_file(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<FileReport, PipelineError> {
        let source = load_equirectangular(input)?;
        let (width, height) = source.dimensions();
        tracing::debug!(input = %input.display(), width, height, "decoded panorama");

        let mut report = self.convert_image(Arc::new(source), output_dir, &base_name(input))?;
        report.input = Some(input.to_path_buf());
        Ok(report)
    }

    /// Write the six faces of `source` into `output_dir` as `{FaceCode}_{base_name}.png`.
    pub fn convert_image(
        &self,
        source: Arc<EquirectangularImage>,
        output_dir: &Path,
        base_name: &str,
    ) -> Result<FileReport, PipelineError> {
        create_dir(output_dir)?;

        let faces = if self.options.atomic_output {
            self.write_staged(&source, output_dir, base_name)?
        } else {
            self.write_faces(&source, output_dir, base_name)?
        };

        Ok(FileReport {
            input: None,
            output_dir: output_dir.to_path_buf(),
            faces,
        })
    }

    /// Render and write faces straight into `dir`, one at a time.
    fn write_faces(
        &self,
        source: &Arc<EquirectangularImage>,
        dir: &Path,
        base_name: &str,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let face_size = self.options.face_size;
        let mut written = Vec::with_capacity(6);

        self.renderer
            .render_each(source, face_size, |face, image, render_time| {
                let path = face_output_path(dir, face, base_name);
                write_face_png(&image, face, &path).inspect_err(|e| {
                    tracing::error!(face = %face, error = %e, "failed to save face");
                })?;
                tracing::info!(
                    face = %face,
                    path = %path.display(),
                    render_ms = render_time.as_millis() as u64,
                    "saved face"
                );
                written.push(path);
                Ok(())
            })?;

        Ok(written)
    }

    /// Write all faces into a hidden staging folder, then move them into `output_dir`.
    ///
    /// Faces are moved only after all six were written, and either all six
    /// land in `output_dir` or none do. The staging folder is removed whether
    /// or not the conversion succeeds.
    fn write_staged(
        &self,
        source: &Arc<EquirectangularImage>,
        output_dir: &Path,
        base_name: &str,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let staging = staging_dir(output_dir, base_name);
        if staging.exists() {
            remove_dir(&staging)?;
        }
        create_dir(&staging)?;

        let result = self
            .write_faces(source, &staging, base_name)
            .and_then(|_| publish(&staging, output_dir, base_name));

        if let Err(cleanup) = remove_dir(&staging) {
            tracing::warn!(error = %cleanup, "could not remove staging folder");
        }
        if result.is_ok() {
            tracing::debug!(output = %output_dir.display(), "published staged faces");
        }
        result
    }
}

/// Move the six staged faces for `base_name` from `staging` into `output_dir`.
///
/// Every target is checked before the first move. If a move still fails,
/// the faces already moved are removed again.
fn publish(
    staging: &Path,
    output_dir: &Path,
    base_name: &str,
) -> Result<Vec<PathBuf>, PipelineError> {
    for face in SkyboxFace::ALL {
        let target = face_output_path(output_dir, face, base_name);
        if target.is_dir() {
            return Err(PipelineError::OutputDir {
                path: target,
                source: std::io::Error::from(std::io::ErrorKind::IsADirectory),
            });
        }
    }

    let mut published = Vec::with_capacity(SkyboxFace::ALL.len());
    for face in SkyboxFace::ALL {
        let staged = face_output_path(staging, face, base_name);
        let target = face_output_path(output_dir, face, base_name);
        if let Err(source) = std::fs::rename(&staged, &target) {
            unpublish(&published);
            return Err(PipelineError::OutputDir {
                path: target,
                source,
            });
        }
        published.push(target);
    }
    Ok(published)
}

fn unpublish(published: &[PathBuf]) {
    for path in published {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not roll back face");
        }
    }
}

/// Hidden folder inside `output_dir` where faces are staged for `base_name`.
#[must_use]
pub fn staging_dir(output_dir: &Path, base_name: &str) -> PathBuf {
    output_dir.join(format!(".{base_name}.partial"))
}

fn create_dir(path: &Path) -> Result<(), PipelineError> {
    std::fs::create_dir_all(path).map_err(|source| PipelineError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_dir(path: &Path) -> Result<(), PipelineError> {
    std::fs::remove_dir_all(path).map_err(|source| PipelineError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}
