//! The conversion pipeline: decoding panoramas, rendering the six skybox
//! faces (optionally on worker threads), and writing them as PNG files, for a
//! single file or a whole folder.

mod assembler;
mod batch;
mod error;
pub mod io;
mod pool;

pub use assembler::{ConvertOptions, CubemapAssembler, FileReport, staging_dir};
pub use batch::{BatchReport, FileFailure, convert_folder, list_inputs, run};
pub use error::PipelineError;
pub use pool::{FaceRenderer, FaceWorkerPool};

pub use equicube_config::FailurePolicy;
