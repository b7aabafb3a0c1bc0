//! Single-file and folder runs.
//!
//! A file input is converted straight into the output folder. A folder input
//! has each of its files converted into `{output}/{base_name}`; files share no
//! state and are processed in file-name order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use equicube_config::FailurePolicy;

use crate::assembler::{CubemapAssembler, FileReport};
use crate::io::base_name;
use crate::PipelineError;

/// A file that failed during a folder run with [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct FileFailure {
    /// The input file.
    pub input: PathBuf,
    /// Why it failed.
    pub error: PipelineError,
}

/// Outcome of a run: converted files and, when continuing past errors, failures.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully converted inputs, in processing order.
    pub converted: Vec<FileReport>,
    /// Inputs that failed, in processing order.
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// `true` if no input failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of inputs attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.failures.len()
    }
}

/// Convert `input` (a file or a folder of files) into `output`.
pub fn run(
    assembler: &CubemapAssembler,
    input: &Path,
    output: &Path,
) -> Result<BatchReport, PipelineError> {
    if input.is_dir() {
        convert_folder(assembler, input, output)
    } else if input.is_file() {
        tracing::info!(input = %input.display(), "processing");
        let report = assembler.convert_file(input, output)?;
        Ok(BatchReport {
            converted: vec![report],
            failures: Vec::new(),
        })
    } else {
        Err(PipelineError::InputNotFound {
            path: input.to_path_buf(),
        })
    }
}

/// Regular, non-hidden files directly inside `folder`, sorted by file name.
pub fn list_inputs(folder: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let wrap = |source: std::io::Error| PipelineError::InputDir {
        path: folder.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(wrap)? {
        let entry = entry.map_err(wrap)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            tracing::debug!(path = %path.display(), "skipping hidden file");
            continue;
        }
        inputs.push(path);
    }
    inputs.sort();
    Ok(inputs)
}

/// Convert every file in `folder`, each into `{output_root}/{base_name}`.
///
/// With [`FailurePolicy::Abort`] the first failing file ends the run and its
/// error is returned. With [`FailurePolicy::Continue`] failures are collected
/// in the report.
pub fn convert_folder(
    assembler: &CubemapAssembler,
    folder: &Path,
    output_root: &Path,
) -> Result<BatchReport, PipelineError> {
    let inputs = list_inputs(folder)?;
    std::fs::create_dir_all(output_root).map_err(|source| PipelineError::OutputDir {
        path: output_root.to_path_buf(),
        source,
    })?;

    tracing::info!(
        folder = %folder.display(),
        files = inputs.len(),
        "converting folder"
    );

    let policy = assembler.options().failure_policy;
    let mut report = BatchReport::default();
    let mut seen_names = HashSet::new();
    let started = Instant::now();

    for input in inputs {
        let name = base_name(&input);
        if !seen_names.insert(name.clone()) {
            tracing::warn!(
                input = %input.display(),
                base_name = %name,
                "another input shares this base name; its faces will be overwritten"
            );
        }

        tracing::info!(input = %input.display(), "processing");
        match assembler.convert_file(&input, &output_root.join(&name)) {
            Ok(file_report) => report.converted.push(file_report),
            Err(error) => {
                tracing::error!(input = %input.display(), error = %error, "conversion failed");
                match policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => report.failures.push(FileFailure { input, error }),
                }
            }
        }
    }

    tracing::info!(
        converted = report.converted.len(),
        failed = report.failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "folder done"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_inputs_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"").unwrap();
        std::fs::write(dir.path().join(".hidden"), b"").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let inputs = list_inputs(dir.path()).unwrap();
        assert_eq!(
            inputs,
            vec![dir.path().join("a.jpg"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn test_list_missing_folder_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(matches!(
            list_inputs(&missing),
            Err(PipelineError::InputDir { .. })
        ));
    }

    #[test]
    fn test_report_counts() {
        let mut report = BatchReport::default();
        assert!(report.is_success());
        report.failures.push(FileFailure {
            input: PathBuf::from("x.png"),
            error: PipelineError::InputNotFound {
                path: PathBuf::from("x.png"),
            },
        });
        assert!(!report.is_success());
        assert_eq!(report.attempted(), 1);
    }
}
