//! Command-line argument parsing for equicube.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, FailurePolicy};

/// Convert equirectangular panoramas into six skybox cubemap faces.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "equicube", version, about)]
pub struct CliArgs {
    /// Input panorama file, or a folder of panoramas.
    pub input: PathBuf,

    /// Output folder (created if absent).
    pub output: PathBuf,

    /// Output face edge length in pixels.
    #[arg(long, short = 's')]
    pub face_size: Option<u32>,

    /// Face rendering threads (0 = one per CPU).
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// In folder mode, keep going after a file fails.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Stage faces in a temporary folder and move them into place on success.
    #[arg(long)]
    pub atomic: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Run with built-in defaults; neither read nor create `config.ron`.
    #[arg(long)]
    pub no_config: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.face_size {
            self.conversion.face_size = size;
        }
        if let Some(workers) = args.workers {
            self.conversion.workers = workers;
        }
        if args.continue_on_error {
            self.batch.failure_policy = FailurePolicy::Continue;
        }
        if args.atomic {
            self.batch.atomic_output = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> CliArgs {
        CliArgs::parse_from(["equicube", "in", "out"])
    }

    #[test]
    fn test_cli_positional_paths() {
        let args = bare_args();
        assert_eq!(args.input, PathBuf::from("in"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert!(args.face_size.is_none());
        assert!(!args.no_config);
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "equicube",
            "sky.hdr",
            "cubemaps",
            "--face-size",
            "256",
            "--continue-on-error",
            "-j",
            "0",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.conversion.face_size, 256);
        assert_eq!(config.conversion.workers, 0);
        assert_eq!(config.batch.failure_policy, FailurePolicy::Continue);
        // Non-overridden fields retain defaults
        assert!(!config.batch.atomic_output);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&bare_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_config_and_no_config_conflict() {
        let result =
            CliArgs::try_parse_from(["equicube", "a", "b", "--config", "dir", "--no-config"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_output_rejected() {
        assert!(CliArgs::try_parse_from(["equicube", "only-input"]).is_err());
    }
}
