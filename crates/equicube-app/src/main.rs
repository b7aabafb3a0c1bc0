//! The `equicube` command-line converter.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use equicube_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigError, default_config_dir};
use equicube_pipeline::{BatchReport, ConvertOptions, CubemapAssembler, PipelineError};

/// Exit status for I/O failures during conversion.
const EXIT_FAILURE: u8 = 1;
/// Exit status for unusable configuration.
const EXIT_CONFIG: u8 = 2;

/// Where the running config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// `--no-config`: built-in defaults.
    Defaults,
    /// An existing config file in this directory.
    Loaded(PathBuf),
    /// A default config file freshly written to this directory.
    Created(PathBuf),
}

impl ConfigSource {
    fn dir(&self) -> Option<&Path> {
        match self {
            ConfigSource::Defaults => None,
            ConfigSource::Loaded(dir) | ConfigSource::Created(dir) => Some(dir),
        }
    }

    /// Call once logging is initialized.
    fn log(&self) {
        match self {
            ConfigSource::Defaults => tracing::info!("using built-in config"),
            ConfigSource::Loaded(dir) => tracing::info!(
                path = %dir.join(CONFIG_FILE_NAME).display(),
                "loaded config"
            ),
            ConfigSource::Created(dir) => tracing::info!(
                path = %dir.join(CONFIG_FILE_NAME).display(),
                "created default config"
            ),
        }
    }
}

/// Load the config the CLI asks for, with CLI overrides applied.
fn resolve_config(args: &CliArgs) -> Result<(Config, ConfigSource), ConfigError> {
    let (mut config, source) = if args.no_config {
        (Config::default(), ConfigSource::Defaults)
    } else {
        let dir = match &args.config {
            Some(dir) => dir.clone(),
            None => default_config_dir()?,
        };
        let existed = dir.join(CONFIG_FILE_NAME).exists();
        let config = Config::load_or_create(&dir)?;
        let source = if existed {
            ConfigSource::Loaded(dir)
        } else {
            ConfigSource::Created(dir)
        };
        (config, source)
    };
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((config, source))
}

fn summarize(report: &BatchReport) {
    for failure in &report.failures {
        tracing::error!(
            input = %failure.input.display(),
            error = %failure.error,
            "skipped"
        );
    }
    tracing::info!(
        converted = report.converted.len(),
        failed = report.failures.len(),
        "finished"
    );
}

fn convert(args: &CliArgs, config: &Config) -> Result<BatchReport, PipelineError> {
    let assembler = CubemapAssembler::new(ConvertOptions::from(config))?;
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        face_size = config.conversion.face_size,
        "starting conversion"
    );
    equicube_pipeline::run(&assembler, &args.input, &args.output)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config, source) = match resolve_config(&args) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("equicube: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let log_dir = source.dir().map(|dir| dir.join("logs"));
    equicube_log::init_logging(log_dir.as_deref(), Some(&config));
    source.log();

    match convert(&args, &config) {
        Ok(report) => {
            summarize(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "conversion aborted");
            if e.is_configuration() {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}
