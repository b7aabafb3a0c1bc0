//! Structured logging for equicube.
//!
//! Console output with uptime timestamps and module paths, filtered by
//! `RUST_LOG` or the configured log level, plus an optional JSON log file for
//! long batch runs.

use std::path::{Path, PathBuf};

use equicube_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written inside the log directory.
pub const LOG_FILE_NAME: &str = "equicube.log";

/// Resolve the filter string: the config's `log_level` if set, else [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log file, if file logging is enabled and a directory is known.
pub fn log_file_path(log_dir: Option<&Path>, config: Option<&Config>) -> Option<PathBuf> {
    let enabled = config.is_some_and(|c| c.debug.log_to_file);
    match log_dir {
        Some(dir) if enabled => Some(dir.join(LOG_FILE_NAME)),
        _ => None,
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the config's `log_level`. When the config
/// enables `log_to_file` and `log_dir` can be created, a JSON layer also writes
/// to [`LOG_FILE_NAME`] inside it.
///
/// ```no_run
/// use equicube_config::Config;
/// use equicube_log::init_logging;
///
/// init_logging(None, Some(&Config::default()));
/// ```
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // face workers are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_path) = log_file_path(log_dir, config)
        && let Some(dir) = log_path.parent()
        && std::fs::create_dir_all(dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(&log_path)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,equicube_pipeline=trace".to_string();
        assert_eq!(
            filter_directive(Some(&config)),
            "debug,equicube_pipeline=trace"
        );
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,equicube_cubemap=trace",
            "warn,equicube_pipeline=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_log_file_requires_flag_and_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();

        assert_eq!(log_file_path(Some(temp_dir.path()), Some(&config)), None);

        config.debug.log_to_file = true;
        assert_eq!(log_file_path(None, Some(&config)), None);
        assert_eq!(
            log_file_path(Some(temp_dir.path()), Some(&config)),
            Some(temp_dir.path().join("equicube.log"))
        );
    }
}
