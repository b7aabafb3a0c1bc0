//! Configuration for the equicube converter.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap. Unknown fields are ignored and missing sections fall
//! back to defaults, so old and new config files stay loadable.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BatchConfig, CONFIG_FILE_NAME, Config, ConversionConfig, DebugConfig, FailurePolicy,
    default_config_dir,
};
pub use error::ConfigError;
