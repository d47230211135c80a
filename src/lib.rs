pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{parse_lenient, CliArgs, OutputFormat};

pub use config::{profile::Profile, resolve, toml_config::TomlConfig, LaunchOverrides};
pub use core::{launcher::Launcher, process::TokioProcessRunner};
pub use domain::model::{LaunchConfig, LaunchReport, StepCommand, StepReport};
pub use domain::ports::ProcessRunner;
pub use utils::error::{LauncherError, Result};
