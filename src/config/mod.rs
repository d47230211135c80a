#[cfg(feature = "cli")]
pub mod cli;
pub mod profile;
pub mod toml_config;

use crate::domain::model::LaunchConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_command, validate_env_var_name, validate_non_empty_string, validate_path,
    validate_range, Validate,
};
use profile::Profile;
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_SEARCH_PATH_VAR: &str = "PYTHONPATH";
pub const DEFAULT_OUTPUT_DIR: &str = "benchmark_output";
pub const DEFAULT_SUMMARIZER: &str = "helm-summarize";
pub const DEFAULT_SERVER: &str = "helm-server";

/// 命令列上明確給定的值；未給定的欄位沿用 TOML 或 profile 預設
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOverrides {
    pub profile: Option<Profile>,
    pub suite_name: Option<String>,
    pub port: Option<u16>,
    pub framework_root: Option<PathBuf>,
}

/// 依序套用 profile 預設 -> TOML 檔 -> 命令列，
/// 相對路徑以 `base_dir` 為基準轉成絕對路徑
pub fn resolve(
    overrides: &LaunchOverrides,
    file: Option<&TomlConfig>,
    base_dir: &Path,
) -> LaunchConfig {
    let empty = TomlConfig::default();
    let file = file.unwrap_or(&empty);

    let profile = overrides
        .profile
        .or(file.launcher.profile)
        .unwrap_or_default();
    let defaults = profile.defaults();

    let suite_name = overrides
        .suite_name
        .clone()
        .or_else(|| file.launcher.suite.clone())
        .unwrap_or_else(|| defaults.suite_name.to_string());

    let port = overrides
        .port
        .or(file.launcher.port)
        .unwrap_or(defaults.port);

    let framework_root = base_dir.join(
        overrides
            .framework_root
            .clone()
            .or_else(|| file.framework.root.clone())
            .unwrap_or_else(|| PathBuf::from(defaults.framework_root)),
    );

    let source_dir = match &file.framework.source_dir {
        Some(dir) => base_dir.join(dir),
        None => framework_root.join("src"),
    };

    LaunchConfig {
        suite_name,
        port,
        source_dir,
        framework_root,
        search_path_var: file
            .framework
            .search_path_var
            .clone()
            .unwrap_or_else(|| DEFAULT_SEARCH_PATH_VAR.to_string()),
        output_dir: file
            .framework
            .output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
        summarizer: file
            .commands
            .summarizer
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_SUMMARIZER.to_string()]),
        server: file
            .commands
            .server
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_SERVER.to_string()]),
    }
}

impl Validate for LaunchConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("suite", &self.suite_name)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_path(
            "framework.root",
            &self.framework_root.to_string_lossy(),
        )?;
        validate_path("framework.source_dir", &self.source_dir.to_string_lossy())?;
        validate_path("framework.output_dir", &self.output_dir)?;
        validate_env_var_name("framework.search_path_var", &self.search_path_var)?;
        validate_command("commands.summarizer", &self.summarizer)?;
        validate_command("commands.server", &self.server)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/work")
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = resolve(&LaunchOverrides::default(), None, &base());

        assert_eq!(config.suite_name, "test");
        assert_eq!(config.port, 8000);
        assert_eq!(config.framework_root, PathBuf::from("/work/crfm-helm"));
        assert_eq!(config.source_dir, PathBuf::from("/work/crfm-helm/src"));
        assert_eq!(config.search_path_var, "PYTHONPATH");
        assert_eq!(config.output_dir, "benchmark_output");
        assert_eq!(config.summarizer, vec!["helm-summarize"]);
        assert_eq!(config.server, vec!["helm-server"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nl2sql_profile_defaults() {
        let overrides = LaunchOverrides {
            profile: Some(Profile::Nl2sql),
            ..Default::default()
        };
        let config = resolve(&overrides, None, &base());

        assert_eq!(config.suite_name, "test_nl2sql");
        assert_eq!(config.port, 8088);
        assert_eq!(config.framework_root, PathBuf::from("/work/helm"));
    }

    #[test]
    fn test_cli_beats_file_beats_profile() {
        let file = TomlConfig::from_toml_str(
            r#"
[launcher]
profile = "nl2sql"
suite = "from_file"
port = 9000

[framework]
root = "/opt/helm"
"#,
        )
        .unwrap();
        let overrides = LaunchOverrides {
            port: Some(9090),
            ..Default::default()
        };

        let config = resolve(&overrides, Some(&file), &base());

        assert_eq!(config.suite_name, "from_file");
        assert_eq!(config.port, 9090);
        // 絕對路徑不受 base_dir 影響
        assert_eq!(config.framework_root, PathBuf::from("/opt/helm"));
        assert_eq!(config.source_dir, PathBuf::from("/opt/helm/src"));
    }

    #[test]
    fn test_explicit_source_dir() {
        let file = TomlConfig::from_toml_str("[framework]\nsource_dir = \"vendor/helm/src\"\n")
            .unwrap();
        let config = resolve(&LaunchOverrides::default(), Some(&file), &base());

        assert_eq!(config.source_dir, PathBuf::from("/work/vendor/helm/src"));
    }

    #[test]
    fn test_validation_rejects_blank_suite_and_zero_port() {
        let mut config = resolve(&LaunchOverrides::default(), None, &base());
        config.suite_name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = resolve(&LaunchOverrides::default(), None, &base());
        config.port = 0;
        assert!(config.validate().is_err());
    }
}
