use thiserror::Error;

/// shell 的 "command not found" 退出碼
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;
/// shell 的 "permission denied" 退出碼
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// 參數或配置錯誤
pub const EXIT_USAGE: i32 = 2;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Failed to start {program}: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot enter framework directory {path}")]
    WorkingDirError { path: String },

    #[error("Step '{step}' exited with status {code}")]
    StepFailed { step: String, code: i32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl LauncherError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// 程序結束時回報給 shell 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SpawnError { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => EXIT_COMMAND_NOT_FOUND,
                std::io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
                _ => 1,
            },
            Self::StepFailed { code, .. } => *code,
            Self::WorkingDirError { .. } => 1,
            Self::IoError(_)
            | Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => EXIT_USAGE,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SpawnError { program, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                format!("{}: command not found", program)
            }
            Self::SpawnError { program, source }
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                format!("{}: permission denied", program)
            }
            Self::WorkingDirError { path } => {
                format!("cd: {}: No such directory", path)
            }
            Self::StepFailed { step, code } => {
                format!("{} failed with exit code {}", step, code)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
