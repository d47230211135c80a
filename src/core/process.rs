use crate::domain::model::StepCommand;
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{LauncherError, Result};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

/// 以 tokio 產生子程序，stdio 直接繼承終端機
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &StepCommand) -> Result<i32> {
        info!(
            step = %command.name,
            command = %command.display_line(),
            working_dir = %command.current_dir.display(),
            "Starting subprocess"
        );
        debug!(env = ?command.env, "Subprocess environment overrides");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .envs(&command.env)
            .current_dir(&command.current_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LauncherError::SpawnError {
                program: command.program.clone(),
                source,
            })?;

        let status = child.wait().await?;
        let code = exit_code_of(status);

        info!(step = %command.name, exit_code = code, "Subprocess finished");
        Ok(code)
    }
}

/// 被訊號終止時比照 shell 回報 128 + 訊號編號
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
