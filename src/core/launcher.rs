use crate::core::env::search_path_from_env;
use crate::domain::model::{LaunchConfig, LaunchReport, StepCommand, StepReport};
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{LauncherError, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::time::Instant;

pub const SUMMARIZER_STEP: &str = "summarizer";
pub const SERVER_STEP: &str = "server";

/// 依序執行 summarizer 與 server，前一步失敗即中止
pub struct Launcher<R: ProcessRunner> {
    config: LaunchConfig,
    runner: R,
}

impl<R: ProcessRunner> Launcher<R> {
    pub fn new(config: LaunchConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn child_env(&self) -> Result<BTreeMap<String, OsString>> {
        let search_path =
            search_path_from_env(&self.config.search_path_var, &self.config.source_dir)?;
        Ok(BTreeMap::from([(
            self.config.search_path_var.clone(),
            search_path,
        )]))
    }

    fn build_step(
        &self,
        name: &str,
        command: &[String],
        extra_args: Vec<String>,
    ) -> Result<StepCommand> {
        let (program, fixed_args) = command
            .split_first()
            .ok_or_else(|| LauncherError::config(format!("no program configured for {}", name)))?;

        let mut args = fixed_args.to_vec();
        args.extend(extra_args);

        Ok(StepCommand {
            name: name.to_string(),
            program: program.clone(),
            args,
            current_dir: self.config.framework_root.clone(),
            env: self.child_env()?,
        })
    }

    /// `<summarizer> --suite <suite_name>`
    pub fn summarizer_command(&self) -> Result<StepCommand> {
        self.build_step(
            SUMMARIZER_STEP,
            &self.config.summarizer,
            vec!["--suite".to_string(), self.config.suite_name.clone()],
        )
    }

    /// `<server> -o <output_dir> -p <port>`
    pub fn server_command(&self) -> Result<StepCommand> {
        self.build_step(
            SERVER_STEP,
            &self.config.server,
            vec![
                "-o".to_string(),
                self.config.output_dir.clone(),
                "-p".to_string(),
                self.config.port.to_string(),
            ],
        )
    }

    pub fn plan(&self) -> Result<Vec<StepCommand>> {
        Ok(vec![self.summarizer_command()?, self.server_command()?])
    }

    pub async fn run(&self) -> Result<LaunchReport> {
        tracing::info!(
            suite = %self.config.suite_name,
            port = self.config.port,
            "🚀 Launching benchmark results pipeline"
        );

        if !self.config.framework_root.is_dir() {
            return Err(LauncherError::WorkingDirError {
                path: self.config.framework_root.display().to_string(),
            });
        }

        let mut report = LaunchReport::default();

        for step in self.plan()? {
            let started_at = Utc::now();
            let clock = Instant::now();

            tracing::info!("▶️  Running {}: {}", step.name, step.display_line());
            let exit_code = self.runner.run(&step).await?;

            report.steps.push(StepReport {
                step: step.name.clone(),
                exit_code,
                started_at,
                duration: clock.elapsed(),
            });

            if exit_code != 0 {
                tracing::error!("❌ {} exited with status {}", step.name, exit_code);
                return Err(LauncherError::StepFailed {
                    step: step.name,
                    code: exit_code,
                });
            }

            tracing::info!("✅ {} completed in {:?}", step.name, clock.elapsed());
        }

        Ok(report)
    }
}
