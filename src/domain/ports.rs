use crate::domain::model::StepCommand;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 執行外部程式並等待結束，回傳退出碼
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &StepCommand) -> Result<i32>;
}
