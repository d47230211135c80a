use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// 一次啟動所需的完整配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub suite_name: String,
    pub port: u16,
    pub framework_root: PathBuf,
    pub source_dir: PathBuf,
    pub search_path_var: String,
    pub output_dir: String,
    pub summarizer: Vec<String>,
    pub server: Vec<String>,
}

/// 單一子程序呼叫的完整描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCommand {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    /// 值保留原始 OsString，序列化時才轉成 lossy 字串
    #[serde(serialize_with = "lossy_env::serialize")]
    pub env: BTreeMap<String, OsString>,
}

impl StepCommand {
    /// 以 shell 形式顯示，給 dry-run 與日誌使用
    pub fn display_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub exit_code: i32,
    pub started_at: DateTime<Utc>,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LaunchReport {
    pub steps: Vec<StepReport>,
}

impl LaunchReport {
    pub fn ran(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s.step == step)
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

mod lossy_env {
    use serde::ser::SerializeMap;
    use serde::Serializer;
    use std::collections::BTreeMap;
    use std::ffi::OsString;

    pub fn serialize<S: Serializer>(
        env: &BTreeMap<String, OsString>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(env.len()))?;
        for (key, value) in env {
            map.serialize_entry(key, &value.to_string_lossy())?;
        }
        map.end()
    }
}
