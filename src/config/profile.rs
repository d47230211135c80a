use serde::{Deserialize, Serialize};

/// 兩種部署變體：標準 crfm-helm 與 NL2SQL 分支
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Default,
    Nl2sql,
}

/// 每個變體的預設值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub suite_name: &'static str,
    pub port: u16,
    pub framework_root: &'static str,
}

impl Profile {
    pub fn defaults(self) -> ProfileDefaults {
        match self {
            Profile::Default => ProfileDefaults {
                suite_name: "test",
                port: 8000,
                framework_root: "crfm-helm",
            },
            Profile::Nl2sql => ProfileDefaults {
                suite_name: "test_nl2sql",
                port: 8088,
                framework_root: "helm",
            },
        }
    }
}
