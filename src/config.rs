use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::discovery::DiscoveryConfig;
use crate::error::Result;

/// 客户端整体配置
///
/// ```toml
/// [logging]
/// level = "debug"
/// json = false
///
/// [[discovery]]
/// service_type = "apple"
/// pool = "general"
/// refresh_interval = 5
/// scheme_preference = ["https", "http"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub discovery: Vec<DiscoveryConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// 日志级别或 EnvFilter 指令（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AgentConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 解析并校验每个服务发现配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AgentConfig = toml::from_str(content)?;
        for discovery in &config.discovery {
            discovery.validate()?;
        }
        Ok(config)
    }
}
