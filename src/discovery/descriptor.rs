//! 服务描述符定义
//!
//! 描述符是注册中心上报的单个服务实例快照，对本模块只读

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 服务实例状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceState {
    /// 运行中
    #[default]
    Running,
    /// 已停止（正在下线）
    Stopped,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Running => write!(f, "RUNNING"),
            ServiceState::Stopped => write!(f, "STOPPED"),
        }
    }
}

impl FromStr for ServiceState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(ServiceState::Running),
            "stopped" | "stopping" => Ok(ServiceState::Stopped),
            _ => Err(format!("Unknown service state: {}", s)),
        }
    }
}

/// 服务描述符
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// 实例 ID（唯一标识）
    pub id: Uuid,

    /// 承载该实例的节点 ID
    pub node_id: String,

    /// 服务类型（如 "apple"）
    #[serde(rename = "type")]
    pub service_type: String,

    /// 部署池（如 "general", "canary"）
    pub pool: String,

    /// 位置信息，由注册中心原样上报
    #[serde(default)]
    pub location: Option<String>,

    /// 实例状态
    #[serde(default)]
    pub state: ServiceState,

    /// 宣告的端点：scheme -> URI
    #[serde(default, alias = "properties")]
    pub announcements: HashMap<String, String>,
}

impl ServiceDescriptor {
    /// 创建新的服务描述符（随机 ID，状态为 Running）
    pub fn new(
        node_id: impl Into<String>,
        service_type: impl Into<String>,
        pool: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            node_id: node_id.into(),
            service_type: service_type.into(),
            pool: pool.into(),
            location: None,
            state: ServiceState::Running,
            announcements: HashMap::new(),
        }
    }

    /// 设置实例 ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// 设置位置
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// 设置状态
    pub fn with_state(mut self, state: ServiceState) -> Self {
        self.state = state;
        self
    }

    /// 添加宣告端点
    pub fn with_announcement(mut self, scheme: impl Into<String>, uri: impl Into<String>) -> Self {
        self.announcements.insert(scheme.into(), uri.into());
        self
    }

    /// 按 scheme 查找宣告的 URI（scheme 不区分大小写）
    pub fn announcement(&self, scheme: &str) -> Option<&str> {
        if let Some(uri) = self.announcements.get(scheme) {
            return Some(uri);
        }
        self.announcements
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(scheme))
            .map(|(_, uri)| uri.as_str())
    }

    /// 是否处于运行状态
    pub fn is_running(&self) -> bool {
        self.state == ServiceState::Running
    }
}
