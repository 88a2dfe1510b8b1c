//! 服务发现配置

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::discovery::descriptor::{ServiceDescriptor, ServiceState};
use crate::error::{FlareError, Result};

/// 默认部署池
pub const DEFAULT_POOL: &str = "general";

/// 默认刷新间隔（秒）
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

/// 服务发现配置
///
/// 构造后不可变，由 [`ServiceDescriptorsUpdater`](crate::discovery::ServiceDescriptorsUpdater)
/// 持有
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// 目标服务类型
    pub service_type: String,

    /// 目标部署池
    #[serde(default = "default_pool")]
    pub pool: String,

    /// 实例状态过滤
    #[serde(default)]
    pub state_filter: StateFilter,

    /// 刷新间隔（秒）
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// scheme 优先级，靠前者优先
    #[serde(default = "default_scheme_preference")]
    pub scheme_preference: Vec<String>,
}

fn default_pool() -> String {
    DEFAULT_POOL.to_string()
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_scheme_preference() -> Vec<String> {
    vec!["https".to_string(), "http".to_string()]
}

impl DiscoveryConfig {
    /// 创建配置，其余字段取默认值
    pub fn new(service_type: impl Into<String>, pool: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            pool: pool.into(),
            state_filter: StateFilter::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL_SECS,
            scheme_preference: default_scheme_preference(),
        }
    }

    /// 设置状态过滤
    pub fn with_state_filter(mut self, state_filter: StateFilter) -> Self {
        self.state_filter = state_filter;
        self
    }

    /// 设置刷新间隔
    ///
    /// 不足一秒的部分向上取整
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        let secs = interval.as_secs() + u64::from(interval.subsec_nanos() > 0);
        self.refresh_interval = secs;
        self
    }

    /// 设置 scheme 优先级
    pub fn with_scheme_preference<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scheme_preference = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// 刷新间隔
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.service_type.trim().is_empty() {
            return Err(FlareError::configuration_error("service_type must not be empty"));
        }
        if self.pool.trim().is_empty() {
            return Err(FlareError::configuration_error(format!(
                "pool must not be empty for service type {}",
                self.service_type
            )));
        }
        if self.refresh_interval == 0 {
            return Err(FlareError::configuration_error(format!(
                "refresh_interval must be positive for service type {}",
                self.service_type
            )));
        }
        if self.scheme_preference.is_empty() {
            return Err(FlareError::configuration_error(format!(
                "scheme_preference must list at least one scheme for service type {}",
                self.service_type
            )));
        }
        if self.scheme_preference.iter().any(|s| s.trim().is_empty()) {
            return Err(FlareError::configuration_error(format!(
                "scheme_preference contains a blank scheme for service type {}",
                self.service_type
            )));
        }
        Ok(())
    }
}

/// 实例状态过滤
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StateFilter {
    /// 只接受 Running 实例
    #[default]
    Running,
    /// 接受任意状态
    Any,
    /// 接受列表中的状态
    OneOf(Vec<ServiceState>),
}

impl StateFilter {
    /// 检查状态是否满足过滤条件
    pub fn matches(&self, state: ServiceState) -> bool {
        match self {
            StateFilter::Running => state == ServiceState::Running,
            StateFilter::Any => true,
            StateFilter::OneOf(states) => states.contains(&state),
        }
    }

    /// 检查描述符的状态是否满足过滤条件
    pub fn matches_descriptor(&self, descriptor: &ServiceDescriptor) -> bool {
        self.matches(descriptor.state)
    }
}
