//! 服务描述符过滤
//!
//! 按服务类型、部署池和实例状态筛选描述符。纯函数，无副作用。

use crate::discovery::config::{DiscoveryConfig, StateFilter};
use crate::discovery::descriptor::ServiceDescriptor;

/// 描述符过滤器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFilter {
    service_type: String,
    pool: String,
    state_filter: StateFilter,
}

impl DescriptorFilter {
    pub fn new(
        service_type: impl Into<String>,
        pool: impl Into<String>,
        state_filter: StateFilter,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            pool: pool.into(),
            state_filter,
        }
    }

    /// 从服务发现配置创建过滤器
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(
            config.service_type.clone(),
            config.pool.clone(),
            config.state_filter.clone(),
        )
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// 检查单个描述符是否匹配
    ///
    /// 类型和部署池按大小写敏感的精确相等匹配
    pub fn matches(&self, descriptor: &ServiceDescriptor) -> bool {
        descriptor.service_type == self.service_type
            && descriptor.pool == self.pool
            && self.state_filter.matches_descriptor(descriptor)
    }

    /// 筛选匹配的描述符，结果顺序无意义
    pub fn filter<'a>(&self, descriptors: &'a [ServiceDescriptor]) -> Vec<&'a ServiceDescriptor> {
        descriptors.iter().filter(|d| self.matches(d)).collect()
    }
}
