//! 负载均衡器通知
//!
//! 将每个刷新周期计算出的端点集合转交给负载均衡器

use std::sync::Arc;

use crate::discovery::selector::EndpointSet;
use crate::error::Result;

/// 负载均衡器 trait
///
/// 每次调用都携带完整的端点集合，内部的差异合并和健康检查由实现方负责。
/// 该调用在刷新周期内同步执行，实现方不应在其中做网络 IO。
pub trait EndpointBalancer: Send + Sync {
    /// 用新的端点集合替换当前的可用端点
    fn update_endpoints(&self, endpoints: &EndpointSet) -> Result<()>;
}

/// 负载均衡器通知器
///
/// 无状态的转发适配器，每个刷新周期调用一次
#[derive(Clone)]
pub struct BalancerNotifier {
    balancer: Arc<dyn EndpointBalancer>,
}

impl BalancerNotifier {
    pub fn new(balancer: Arc<dyn EndpointBalancer>) -> Self {
        Self { balancer }
    }

    /// 转发端点集合（允许为空）
    pub fn notify(&self, endpoints: &EndpointSet) -> Result<()> {
        self.balancer.update_endpoints(endpoints)
    }
}

impl std::fmt::Debug for BalancerNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalancerNotifier").finish_non_exhaustive()
    }
}
