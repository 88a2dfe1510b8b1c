//! 刷新周期
//!
//! 一次完整的 拉取 -> 过滤 -> 选择 -> 汇总 -> 通知 过程。
//! 每个周期都是独立的全量计算，不与上一个周期的结果做比较。

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::filter::DescriptorFilter;
use crate::discovery::notifier::BalancerNotifier;
use crate::discovery::selector::{EndpointSelector, EndpointSet};
use crate::error::{FlareError, Result};

/// 单个周期的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// 拉取到的描述符数量
    pub fetched: usize,
    /// 通过过滤的描述符数量
    pub matched: usize,
    /// 通过过滤但没有可用端点而被丢弃的数量
    pub dropped: usize,
    /// 通知给负载均衡器的端点数量（计入重数）
    pub endpoints: usize,
}

/// 刷新周期
pub struct RefreshCycle {
    backend: Arc<dyn DiscoveryBackend>,
    filter: DescriptorFilter,
    selector: EndpointSelector,
    notifier: BalancerNotifier,
}

impl RefreshCycle {
    pub fn new(
        backend: Arc<dyn DiscoveryBackend>,
        config: &DiscoveryConfig,
        notifier: BalancerNotifier,
    ) -> Self {
        Self {
            backend,
            filter: DescriptorFilter::from_config(config),
            selector: EndpointSelector::new(&config.scheme_preference),
            notifier,
        }
    }

    pub fn filter(&self) -> &DescriptorFilter {
        &self.filter
    }

    /// 执行一次刷新
    ///
    /// 拉取失败时不通知负载均衡器；通知失败只记录日志。
    /// 两种失败都以错误返回，调度器在下一个周期重试。
    pub async fn run(&self) -> Result<CycleReport> {
        let service_type = self.filter.service_type();
        let pool = self.filter.pool();

        let descriptors = match self.backend.discover(service_type).await {
            Ok(descriptors) => descriptors,
            Err(e) => {
                warn!(
                    service_type = %service_type,
                    pool = %pool,
                    error = %e,
                    "Failed to fetch service descriptors, will retry next cycle"
                );
                return Err(FlareError::registry_fetch_failed(service_type, e.to_string()));
            }
        };

        let matched = self.filter.filter(&descriptors);
        let mut endpoints = EndpointSet::new();
        let mut dropped = 0;
        for descriptor in &matched {
            match self.selector.select(descriptor) {
                Some(uri) => endpoints.insert(uri),
                None => {
                    dropped += 1;
                    debug!(
                        descriptor_id = %descriptor.id,
                        node_id = %descriptor.node_id,
                        service_type = %service_type,
                        "Dropping descriptor without a preferred announcement"
                    );
                }
            }
        }

        let report = CycleReport {
            fetched: descriptors.len(),
            matched: matched.len(),
            dropped,
            endpoints: endpoints.len(),
        };

        if let Err(e) = self.notifier.notify(&endpoints) {
            error!(
                service_type = %service_type,
                pool = %pool,
                endpoints = endpoints.len(),
                error = %e,
                "Balancer rejected endpoint update"
            );
            return Err(FlareError::notifier_failed(service_type, e.to_string()));
        }

        debug!(
            service_type = %service_type,
            pool = %pool,
            fetched = report.fetched,
            matched = report.matched,
            dropped = report.dropped,
            endpoints = report.endpoints,
            "Refresh cycle completed"
        );

        Ok(report)
    }
}
