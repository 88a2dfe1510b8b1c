//! Flare Discovery Client
//!
//! 客户端服务发现：定期从注册中心拉取指定服务的实例，按服务类型、部署池和健康状态过滤，
//! 为每个实例选出一个端点 URI，并把端点集合推送给可插拔的负载均衡器。

pub mod balancer;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;

// Re-exports
pub use balancer::{EndpointPool, LoadBalanceStrategy};
pub use config::{AgentConfig, LoggingConfig};
pub use discovery::{
    BalancerNotifier, CycleReport, DescriptorFilter, DiscoveryBackend, DiscoveryConfig, Endpoint,
    EndpointBalancer, EndpointSelector, EndpointSet, InMemoryBackend, LifecycleState,
    RefreshCycle, ServiceDescriptor, ServiceDescriptorsUpdater, ServiceState, StateFilter,
};
pub use error::{ErrorBuilder, ErrorCategory, ErrorCode, FlareError, Result};
