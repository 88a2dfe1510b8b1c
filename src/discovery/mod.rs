//! 服务发现模块
//!
//! 定期从注册中心拉取指定类型的服务描述符，按类型、部署池和状态过滤，
//! 为每个实例选出一个端点，并将端点集合推送给负载均衡器。

pub mod backend;
pub mod config;
pub mod cycle;
pub mod descriptor;
pub mod filter;
pub mod notifier;
pub mod selector;
pub mod updater;

pub use backend::{DiscoveryBackend, InMemoryBackend};
pub use config::{DiscoveryConfig, StateFilter, DEFAULT_POOL, DEFAULT_REFRESH_INTERVAL_SECS};
pub use cycle::{CycleReport, RefreshCycle};
pub use descriptor::{ServiceDescriptor, ServiceState};
pub use filter::DescriptorFilter;
pub use notifier::{BalancerNotifier, EndpointBalancer};
pub use selector::{Endpoint, EndpointSelector, EndpointSet};
pub use updater::{LifecycleState, ServiceDescriptorsUpdater};
