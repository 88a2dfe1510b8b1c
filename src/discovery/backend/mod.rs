//! 注册中心客户端抽象和实现

pub mod memory;

use async_trait::async_trait;

use crate::discovery::descriptor::ServiceDescriptor;
use crate::error::Result;

pub use memory::InMemoryBackend;

/// 注册中心客户端 trait
///
/// 实际的拉取协议由实现方负责，超时策略同样由实现方决定。
/// 由于需要动态分发（dyn），使用 async-trait
#[async_trait]
pub trait DiscoveryBackend: Send + Sync {
    /// 拉取指定服务类型当前的全部描述符
    ///
    /// # 参数
    /// * `service_type` - 服务类型
    ///
    /// # 返回
    /// 返回描述符快照；临时性失败返回 `RegistryFetchFailed`
    async fn discover(&self, service_type: &str) -> Result<Vec<ServiceDescriptor>>;
}
