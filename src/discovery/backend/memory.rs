//! 内存注册中心后端
//!
//! 用于测试或静态配置的服务列表

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::descriptor::ServiceDescriptor;
use crate::error::{FlareError, Result};

/// 内存注册中心后端
///
/// 克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    services: Arc<RwLock<HashMap<Uuid, ServiceDescriptor>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 数组加载描述符
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptors: Vec<ServiceDescriptor> = serde_json::from_str(json)?;
        let backend = Self::new();
        for descriptor in descriptors {
            backend.add_service(descriptor);
        }
        Ok(backend)
    }

    /// 添加（或替换同 ID 的）服务描述符
    pub fn add_service(&self, descriptor: ServiceDescriptor) {
        let mut services = self
            .services
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        services.insert(descriptor.id, descriptor);
    }

    /// 移除服务描述符
    pub fn remove_service(&self, id: &Uuid) -> Option<ServiceDescriptor> {
        let mut services = self
            .services
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        services.remove(id)
    }

    /// 清空所有描述符
    pub fn clear(&self) {
        self.services
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// 当前所有描述符
    pub fn services(&self) -> Vec<ServiceDescriptor> {
        self.services
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DiscoveryBackend for InMemoryBackend {
    async fn discover(&self, service_type: &str) -> Result<Vec<ServiceDescriptor>> {
        let services = self.services.read().map_err(|_| {
            FlareError::registry_fetch_failed(service_type, "in-memory registry lock poisoned")
        })?;
        Ok(services
            .values()
            .filter(|d| d.service_type == service_type)
            .cloned()
            .collect())
    }
}
