//! 负载均衡模块
//!
//! 提供一个接收端点集合通知的参考实现，并按策略从中选择一个端点。
//! 端点在集合中的重数即为其权重。

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::discovery::notifier::EndpointBalancer;
use crate::discovery::selector::{Endpoint, EndpointSet};
use crate::error::Result;

/// 负载均衡策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalanceStrategy {
    /// 轮询
    #[default]
    RoundRobin,
    /// 随机
    Random,
    /// 按 key 哈希取模
    ///
    /// 成员不变时同一个 key 总是落到同一个端点；成员变化后多数 key 会迁移，
    /// 不是环形一致性哈希。
    ConsistentHash,
}

impl std::str::FromStr for LoadBalanceStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "round_robin" | "roundrobin" => Ok(LoadBalanceStrategy::RoundRobin),
            "random" => Ok(LoadBalanceStrategy::Random),
            "consistent_hash" | "consistenthash" => Ok(LoadBalanceStrategy::ConsistentHash),
            _ => Err(format!("Unknown load balance strategy: {}", s)),
        }
    }
}

/// 端点池
///
/// 保存最近一次通知的端点集合
pub struct EndpointPool {
    strategy: LoadBalanceStrategy,
    // 按字符串排序并按重数展开
    endpoints: RwLock<Vec<Endpoint>>,
    round_robin_index: AtomicUsize,
    update_count: AtomicU64,
}

impl EndpointPool {
    /// 创建新的端点池
    pub fn new(strategy: LoadBalanceStrategy) -> Self {
        Self {
            strategy,
            endpoints: RwLock::new(Vec::new()),
            round_robin_index: AtomicUsize::new(0),
            update_count: AtomicU64::new(0),
        }
    }

    pub fn strategy(&self) -> LoadBalanceStrategy {
        self.strategy
    }

    /// 当前端点快照（按重数展开）
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.endpoints
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 收到的更新次数
    pub fn update_count(&self) -> u64 {
        self.update_count.load(Ordering::Acquire)
    }

    /// 选择端点
    ///
    /// `key` 仅在 `ConsistentHash` 策略下使用，按展开后的端点数取模
    pub fn select(&self, key: Option<&str>) -> Option<Endpoint> {
        let endpoints = self
            .endpoints
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if endpoints.is_empty() {
            return None;
        }

        let index = match self.strategy {
            LoadBalanceStrategy::RoundRobin => {
                self.round_robin_index.fetch_add(1, Ordering::Relaxed) % endpoints.len()
            }
            LoadBalanceStrategy::Random => rand::thread_rng().gen_range(0..endpoints.len()),
            LoadBalanceStrategy::ConsistentHash => {
                let mut hasher = DefaultHasher::new();
                key.unwrap_or("").hash(&mut hasher);
                (hasher.finish() as usize) % endpoints.len()
            }
        };

        endpoints.get(index).cloned()
    }
}

impl Default for EndpointPool {
    fn default() -> Self {
        Self::new(LoadBalanceStrategy::RoundRobin)
    }
}

impl EndpointBalancer for EndpointPool {
    fn update_endpoints(&self, endpoints: &EndpointSet) -> Result<()> {
        let mut expanded: Vec<Endpoint> = endpoints.iter_expanded().cloned().collect();
        expanded.sort();

        let mut current = self
            .endpoints
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = expanded;
        self.update_count.fetch_add(1, Ordering::AcqRel);

        tracing::debug!(
            strategy = ?self.strategy,
            endpoints = current.len(),
            "Endpoint pool updated"
        );
        Ok(())
    }
}
