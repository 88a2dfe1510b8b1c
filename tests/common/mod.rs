//! 集成测试共享的测试替身和固定数据

#![allow(dead_code)]

use async_trait::async_trait;
use flare_discovery_client::{
    DiscoveryBackend, Endpoint, EndpointBalancer, EndpointSet, FlareError, ServiceDescriptor,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

pub fn endpoint(s: &str) -> Endpoint {
    s.parse().expect("valid test endpoint")
}

pub fn apple_1() -> ServiceDescriptor {
    ServiceDescriptor::new("node-A", "apple", "pool")
        .with_location("location")
        .with_announcement("http", "http://apple-a.example.com")
}

pub fn apple_2() -> ServiceDescriptor {
    ServiceDescriptor::new("node-B", "apple", "pool")
        .with_location("location")
        .with_announcement("http", "http://apple-c.example.com")
        .with_announcement("https", "https://apple-b.example.com")
}

pub fn different_type() -> ServiceDescriptor {
    ServiceDescriptor::new("node-A", "banana", "pool")
        .with_location("location")
        .with_announcement("https", "https://banana.example.com")
}

pub fn different_pool() -> ServiceDescriptor {
    ServiceDescriptor::new("node-B", "apple", "fool")
        .with_location("location")
        .with_announcement("http", "http://apple-fool.example.com")
}

/// 记录每次通知的负载均衡器
#[derive(Default)]
pub struct RecordingBalancer {
    updates: Mutex<Vec<EndpointSet>>,
    notify: Notify,
    fail: AtomicBool,
}

impl RecordingBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后的每次更新都返回错误（仍然记录）
    pub fn fail_updates(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn updates(&self) -> Vec<EndpointSet> {
        self.updates.lock().expect("updates lock").clone()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().expect("updates lock").len()
    }

    /// 等待至少收到 `count` 次通知
    pub async fn wait_for_updates(&self, count: usize) -> Vec<EndpointSet> {
        tokio::time::timeout(Duration::from_secs(60), async {
            loop {
                if self.update_count() >= count {
                    return self.updates();
                }
                self.notify.notified().await;
            }
        })
        .await
        .expect("timed out waiting for balancer updates")
    }
}

impl EndpointBalancer for RecordingBalancer {
    fn update_endpoints(&self, endpoints: &EndpointSet) -> flare_discovery_client::Result<()> {
        self.updates
            .lock()
            .expect("updates lock")
            .push(endpoints.clone());
        self.notify.notify_one();
        if self.fail.load(Ordering::SeqCst) {
            return Err(FlareError::balancer_rejected("rejected by test balancer"));
        }
        Ok(())
    }
}

/// 前 N 次拉取失败的注册中心
pub struct FlakyBackend {
    descriptors: Vec<ServiceDescriptor>,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakyBackend {
    pub fn new(descriptors: Vec<ServiceDescriptor>, failures: usize) -> Self {
        Self {
            descriptors,
            failures_left: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiscoveryBackend for FlakyBackend {
    async fn discover(
        &self,
        service_type: &str,
    ) -> flare_discovery_client::Result<Vec<ServiceDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(FlareError::registry_unavailable("registry is down"));
        }
        Ok(self
            .descriptors
            .iter()
            .filter(|d| d.service_type == service_type)
            .cloned()
            .collect())
    }
}

/// 拉取时先等待一段时间的注册中心，进入拉取时发出信号，并记录最大并发拉取数
pub struct SlowBackend {
    descriptors: Vec<ServiceDescriptor>,
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
    pub entered: Notify,
}

impl SlowBackend {
    pub fn new(descriptors: Vec<ServiceDescriptor>, delay: Duration) -> Self {
        Self {
            descriptors,
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
        }
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiscoveryBackend for SlowBackend {
    async fn discover(
        &self,
        _service_type: &str,
    ) -> flare_discovery_client::Result<Vec<ServiceDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);
        self.entered.notify_one();
        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(self.descriptors.clone())
    }
}
