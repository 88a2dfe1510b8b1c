//! 服务描述符更新器
//!
//! 管理 启动/停止 生命周期，并按固定间隔驱动刷新周期。
//!
//! # 生命周期
//!
//! `Created -> Started -> Stopped`，`Stopped` 为终态：
//! - 重复调用 `start()` 返回 `AlreadyStarted`，停止后再启动返回 `AlreadyStopped`
//! - 未启动就调用 `stop()` 返回 `NotStarted`，重复调用 `stop()` 直接成功
//! - `stop()` 会等待正在执行的周期完成，返回后不会再有任何通知
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use flare_discovery_client::balancer::EndpointPool;
//! use flare_discovery_client::discovery::{DiscoveryConfig, InMemoryBackend, ServiceDescriptorsUpdater};
//!
//! # async fn run() -> flare_discovery_client::Result<()> {
//! let pool = Arc::new(EndpointPool::default());
//! let updater = ServiceDescriptorsUpdater::new(
//!     pool.clone(),
//!     DiscoveryConfig::new("apple", "general"),
//!     Arc::new(InMemoryBackend::new()),
//!     tokio::runtime::Handle::current(),
//! )?;
//!
//! updater.start()?;
//! // ...
//! updater.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, debug, info, info_span};

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::cycle::{CycleReport, RefreshCycle};
use crate::discovery::notifier::{BalancerNotifier, EndpointBalancer};
use crate::error::{FlareError, Result};

/// 更新器生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Started,
    Stopped,
}

enum Lifecycle {
    Created,
    Started {
        shutdown_tx: watch::Sender<bool>,
        finished_rx: watch::Receiver<bool>,
    },
    Stopped {
        finished_rx: watch::Receiver<bool>,
    },
}

impl Lifecycle {
    fn state(&self) -> LifecycleState {
        match self {
            Lifecycle::Created => LifecycleState::Created,
            Lifecycle::Started { .. } => LifecycleState::Started,
            Lifecycle::Stopped { .. } => LifecycleState::Stopped,
        }
    }
}

/// 服务描述符更新器
///
/// 调度设施（tokio 运行时句柄）由外部注入，多个更新器可以共享同一个运行时。
/// 同一个更新器的刷新周期严格串行，负载均衡器按周期顺序收到通知。
pub struct ServiceDescriptorsUpdater {
    config: DiscoveryConfig,
    cycle: Arc<RefreshCycle>,
    // 同一实例的刷新周期互斥执行
    guard: Arc<tokio::sync::Mutex<()>>,
    executor: Handle,
    lifecycle: Mutex<Lifecycle>,
}

impl ServiceDescriptorsUpdater {
    /// 创建更新器
    ///
    /// # 参数
    /// * `balancer` - 接收端点集合的负载均衡器
    /// * `config` - 服务发现配置（创建时校验）
    /// * `backend` - 注册中心客户端
    /// * `executor` - 驱动后台刷新的运行时句柄
    pub fn new(
        balancer: Arc<dyn EndpointBalancer>,
        config: DiscoveryConfig,
        backend: Arc<dyn DiscoveryBackend>,
        executor: Handle,
    ) -> Result<Self> {
        config.validate()?;
        let notifier = BalancerNotifier::new(balancer);
        let cycle = Arc::new(RefreshCycle::new(backend, &config, notifier));

        Ok(Self {
            config,
            cycle,
            guard: Arc::new(tokio::sync::Mutex::new(())),
            executor,
            lifecycle: Mutex::new(Lifecycle::Created),
        })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// 当前生命周期状态
    pub fn state(&self) -> LifecycleState {
        self.lock_lifecycle().state()
    }

    /// 启动更新器
    ///
    /// 立即触发一次刷新，之后按配置的间隔刷新。不等待第一次拉取完成。
    pub fn start(&self) -> Result<()> {
        let mut lifecycle = self.lock_lifecycle();
        match *lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Started { .. } => {
                return Err(FlareError::already_started(&self.config.service_type));
            }
            Lifecycle::Stopped { .. } => {
                return Err(FlareError::already_stopped(&self.config.service_type));
            }
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (finished_tx, finished_rx) = watch::channel(false);
        let span = info_span!(
            "descriptors_updater",
            service_type = %self.config.service_type,
            pool = %self.config.pool
        );

        self.executor.spawn(
            refresh_loop(
                self.cycle.clone(),
                self.guard.clone(),
                self.config.refresh_interval(),
                shutdown_rx,
                finished_tx,
            )
            .instrument(span),
        );

        *lifecycle = Lifecycle::Started {
            shutdown_tx,
            finished_rx,
        };

        info!(
            service_type = %self.config.service_type,
            pool = %self.config.pool,
            refresh_interval_secs = self.config.refresh_interval,
            "Service descriptors updater started"
        );
        Ok(())
    }

    /// 停止更新器
    ///
    /// 取消后续调度，并等待正在执行的周期（包括其通知）完成
    pub async fn stop(&self) -> Result<()> {
        let mut finished_rx = {
            let mut lifecycle = self.lock_lifecycle();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Created) {
                Lifecycle::Created => {
                    return Err(FlareError::not_started(&self.config.service_type));
                }
                Lifecycle::Started {
                    shutdown_tx,
                    finished_rx,
                } => {
                    let _ = shutdown_tx.send(true);
                    *lifecycle = Lifecycle::Stopped {
                        finished_rx: finished_rx.clone(),
                    };
                    finished_rx
                }
                Lifecycle::Stopped { finished_rx } => {
                    *lifecycle = Lifecycle::Stopped {
                        finished_rx: finished_rx.clone(),
                    };
                    finished_rx
                }
            }
        };

        // 发送端被丢弃说明刷新任务已经退出
        let _ = finished_rx.wait_for(|finished| *finished).await;
        // 等待手动触发的刷新完成
        drop(self.guard.lock().await);

        info!(
            service_type = %self.config.service_type,
            pool = %self.config.pool,
            "Service descriptors updater stopped"
        );
        Ok(())
    }

    /// 立即执行一次刷新
    ///
    /// 只在 Started 状态可用，与定时刷新共享同一把执行锁
    pub async fn refresh_now(&self) -> Result<CycleReport> {
        self.ensure_started()?;
        let _permit = self.guard.lock().await;
        self.ensure_started()?;
        self.cycle.run().await
    }

    fn ensure_started(&self) -> Result<()> {
        match self.state() {
            LifecycleState::Started => Ok(()),
            LifecycleState::Created => Err(FlareError::not_started(&self.config.service_type)),
            LifecycleState::Stopped => Err(FlareError::already_stopped(&self.config.service_type)),
        }
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn refresh_loop(
    cycle: Arc<RefreshCycle>,
    guard: Arc<tokio::sync::Mutex<()>>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
    finished_tx: watch::Sender<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            // 更新器被丢弃时发送端随之关闭，同样退出
            _ = shutdown_rx.changed() => break,
            _ = ticker.tick() => {
                let _permit = guard.lock().await;
                if *shutdown_rx.borrow() {
                    break;
                }
                // 失败已在周期内记录，下一个 tick 重试
                let _ = cycle.run().await;
            }
        }
    }

    debug!("Refresh loop exited");
    let _ = finished_tx.send(true);
}
