//! 日志初始化
//!
//! 基于 tracing-subscriber，RUST_LOG 优先于配置中的级别

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{ErrorCode, InfraResult, InfraResultExt, Result};

/// 初始化全局日志订阅者
///
/// 重复初始化会返回错误而不是 panic
pub fn init(config: &LoggingConfig) -> Result<()> {
    try_init(config).into_flare(ErrorCode::ConfigurationError, "failed to initialize logging")
}

fn try_init(config: &LoggingConfig) -> InfraResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(fmt_layer).try_init()?;
    // 桥接 log crate 的记录；已有 logger 时忽略
    let _ = tracing_log::LogTracer::init();
    Ok(())
}
