//! 日志初始化测试（独立测试二进制，避免与其他测试争用全局订阅者）

use flare_discovery_client::{ErrorCode, LoggingConfig, logging};

/// 测试：重复初始化返回错误而不是 panic
#[test]
fn test_init_twice() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        json: true,
    };

    logging::init(&config).expect("first init should succeed");
    tracing::info!(service_type = "apple", "logging initialized");

    let err = logging::init(&config).expect_err("second init must fail");
    assert_eq!(err.code(), Some(ErrorCode::ConfigurationError));
}
