//! 服务发现客户端统一错误类型

use super::code::ErrorCode;
use std::collections::HashMap;
use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug, Clone)]
pub enum FlareError {
    /// 带错误代码的业务错误
    #[error("错误 [{code}] {reason}", code = .code.as_str())]
    Localized {
        code: ErrorCode,
        reason: String,
        details: Option<String>,
        params: Option<HashMap<String, String>>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// 系统错误（内部错误）
    #[error("系统错误: {0}")]
    System(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl FlareError {
    /// 创建带错误代码的错误
    pub fn localized(code: ErrorCode, reason: impl Into<String>) -> Self {
        FlareError::Localized {
            code,
            reason: reason.into(),
            details: None,
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建系统错误
    pub fn system(msg: impl Into<String>) -> Self {
        FlareError::System(msg.into())
    }

    /// 创建 IO 错误
    pub fn io(msg: impl Into<String>) -> Self {
        FlareError::Io(msg.into())
    }

    // ============================================================
    // 便捷方法：注册中心相关错误
    // ============================================================

    /// 拉取服务描述符失败
    pub fn registry_fetch_failed(service_type: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert("service_type".to_string(), service_type.into());
        Self::Localized {
            code: ErrorCode::RegistryFetchFailed,
            reason: reason.into(),
            details: None,
            params: Some(params),
            timestamp: chrono::Utc::now(),
        }
    }

    /// 注册中心不可用
    pub fn registry_unavailable(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::RegistryUnavailable, reason)
    }

    // ============================================================
    // 便捷方法：负载均衡器相关错误
    // ============================================================

    /// 通知负载均衡器失败
    pub fn notifier_failed(service_type: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert("service_type".to_string(), service_type.into());
        Self::Localized {
            code: ErrorCode::NotifierFailed,
            reason: reason.into(),
            details: None,
            params: Some(params),
            timestamp: chrono::Utc::now(),
        }
    }

    /// 负载均衡器拒绝更新
    pub fn balancer_rejected(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::BalancerRejected, reason)
    }

    // ============================================================
    // 便捷方法：生命周期相关错误
    // ============================================================

    pub fn already_started(service_type: impl Into<String>) -> Self {
        let service_type = service_type.into();
        Self::localized(
            ErrorCode::AlreadyStarted,
            format!("updater for {} already started", service_type),
        )
    }

    pub fn not_started(service_type: impl Into<String>) -> Self {
        let service_type = service_type.into();
        Self::localized(
            ErrorCode::NotStarted,
            format!("updater for {} has not been started", service_type),
        )
    }

    pub fn already_stopped(service_type: impl Into<String>) -> Self {
        let service_type = service_type.into();
        Self::localized(
            ErrorCode::AlreadyStopped,
            format!("updater for {} is stopped and cannot be restarted", service_type),
        )
    }

    // ============================================================
    // 便捷方法：配置
    // ============================================================

    /// 配置错误
    pub fn configuration_error(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::ConfigurationError, reason)
    }

    // ============================================================
    // 信息获取方法
    // ============================================================

    /// 获取错误代码
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            FlareError::Localized { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 获取错误原因
    pub fn reason(&self) -> &str {
        match self {
            FlareError::Localized { reason, .. } => reason,
            FlareError::System(msg) => msg,
            FlareError::Io(msg) => msg,
        }
    }

    /// 获取错误详情
    pub fn details(&self) -> Option<&str> {
        match self {
            FlareError::Localized { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    /// 获取错误参数
    pub fn param(&self, key: &str) -> Option<&str> {
        match self {
            FlareError::Localized { params, .. } => params
                .as_ref()
                .and_then(|p| p.get(key))
                .map(String::as_str),
            _ => None,
        }
    }

    /// 判断是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        match self {
            FlareError::Io(_) => true,
            _ => self.code().map(|code| code.is_retryable()).unwrap_or(false),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, FlareError>;
