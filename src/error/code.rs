//! 错误代码和错误类别定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 错误代码枚举
///
/// 错误代码按类别分组，每个类别占用1000个代码范围：
/// - 1000-1999: 注册中心相关错误
/// - 2000-2999: 服务描述符相关错误
/// - 3000-3999: 负载均衡器相关错误
/// - 4000-4999: 生命周期相关错误
/// - 6000-6999: 系统相关错误
/// - 8000-8999: 序列化相关错误
/// - 9000-9999: 通用错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ErrorCode {
    // ============================================================
    // 注册中心相关错误 (1000-1999)
    // ============================================================
    RegistryFetchFailed = 1000,
    RegistryUnavailable = 1001,
    ServiceTypeUnknown = 1002,

    // ============================================================
    // 服务描述符相关错误 (2000-2999)
    // ============================================================
    MalformedDescriptor = 2000,
    InvalidAnnouncement = 2001,

    // ============================================================
    // 负载均衡器相关错误 (3000-3999)
    // ============================================================
    NotifierFailed = 3000,
    BalancerRejected = 3001,
    NoEndpointAvailable = 3002,

    // ============================================================
    // 生命周期相关错误 (4000-4999)
    // ============================================================
    AlreadyStarted = 4000,
    NotStarted = 4001,
    AlreadyStopped = 4002,

    // ============================================================
    // 系统相关错误 (6000-6999)
    // ============================================================
    InternalError = 6000,
    ConfigurationError = 6001,

    // ============================================================
    // 序列化相关错误 (8000-8999)
    // ============================================================
    DeserializationError = 8000,

    // ============================================================
    // 通用错误 (9000-9999)
    // ============================================================
    GeneralError = 9000,
    UnknownError = 9999,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorCode {
    /// 获取错误代码的数字值
    #[inline]
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }

    /// 从数字值创建错误代码
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            1000 => Some(ErrorCode::RegistryFetchFailed),
            1001 => Some(ErrorCode::RegistryUnavailable),
            1002 => Some(ErrorCode::ServiceTypeUnknown),
            2000 => Some(ErrorCode::MalformedDescriptor),
            2001 => Some(ErrorCode::InvalidAnnouncement),
            3000 => Some(ErrorCode::NotifierFailed),
            3001 => Some(ErrorCode::BalancerRejected),
            3002 => Some(ErrorCode::NoEndpointAvailable),
            4000 => Some(ErrorCode::AlreadyStarted),
            4001 => Some(ErrorCode::NotStarted),
            4002 => Some(ErrorCode::AlreadyStopped),
            6000 => Some(ErrorCode::InternalError),
            6001 => Some(ErrorCode::ConfigurationError),
            8000 => Some(ErrorCode::DeserializationError),
            9000 => Some(ErrorCode::GeneralError),
            9999 => Some(ErrorCode::UnknownError),
            _ => None,
        }
    }

    /// 获取错误代码的英文标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RegistryFetchFailed => "REGISTRY_FETCH_FAILED",
            ErrorCode::RegistryUnavailable => "REGISTRY_UNAVAILABLE",
            ErrorCode::ServiceTypeUnknown => "SERVICE_TYPE_UNKNOWN",
            ErrorCode::MalformedDescriptor => "MALFORMED_DESCRIPTOR",
            ErrorCode::InvalidAnnouncement => "INVALID_ANNOUNCEMENT",
            ErrorCode::NotifierFailed => "NOTIFIER_FAILED",
            ErrorCode::BalancerRejected => "BALANCER_REJECTED",
            ErrorCode::NoEndpointAvailable => "NO_ENDPOINT_AVAILABLE",
            ErrorCode::AlreadyStarted => "ALREADY_STARTED",
            ErrorCode::NotStarted => "NOT_STARTED",
            ErrorCode::AlreadyStopped => "ALREADY_STOPPED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::DeserializationError => "DESERIALIZATION_ERROR",
            ErrorCode::GeneralError => "GENERAL_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// 获取错误代码的类别（用于错误分类）
    pub fn category(&self) -> ErrorCategory {
        match self.as_u32() {
            1000..=1999 => ErrorCategory::Registry,
            2000..=2999 => ErrorCategory::Descriptor,
            3000..=3999 => ErrorCategory::Balancer,
            4000..=4999 => ErrorCategory::Lifecycle,
            6000..=6999 => ErrorCategory::System,
            8000..=8999 => ErrorCategory::Serialization,
            _ => ErrorCategory::General,
        }
    }

    /// 判断是否为可重试的错误
    ///
    /// 可重试的错误会在下一个刷新周期自动重试
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::RegistryFetchFailed
                | ErrorCode::RegistryUnavailable
                | ErrorCode::NotifierFailed
        )
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Registry,
    Descriptor,
    Balancer,
    Lifecycle,
    System,
    Serialization,
    General,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Registry => write!(f, "REGISTRY"),
            ErrorCategory::Descriptor => write!(f, "DESCRIPTOR"),
            ErrorCategory::Balancer => write!(f, "BALANCER"),
            ErrorCategory::Lifecycle => write!(f, "LIFECYCLE"),
            ErrorCategory::System => write!(f, "SYSTEM"),
            ErrorCategory::Serialization => write!(f, "SERIALIZATION"),
            ErrorCategory::General => write!(f, "GENERAL"),
        }
    }
}
