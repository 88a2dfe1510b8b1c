//! 错误类型转换实现

use super::{ErrorBuilder, ErrorCode, FlareError};
use std::io;

impl From<io::Error> for FlareError {
    fn from(err: io::Error) -> Self {
        FlareError::io(err.to_string())
    }
}

impl From<serde_json::Error> for FlareError {
    fn from(err: serde_json::Error) -> Self {
        ErrorBuilder::new(ErrorCode::DeserializationError, "JSON 反序列化错误")
            .details(err.to_string())
            .build_error()
    }
}

impl From<toml::de::Error> for FlareError {
    fn from(err: toml::de::Error) -> Self {
        ErrorBuilder::new(ErrorCode::ConfigurationError, "TOML 配置解析错误")
            .details(err.to_string())
            .build_error()
    }
}

impl From<http::uri::InvalidUri> for FlareError {
    fn from(err: http::uri::InvalidUri) -> Self {
        FlareError::localized(ErrorCode::InvalidAnnouncement, err.to_string())
    }
}
