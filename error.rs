//! 错误类型
//!
//! 树和最近邻搜索本身不会失败；这里只覆盖配置加载、文件输出和 JSON 导出

use thiserror::Error;

/// geoindex 外围功能的错误类型
#[derive(Debug, Error)]
pub enum GeoIndexError {
    /// 配置加载或解析失败
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置序列化失败
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置内容不合法
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GeoIndexError>;
