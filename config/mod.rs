use crate::error::GeoIndexError;
use crate::rtree::DEFAULT_MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// geoindex 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoIndexConfig {
    /// R-tree 配置
    #[serde(default)]
    pub tree: TreeConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// R-tree 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// 节点最大条目数，最小条目数取其 20%
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

/// 允许的最小节点容量
const MIN_MAX_ENTRIES: usize = 4;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// ============================================================================
// 默认值函数
// ============================================================================

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stdout".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            output: default_log_output(),
            log_file: None,
        }
    }
}

impl GeoIndexConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选，TOML 格式）
    /// 3. 环境变量（GEOINDEX__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use geoindex::config::GeoIndexConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = GeoIndexConfig::from_file("geoindex.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            // 1. 加载默认配置（内嵌）
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            // 2. 加载用户配置（可选，不存在不报错）
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            // 3. 加载环境变量
            .add_source(config::Environment::with_prefix("GEOINDEX").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查节点容量、日志级别以及文件日志的路径
    pub fn validate(&self) -> crate::Result<()> {
        if self.tree.max_entries < MIN_MAX_ENTRIES {
            return Err(GeoIndexError::InvalidConfig(format!(
                "tree.max_entries is {}, must be at least {}",
                self.tree.max_entries, MIN_MAX_ENTRIES
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(GeoIndexError::InvalidConfig(format!(
                "Invalid log level: '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        match self.logging.output.as_str() {
            "stdout" => {}
            "file" => {
                if self.logging.log_file.is_none() {
                    return Err(GeoIndexError::InvalidConfig(
                        "Log output is 'file' but log_file path is not specified".to_string(),
                    ));
                }
            }
            other => {
                return Err(GeoIndexError::InvalidConfig(format!(
                    "Invalid log output: '{}'. Must be one of: stdout, file",
                    other
                )))
            }
        }

        Ok(())
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("📋 geoindex configuration:");
        println!(
            "   Max Entries: {} (min {})",
            self.tree.max_entries,
            self.tree.max_entries * 20 / 100
        );
        println!("   Log Level:   {}", self.logging.level);
        println!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            println!("   Log File:    {}", log_file.display());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeoIndexConfig::default();
        assert_eq!(config.tree.max_entries, 32);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.output, "stdout");
        assert!(config.logging.log_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GeoIndexConfig::default();

        // 节点容量过小
        config.tree.max_entries = 3;
        assert!(matches!(
            config.validate(),
            Err(GeoIndexError::InvalidConfig(_))
        ));
        config.tree.max_entries = 4;
        assert!(config.validate().is_ok());

        // 无效日志级别
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        // 文件输出缺少路径
        config.logging.output = "file".to_string();
        assert!(config.validate().is_err());
        config.logging.log_file = Some(PathBuf::from("./logs/geoindex.log"));
        assert!(config.validate().is_ok());

        // 无效输出
        config.logging.output = "syslog".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_output_without_path_is_rejected() {
        let mut config = GeoIndexConfig::default();
        config.logging.output = "file".to_string();
        match config.validate() {
            Err(GeoIndexError::InvalidConfig(msg)) => assert!(msg.contains("log_file")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = GeoIndexConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config, GeoIndexConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut config = GeoIndexConfig::default();
        config.tree.max_entries = 12;
        config.logging.level = "debug".to_string();

        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // 保存
        config.save_to_file(path).unwrap();

        // 加载
        let loaded = GeoIndexConfig::from_file(path).unwrap();
        assert_eq!(loaded.tree.max_entries, 12);
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(temp_file.path(), "[tree]\nmax_entries = 8\n").unwrap();

        let loaded = GeoIndexConfig::from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.tree.max_entries, 8);
        assert_eq!(loaded.logging, LoggingConfig::default());
    }
}
