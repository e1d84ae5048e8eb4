//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 主配置结构，包含轮询配置和日志配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 轮询器配置
    #[serde(default)]
    pub poller: PollerConfig,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 轮询器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollerConfig {
    /// 检测目标URL
    #[serde(default = "default_url")]
    pub url: String,
    /// 检测间隔（秒）
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    /// 结果日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// 请求超时时间（秒），不设置时沿用HTTP客户端默认行为
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

impl PollerConfig {
    /// 检测间隔
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    /// 请求超时时间
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            check_interval_seconds: default_check_interval(),
            log_file: default_log_file(),
            request_timeout_seconds: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 是否使用JSON格式
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

// 默认值函数
fn default_url() -> String {
    "https://example.com".to_string()
}
fn default_check_interval() -> u64 {
    600 // 10分钟
}
fn default_log_file() -> PathBuf {
    PathBuf::from("website_availability_log.txt")
}
fn default_log_level() -> String {
    "info".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    let poller = &config.poller;

    // 验证URL格式
    if !poller.url.starts_with("http://") && !poller.url.starts_with("https://") {
        return Err(format!("检测目标URL格式无效: {}", poller.url));
    }

    if poller.check_interval_seconds == 0 {
        return Err("检测间隔不能为0".to_string());
    }

    if poller.request_timeout_seconds == Some(0) {
        return Err("请求超时时间不能为0".to_string());
    }

    if poller.log_file.as_os_str().is_empty() {
        return Err("结果日志文件路径不能为空".to_string());
    }

    // 验证日志级别
    let valid_log_levels = ["debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.logging.level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.logging.level, valid_log_levels
        ));
    }

    Ok(())
}
