//! 可用性检测结果数据结构
//!
//! 定义单次检测的结果类型、结论枚举以及结果行格式

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 结果行中时间戳的格式
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// 检测结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// 收到2xx响应
    Available,
    /// 收到非2xx响应
    Unavailable,
    /// 未能获得响应
    Error,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Available => write!(f, "Available"),
            Outcome::Unavailable => write!(f, "Unavailable"),
            Outcome::Error => write!(f, "Error"),
        }
    }
}

impl Outcome {
    /// 根据HTTP状态码判定结论
    pub fn from_status_code(status_code: u16) -> Self {
        if (200..300).contains(&status_code) {
            Outcome::Available
        } else {
            Outcome::Unavailable
        }
    }

    /// 是否为错误结论，错误结论以error级别写入日志流
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error)
    }
}

/// 单次检测结果
///
/// 每个周期构造一次，格式化为一行后写入各个结果接收器，随后丢弃。
/// `status_code` 仅在收到响应时存在，`error_detail` 仅在 [`Outcome::Error`] 时存在。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// 检测完成（或失败）的时间
    pub timestamp: DateTime<Utc>,
    /// 检测目标URL
    pub target: String,
    /// 检测结论
    pub outcome: Outcome,
    /// HTTP状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl CheckResult {
    /// 由收到的HTTP状态码构造结果
    pub fn from_status(target: impl Into<String>, status_code: u16) -> Self {
        Self {
            timestamp: Utc::now(),
            target: target.into(),
            outcome: Outcome::from_status_code(status_code),
            status_code: Some(status_code),
            error_detail: None,
        }
    }

    /// 由请求失败信息构造结果
    ///
    /// 空的错误信息会被替换为占位描述，保证 `error_detail` 非空。
    pub fn from_error(target: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };

        Self {
            timestamp: Utc::now(),
            target: target.into(),
            outcome: Outcome::Error,
            status_code: None,
            error_detail: Some(message),
        }
    }

    /// 覆盖时间戳
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// 格式化为结果行（不含换行符）
    pub fn log_line(&self) -> String {
        let timestamp = self.timestamp.format(TIMESTAMP_FORMAT);
        match (self.outcome, self.status_code) {
            (Outcome::Available | Outcome::Unavailable, Some(code)) => format!(
                "{timestamp}: {} is {} (Status Code: {code})",
                self.target, self.outcome
            ),
            _ => format!(
                "{timestamp}: Error while checking {}. Exception: {}",
                self.target,
                self.error_detail.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log_line())
    }
}
