//! HTTP可用性检测器实现
//!
//! 对目标URL发起一次GET请求并返回响应状态码

use crate::error::{ProbeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;

/// 检测器trait，定义单次探测接口
///
/// 实现者只负责"是否拿到响应"：拿到响应时返回状态码（无论是否2xx），
/// 拿不到时返回 [`ProbeError::Transport`]。结论判定由调用方完成。
#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// 对目标发起一次GET请求
    ///
    /// # 参数
    /// * `url` - 检测目标URL
    ///
    /// # 返回
    /// * `Result<u16, ProbeError>` - 响应状态码或传输错误
    async fn check(&self, url: &str) -> std::result::Result<u16, ProbeError>;
}

/// 基于reqwest的HTTP检测器
pub struct HttpHealthChecker {
    /// HTTP客户端
    client: Client,
}

impl HttpHealthChecker {
    /// 创建新的HTTP检测器
    ///
    /// # 参数
    /// * `timeout` - 请求超时时间，`None` 表示不额外限制
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(ProbeError::ClientBuild)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HealthChecker for HttpHealthChecker {
    async fn check(&self, url: &str) -> std::result::Result<u16, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(describe_request_error(&e)))?;

        Ok(response.status().as_u16())
    }
}

/// 把reqwest错误及其错误链拼接为可读信息
///
/// reqwest 顶层信息通常只有 "error sending request for url (...)"，
/// 真正的原因（连接被拒绝、DNS失败、证书错误）在 source 链里。
fn describe_request_error(error: &reqwest::Error) -> String {
    let mut message = if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    };

    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !cause_text.is_empty() && !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}
