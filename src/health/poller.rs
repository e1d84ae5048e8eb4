//! 轮询器模块
//!
//! 按固定间隔对单个目标执行一次检测，并把结果交给结果接收器。
//! 检测周期严格串行：上一周期的请求与写出完成之前不会开始下一周期。

use crate::config::PollerConfig;
use crate::error::Result;
use crate::health::{CheckResult, HealthChecker, HttpHealthChecker};
use crate::sink::{FileSink, ResultSink, SinkSet, TracingSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// 单目标可用性轮询器
pub struct Poller {
    /// 检测目标URL
    url: String,
    /// 检测间隔
    interval: Duration,
    /// 检测器
    checker: Arc<dyn HealthChecker>,
    /// 结果接收器
    sink: Arc<dyn ResultSink>,
}

impl Poller {
    /// 创建新的轮询器
    ///
    /// # 参数
    /// * `config` - 轮询配置（URL、间隔）
    /// * `checker` - 检测器
    /// * `sink` - 结果接收器
    pub fn new(
        config: &PollerConfig,
        checker: Arc<dyn HealthChecker>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            url: config.url.clone(),
            interval: config.check_interval(),
            checker,
            sink,
        }
    }

    /// 按配置组装默认轮询器：reqwest检测器，先写日志流再写结果文件
    pub fn from_config(config: &PollerConfig) -> Result<Self> {
        let checker = Arc::new(HttpHealthChecker::new(config.request_timeout())?);
        let sinks = SinkSet::new()
            .with_sink(Arc::new(TracingSink::new()))
            .with_sink(Arc::new(FileSink::new(&config.log_file)));

        Ok(Self::new(config, checker, Arc::new(sinks)))
    }

    /// 覆盖检测间隔
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 检测目标URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 检测间隔
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 执行一次检测并写出结果
    ///
    /// 请求进行中收到取消信号时立即放弃请求，不产生任何记录并返回 `None`；
    /// 其余情况（2xx、非2xx、传输错误）都会产生一条记录并返回 `Some`。
    /// 接收器写出失败只记录告警，不向外传播。
    pub async fn check_once(&self, cancel: &CancellationToken) -> Option<CheckResult> {
        debug!("开始检测: {}", self.url);

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("检测请求被取消: {}", self.url);
                return None;
            }
            response = self.checker.check(&self.url) => response,
        };

        let result = match response {
            Ok(status_code) => CheckResult::from_status(self.url.as_str(), status_code),
            Err(e) => CheckResult::from_error(self.url.as_str(), e.to_string()),
        };

        if let Err(e) = self.sink.record(&result).await {
            warn!("写出检测结果失败: {}", e);
        }

        Some(result)
    }

    /// 运行轮询循环，直到取消令牌被触发
    ///
    /// 取消信号在三处生效：每轮开始前、请求进行中、间隔等待中。
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            url = %self.url,
            interval_secs = self.interval.as_secs(),
            "可用性检测服务正在启动"
        );

        while !cancel.is_cancelled() {
            if self.check_once(&cancel).await.is_none() {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(url = %self.url, "可用性检测服务正在停止");
    }

    /// 在后台任务中运行轮询循环
    pub fn spawn(self) -> PollerHandle {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move { self.run(task_cancel).await });

        PollerHandle { cancel, task }
    }
}

/// 后台轮询任务句柄
pub struct PollerHandle {
    /// 取消令牌
    cancel: CancellationToken,
    /// 后台任务
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// 轮询任务使用的取消令牌
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 后台任务是否已结束
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// 等待后台任务自行结束（由外部触发取消令牌）
    pub async fn join(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| anyhow::anyhow!("轮询任务异常退出: {e}"))?;
        Ok(())
    }

    /// 发出取消信号并等待后台任务结束
    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        self.join().await
    }
}
