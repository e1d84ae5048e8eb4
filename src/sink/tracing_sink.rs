//! 日志流接收器

use crate::error::Result;
use crate::health::CheckResult;
use crate::sink::ResultSink;
use async_trait::async_trait;
use tracing::{error, info};

/// 把检测结果写入 tracing 日志流
///
/// 可用/不可用以 info 级别输出，请求错误以 error 级别输出。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// 创建新的日志流接收器
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultSink for TracingSink {
    async fn record(&self, result: &CheckResult) -> Result<()> {
        let line = result.log_line();

        if result.outcome.is_error() {
            error!(
                target_url = %result.target,
                outcome = %result.outcome,
                "{line}"
            );
        } else {
            info!(
                target_url = %result.target,
                outcome = %result.outcome,
                status_code = result.status_code,
                "{line}"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollerConfig;
    use crate::health::Poller;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio_util::sync::CancellationToken;
    use tracing::field::{Field, Visit};
    use tracing::subscriber::DefaultGuard;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    const SINK_TARGET: &str = "site_vitals::sink::tracing_sink";

    /// 捕获到的日志事件：级别、消息、事件发生时结果文件已有的行数
    #[derive(Debug, Clone, PartialEq)]
    struct Captured {
        level: Level,
        message: String,
        file_lines: usize,
    }

    /// 只收集日志流接收器输出的事件
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<Captured>>>,
        watched_file: Option<PathBuf>,
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if event.metadata().target() != SINK_TARGET {
                return;
            }

            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);

            let file_lines = self
                .watched_file
                .as_ref()
                .and_then(|path| std::fs::read_to_string(path).ok())
                .map(|content| content.lines().count())
                .unwrap_or(0);

            self.events.lock().unwrap().push(Captured {
                level: *event.metadata().level(),
                message: visitor.0,
                file_lines,
            });
        }
    }

    impl CaptureLayer {
        /// 在当前线程安装只含本层的 subscriber
        fn install(&self) -> DefaultGuard {
            tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
        }

        fn events(&self) -> Vec<Captured> {
            self.events.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_available_result_logged_once_at_info() {
        let layer = CaptureLayer::default();
        let _guard = layer.install();

        let result = CheckResult::from_status("https://example.com", 200);
        TracingSink::new().record(&result).await.unwrap();

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].message, result.log_line());
    }

    #[tokio::test]
    async fn test_unavailable_result_logged_at_info() {
        let layer = CaptureLayer::default();
        let _guard = layer.install();

        let result = CheckResult::from_status("https://example.com", 500);
        TracingSink::new().record(&result).await.unwrap();

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].message, result.log_line());
    }

    #[tokio::test]
    async fn test_error_result_logged_once_at_error() {
        let layer = CaptureLayer::default();
        let _guard = layer.install();

        let result = CheckResult::from_error("https://example.com", "connection refused");
        TracingSink::new().record(&result).await.unwrap();

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(events[0].message, result.log_line());
    }

    #[tokio::test]
    async fn test_default_poller_logs_before_writing_file() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(200).create_async().await;

        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("availability.txt");
        let layer = CaptureLayer {
            watched_file: Some(log_file.clone()),
            ..CaptureLayer::default()
        };
        let _guard = layer.install();

        let config = PollerConfig {
            url: server.url(),
            log_file: log_file.clone(),
            ..PollerConfig::default()
        };
        let poller = Poller::from_config(&config).unwrap();
        let result = poller.check_once(&CancellationToken::new()).await.unwrap();

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            Captured {
                level: Level::INFO,
                message: result.log_line(),
                file_lines: 0,
            }
        );

        let content = tokio::fs::read_to_string(&log_file).await.unwrap();
        assert_eq!(content, format!("{}\n", result.log_line()));
    }
}
