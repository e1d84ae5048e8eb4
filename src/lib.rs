//! Site Vitals - 网站可用性轮询工具
//!
//! 这是一个用Rust编写的极简可用性监控原语，支持：
//! - 固定间隔的HTTP/HTTPS可用性检测
//! - 结构化日志与只追加的结果日志文件
//! - 基于取消令牌的优雅关闭

pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod shutdown;
pub mod sink;

// 重新导出主要类型
pub use config::{Config, PollerConfig};
pub use error::SiteVitalsError;
pub use health::{CheckResult, HealthChecker, HttpHealthChecker, Outcome, Poller};
pub use sink::{FileSink, MemorySink, ResultSink, SinkSet, TracingSink};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
