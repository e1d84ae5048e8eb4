//! 结果接收器模块
//!
//! 每个检测周期产生的 [`CheckResult`] 通过 [`ResultSink`] 写出，
//! 日志流与结果文件是两个相互独立、可替换的接收器。

pub mod file;
pub mod memory;
pub mod tracing_sink;

pub use file::FileSink;
pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

use crate::error::Result;
use crate::health::CheckResult;
use async_trait::async_trait;
use std::sync::Arc;

/// 结果接收器trait
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// 记录一条检测结果
    ///
    /// # 参数
    /// * `result` - 检测结果
    ///
    /// # 返回
    /// * `Result<()>` - 写出结果
    async fn record(&self, result: &CheckResult) -> Result<()>;
}

/// 按顺序写入多个接收器
///
/// 某个接收器失败不会阻止后续接收器写入，全部写完后返回第一个错误。
#[derive(Clone, Default)]
pub struct SinkSet {
    sinks: Vec<Arc<dyn ResultSink>>,
}

impl SinkSet {
    /// 创建空的接收器集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个接收器
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// 接收器数量
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl ResultSink for SinkSet {
    async fn record(&self, result: &CheckResult) -> Result<()> {
        let mut first_error = None;

        for sink in &self.sinks {
            if let Err(e) = sink.record(result).await {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
