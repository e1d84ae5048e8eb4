//! 结果日志文件接收器
//!
//! 以追加模式写入结果行，文件不存在时创建，从不截断或轮转。

use crate::error::Result;
use crate::health::CheckResult;
use crate::sink::ResultSink;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 只追加的文本文件接收器
#[derive(Debug, Clone)]
pub struct FileSink {
    /// 结果日志文件路径
    path: PathBuf,
}

impl FileSink {
    /// 创建新的文件接收器
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 结果日志文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultSink for FileSink {
    async fn record(&self, result: &CheckResult) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // 整行一次性写入，避免出现半行
        let mut line = result.log_line();
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("结果已追加到文件: {}", self.path.display());
        Ok(())
    }
}
