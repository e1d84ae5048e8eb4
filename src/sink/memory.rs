//! 内存接收器
//!
//! 保存结构化的检测结果，主要用于测试中直接断言 [`CheckResult`]。

use crate::error::Result;
use crate::health::CheckResult;
use crate::sink::ResultSink;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 内存结果接收器
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    results: Arc<RwLock<Vec<CheckResult>>>,
}

impl MemorySink {
    /// 创建新的内存接收器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录结果的快照
    pub async fn results(&self) -> Vec<CheckResult> {
        self.results.read().await.clone()
    }

    /// 已记录结果数量
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    /// 是否尚无记录
    pub async fn is_empty(&self) -> bool {
        self.results.read().await.is_empty()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn record(&self, result: &CheckResult) -> Result<()> {
        self.results.write().await.push(result.clone());
        Ok(())
    }
}
