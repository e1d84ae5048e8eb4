//! 信号处理模块
//!
//! 把进程的优雅关闭信号转换为取消令牌

use crate::error::Result;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[cfg(unix)]
use signal_hook::consts::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook_tokio::Signals;

/// 设置信号处理器
///
/// 收到第一个关闭信号后触发 `cancel`。返回的监听任务在令牌被取消后结束，
/// 无论取消来自信号还是来自别处。
pub fn setup_signal_handlers(cancel: CancellationToken) -> Result<JoinHandle<()>> {
    #[cfg(unix)]
    {
        setup_unix_signals(cancel)
    }
    #[cfg(not(unix))]
    {
        Ok(setup_ctrl_c(cancel))
    }
}

/// Unix/Linux系统信号处理
#[cfg(unix)]
fn setup_unix_signals(cancel: CancellationToken) -> Result<JoinHandle<()>> {
    use futures::stream::StreamExt;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let handle = signals.handle();

    let task = tokio::spawn(async move {
        tokio::select! {
            signal = signals.next() => match signal {
                Some(SIGINT) => info!("接收到 SIGINT 信号，开始优雅关闭..."),
                Some(SIGTERM) => info!("接收到 SIGTERM 信号，开始优雅关闭..."),
                Some(other) => info!("接收到信号 {other}，开始优雅关闭..."),
                None => error!("信号流意外结束"),
            },
            _ = cancel.cancelled() => {}
        }
        cancel.cancel();
        handle.close();
    });

    Ok(task)
}

/// 非Unix系统仅监听 Ctrl+C
#[cfg(not(unix))]
fn setup_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("接收到 Ctrl+C，开始优雅关闭..."),
                Err(e) => error!("监听中断信号失败: {e}"),
            },
            _ = cancel.cancelled() => {}
        }
        cancel.cancel();
    })
}
