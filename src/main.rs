//! Site Vitals 主程序入口
//!
//! 网站可用性轮询工具

use anyhow::{Context, Result};
use clap::Parser;
use site_vitals::cli::{execute_command, Args};
use site_vitals::logging::{LogConfig, LoggingSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 加载配置，日志系统和命令共用同一份结果
    let config = args.load_config().await;

    // 初始化日志系统
    let logging = args.logging_config(config.as_ref().ok());
    let _logging_system =
        LoggingSystem::setup_logging(LogConfig::from(&logging)).context("初始化日志系统失败")?;

    info!("Site Vitals v{} 启动", site_vitals::VERSION);
    if config.is_ok() && args.uses_builtin_defaults() {
        info!(
            "未找到配置文件 {}，使用内置默认配置",
            args.get_config_path().display()
        );
    }

    // 执行命令
    if let Err(e) = execute_command(&args, config).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
