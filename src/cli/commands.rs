//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{Args, Commands, OutputFormat};
use crate::config::{Config, ConfigLoader, TomlConfigLoader, DEFAULT_CONFIG_TEMPLATE};
use crate::error::Result;
use crate::health::Poller;
use crate::shutdown;
use async_trait::async_trait;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 根据子命令分派到对应的处理器
///
/// `config` 是启动时由 [`Args::load_config`] 加载的结果，只有 start 和 check
/// 需要它，加载失败也只在这两个命令中报告。
pub async fn execute_command(args: &Args, config: Result<Config>) -> Result<()> {
    match &args.command {
        Commands::Start { .. } => StartCommand::new(config?).execute(args).await,
        Commands::Check { .. } => CheckCommand::new(config?).execute(args).await,
        Commands::Init { .. } => InitCommand.execute(args).await,
        Commands::Validate { .. } => ValidateCommand.execute(args).await,
        Commands::Version { .. } => VersionCommand.execute(args).await,
    }
}

/// 启动命令
///
/// 在后台任务中运行轮询器，关闭信号触发取消令牌后等待任务结束。
pub struct StartCommand {
    config: Config,
}

impl StartCommand {
    /// 使用已加载的配置创建启动命令
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for StartCommand {
    async fn execute(&self, _args: &Args) -> Result<()> {
        let config = &self.config;
        info!(
            "检测目标: {}，间隔: {}秒，结果文件: {}",
            config.poller.url,
            config.poller.check_interval_seconds,
            config.poller.log_file.display()
        );

        let poller = Poller::from_config(&config.poller)?;
        let handle = poller.spawn();
        let _listener = shutdown::setup_signal_handlers(handle.cancellation_token())?;

        handle.join().await?;
        info!("服务已停止");
        Ok(())
    }
}

/// 检测命令
pub struct CheckCommand {
    config: Config,
}

impl CheckCommand {
    /// 使用已加载的配置创建检测命令
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for CheckCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Check { format, .. } = &args.command {
            let poller = Poller::from_config(&self.config.poller)?;

            let cancel = CancellationToken::new();
            let listener = shutdown::setup_signal_handlers(cancel.clone())?;

            match poller.check_once(&cancel).await {
                Some(result) => match format {
                    OutputFormat::Json => println!("{}", result.to_json()?),
                    OutputFormat::Text => println!("{}", result.log_line()),
                },
                None => eprintln!("检测已取消"),
            }

            // 结束信号监听任务
            cancel.cancel();
            if let Err(e) = listener.await {
                warn!("信号监听任务异常结束: {e}");
            }
        }
        Ok(())
    }
}

/// 初始化命令
pub struct InitCommand;

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Init { config_path, force } = &args.command {
            self.create_config_file(config_path, *force).await
        } else {
            Ok(())
        }
    }
}

impl InitCommand {
    /// 创建配置文件
    async fn create_config_file(&self, config_path: &Path, force: bool) -> Result<()> {
        if config_path.exists() && !force {
            eprintln!("配置文件已存在: {}", config_path.display());
            eprintln!("使用 --force 参数覆盖现有文件");
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(config_path, DEFAULT_CONFIG_TEMPLATE).await?;

        println!("配置文件已创建: {}", config_path.display());
        println!("请编辑配置文件以设置检测目标");

        Ok(())
    }
}

/// 验证命令
pub struct ValidateCommand;

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Validate {
            config_path,
            verbose,
        } = &args.command
        {
            let config_file = config_path
                .clone()
                .unwrap_or_else(|| args.get_config_path());

            self.validate_config_file(&config_file, *verbose).await
        } else {
            Ok(())
        }
    }
}

impl ValidateCommand {
    /// 验证配置文件
    async fn validate_config_file(&self, config_path: &Path, verbose: bool) -> Result<()> {
        println!("验证配置文件: {}", config_path.display());

        let loader = TomlConfigLoader::new(true);
        let config = loader.load_from_file(config_path).await?;

        if verbose {
            println!("配置验证通过！");
            println!("  检测目标: {}", config.poller.url);
            println!("  检测间隔: {}秒", config.poller.check_interval_seconds);
            println!("  结果文件: {}", config.poller.log_file.display());
            match config.poller.request_timeout_seconds {
                Some(timeout) => println!("  请求超时: {timeout}秒"),
                None => println!("  请求超时: 未设置"),
            }
            println!("  日志级别: {}", config.logging.level);
        } else {
            println!("✓ 配置文件验证通过");
        }

        Ok(())
    }
}

/// 版本命令
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Version { format } = &args.command {
            match format {
                OutputFormat::Json => {
                    let version_info = serde_json::json!({
                        "name": crate::APP_NAME,
                        "version": crate::VERSION,
                        "description": crate::APP_DESCRIPTION
                    });
                    println!("{}", serde_json::to_string_pretty(&version_info)?);
                }
                OutputFormat::Text => {
                    println!("{} v{}", crate::APP_NAME, crate::VERSION);
                    println!("{}", crate::APP_DESCRIPTION);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use clap::Parser;
    use serial_test::serial;
    use tempfile::TempDir;

    fn broken() -> Result<Config> {
        Err(ConfigError::ValidationError("检测间隔不能为0".to_string()).into())
    }

    async fn run(args: &Args) -> Result<()> {
        let config = args.load_config().await;
        execute_command(args, config).await
    }

    #[tokio::test]
    async fn test_init_then_validate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("config.toml");
        let path_str = path.to_str().unwrap();

        let init = Args::parse_from(["site-vitals", "init", path_str]);
        run(&init).await.unwrap();
        assert!(path.exists());

        let validate = Args::parse_from(["site-vitals", "validate", path_str, "--verbose"]);
        run(&validate).await.unwrap();
    }

    #[tokio::test]
    async fn test_init_does_not_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "# mine\n").await.unwrap();

        let init = Args::parse_from(["site-vitals", "init", path.to_str().unwrap()]);
        run(&init).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "# mine\n");
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[poller]\nurl = \"nope\"\n")
            .await
            .unwrap();

        let validate = Args::parse_from(["site-vitals", "validate", path.to_str().unwrap()]);
        assert!(run(&validate).await.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_check_appends_one_line() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(503).create_async().await;

        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        let log_path = dir.path().join("availability.txt");
        tokio::fs::write(&config_path, "").await.unwrap();
        let url = server.url();

        let check = Args::parse_from([
            "site-vitals",
            "--config",
            config_path.to_str().unwrap(),
            "check",
            "--url",
            url.as_str(),
            "--log-file",
            log_path.to_str().unwrap(),
        ]);
        run(&check).await.unwrap();

        let content = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.trim_end().ends_with("is Unavailable (Status Code: 503)"));
    }

    #[tokio::test]
    #[serial]
    async fn test_check_uses_preloaded_config() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("availability.txt");
        let mut config = Config::default();
        config.poller.url = server.url();
        config.poller.log_file = log_path.clone();

        // 配置文件不存在，重新加载就会失败
        let missing = dir.path().join("missing.toml");
        let check = Args::parse_from([
            "site-vitals",
            "--config",
            missing.to_str().unwrap(),
            "check",
        ]);
        assert!(check.load_config().await.is_err());

        execute_command(&check, Ok(config)).await.unwrap();
        mock.assert_async().await;

        let content = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.trim_end().ends_with("is Available (Status Code: 200)"));
    }

    #[tokio::test]
    async fn test_config_error_only_fails_commands_that_need_it() {

        let version = Args::parse_from(["site-vitals", "version"]);
        execute_command(&version, broken()).await.unwrap();

        let start = Args::parse_from(["site-vitals", "start"]);
        assert!(execute_command(&start, broken()).await.is_err());
    }
}
