//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::config::{
    get_default_config_path, validate_config, Config, ConfigLoader, LoggingConfig,
    TomlConfigLoader,
};
use crate::error::{ConfigError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Site Vitals - 网站可用性轮询工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "site-vitals",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "SITE_VITALS_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别（覆盖配置文件）
    #[arg(
        short,
        long,
        value_enum,
        help = "日志级别",
        env = "SITE_VITALS_LOG_LEVEL"
    )]
    pub log_level: Option<LogLevel>,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 检测目标相关的覆盖参数
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct TargetArgs {
    /// 检测目标URL
    #[arg(long, value_name = "URL", help = "检测目标URL", env = "SITE_VITALS_URL")]
    pub url: Option<String>,

    /// 检测间隔（秒）
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        help = "检测间隔（秒）",
        env = "SITE_VITALS_INTERVAL"
    )]
    pub interval: Option<u64>,

    /// 结果日志文件路径
    #[arg(
        long,
        value_name = "FILE",
        help = "结果日志文件路径",
        env = "SITE_VITALS_LOG_FILE"
    )]
    pub log_file: Option<PathBuf>,
}

impl TargetArgs {
    /// 把命令行覆盖应用到配置上
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref url) = self.url {
            config.poller.url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.poller.check_interval_seconds = interval;
        }
        if let Some(ref log_file) = self.log_file {
            config.poller.log_file = log_file.clone();
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 启动轮询服务，直到收到关闭信号
    Start {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// 执行一次检测并输出结果
    Check {
        #[command(flatten)]
        target: TargetArgs,

        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },

    /// 初始化配置文件
    Init {
        /// 配置文件路径
        #[arg(
            value_name = "FILE",
            help = "配置文件路径",
            default_value = "config.toml"
        )]
        config_path: PathBuf,

        /// 是否覆盖现有文件
        #[arg(short, long, help = "覆盖现有文件")]
        force: bool,
    },

    /// 验证配置文件
    Validate {
        /// 配置文件路径
        #[arg(value_name = "FILE", help = "配置文件路径")]
        config_path: Option<PathBuf>,

        /// 是否显示详细信息
        #[arg(short, long, help = "显示详细信息")]
        verbose: bool,
    },

    /// 显示版本信息
    Version {
        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },
}

/// 输出格式枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}

impl Args {
    /// 获取配置文件路径
    pub fn get_config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(get_default_config_path)
    }

    /// 是否因默认路径下没有配置文件而使用内置默认配置
    pub fn uses_builtin_defaults(&self) -> bool {
        self.config.is_none() && !self.get_config_path().exists()
    }

    /// 加载配置并应用命令行覆盖
    ///
    /// 显式指定的配置文件必须存在；使用默认路径且文件不存在时回退到内置默认值。
    pub async fn load_config(&self) -> Result<Config> {
        let mut config = if self.uses_builtin_defaults() {
            Config::default()
        } else {
            let loader = TomlConfigLoader::new(true);
            loader.load_from_file(&self.get_config_path()).await?
        };

        if let Commands::Start { target } | Commands::Check { target, .. } = &self.command {
            target.apply(&mut config);
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.to_string();
        }

        validate_config(&config).map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// 日志系统使用的配置
    ///
    /// 配置加载失败时使用默认值加命令行日志级别，具体错误留给后续命令报告。
    pub fn logging_config(&self, loaded: Option<&Config>) -> LoggingConfig {
        match loaded {
            Some(config) => config.logging.clone(),
            None => {
                let mut logging = LoggingConfig::default();
                if let Some(ref level) = self.log_level {
                    logging.level = level.to_string();
                }
                logging
            }
        }
    }
}
