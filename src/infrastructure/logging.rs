//! 日志系统配置模块
//! 支持结构化日志和日志级别配置

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// 初始化日志系统
///
/// `RUST_LOG` 优先于配置中的级别。全局 subscriber 已存在时返回错误而不是 panic。
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    // 设置日志级别过滤器
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // 日志写到 stderr，stdout 留给命令输出
    if config.format == "json" {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to initialize JSON logging")?;
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
            .try_init()
            .context("Failed to initialize text logging")?;
    }

    Ok(())
}
