//! 日志初始化：基于 tracing-subscriber，输出到 stderr，避免和终端上的进度条混在一起。
//!
//! 日志 target：
//! - `upload::widget` 选择、重置、上传结果
//! - `upload::simulator` 模拟器启动与结束
//! - `upload::presigned` 签发与表单提交
//!
//! `RUST_LOG` 存在时优先于 [`LogConfig::level`]。

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("日志级别无效: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("日志已初始化: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 过滤表达式，如 `info` 或 `upload::presigned=debug`
    pub level: String,
    /// 是否输出 ANSI 颜色
    pub ansi: bool,
    /// 是否输出 target
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
            with_target: true,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub(crate) fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(&self.level)?),
        }
    }
}

/// 安装全局日志订阅者；重复调用返回 [`LoggingError::AlreadyInitialized`]。
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(config.with_target),
        )
        .try_init()?;

    Ok(())
}
