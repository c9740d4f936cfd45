use flux_config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// 构建日志过滤器
///
/// RUST_LOG 存在时优先使用，否则使用配置中的级别。
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| LoggingError::InvalidFilter(format!("{}: {}", config.level, e))),
    }
}

/// 初始化全局 tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_from_level() {
        // 已设置 RUST_LOG 时以其为准，同样返回 Ok
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Text,
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_invalid_level_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "flux=loudest".to_string(),
            format: LogFormat::Text,
        };
        assert!(matches!(build_filter(&config), Err(LoggingError::InvalidFilter(_))));
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Json,
        };
        // 第一次可能成功，第二次一定失败
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::AlreadyInitialized(_))
        ));
    }
}
