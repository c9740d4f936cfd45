use thiserror::Error;

/// FLUX 钩子统一错误类型
#[derive(Error, Debug)]
pub enum FluxError {
    /// 输入不是合法 JSON，或结构与消息模型不符
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, FluxError>;
