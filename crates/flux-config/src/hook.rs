use serde::{Deserialize, Serialize};

/// 协议钩子配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HookConfig {
    /// 钩子类型：regroup | passthrough
    pub kind: String,

    /// 批次没有任何有效读数时，仍然输出一条空消息
    pub emit_trailing_empty: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            kind: "regroup".to_string(),
            emit_trailing_empty: true,
        }
    }
}
