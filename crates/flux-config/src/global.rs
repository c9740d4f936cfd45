use serde::{Deserialize, Serialize};

use crate::hook::HookConfig;
use crate::logging::LoggingConfig;

/// 全局配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub hook: HookConfig,
    pub logging: LoggingConfig,
}
