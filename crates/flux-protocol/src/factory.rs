use crate::{HookType, PassthroughHook, ProtocolHook, RegroupHook};
use flux_config::{ConfigLoader, HookConfig};
use flux_core::{FluxError, Result};
use std::path::Path;

/// 钩子工厂
pub struct HookFactory;

impl HookFactory {
    /// 按配置创建钩子
    pub fn from_config(config: &HookConfig) -> Result<Box<dyn ProtocolHook>> {
        let hook_type = HookType::from_str(&config.kind)
            .ok_or_else(|| FluxError::Config(format!("Unknown hook kind: {}", config.kind)))?;

        tracing::debug!(hook = hook_type.as_str(), "Creating protocol hook");
        Ok(Self::create(hook_type, config))
    }

    /// 从配置目录加载 `hook.toml` 后创建钩子
    pub fn from_config_dir<P: AsRef<Path>>(config_dir: P) -> Result<Box<dyn ProtocolHook>> {
        let config = ConfigLoader::new(config_dir)
            .validate()
            .map_err(|e| FluxError::Config(e.to_string()))?;
        Self::from_config(&config.hook)
    }

    pub fn create(hook_type: HookType, config: &HookConfig) -> Box<dyn ProtocolHook> {
        match hook_type {
            HookType::Regroup => Box::new(RegroupHook::from_config(config)),
            HookType::Passthrough => Box::new(PassthroughHook::new()),
        }
    }
}
