use anyhow::{anyhow, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

use crate::GlobalConfig;

/// 配置文件名
pub const CONFIG_FILE: &str = "hook.toml";

/// 环境变量前缀，例如 `FLUX_HOOK_HOOK__KIND=passthrough`
pub const DEFAULT_ENV_PREFIX: &str = "FLUX_HOOK";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 配置加载器
pub struct ConfigLoader {
    config_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// 创建配置加载器
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// 加载全局配置
    ///
    /// 文件不存在时使用默认值，环境变量覆盖文件中的值。
    pub fn load(&self) -> Result<GlobalConfig> {
        let config_path = self.config_path();

        let config = Config::builder()
            .add_source(
                File::new(
                    config_path.to_str().ok_or_else(|| anyhow!("Invalid config path"))?,
                    FileFormat::Toml,
                )
                .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 写出一份默认配置，已存在时不覆盖
    pub fn write_default(&self) -> Result<PathBuf> {
        let config_path = self.config_path();
        if config_path.exists() {
            return Err(anyhow!("Config already exists: {}", config_path.display()));
        }

        std::fs::create_dir_all(&self.config_dir)?;
        let content = toml::to_string_pretty(&GlobalConfig::default())?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<GlobalConfig> {
        let config = self.load()?;

        if config.hook.kind.trim().is_empty() {
            return Err(anyhow!("hook.kind must not be empty"));
        }

        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow!(
                "logging.level must be one of {:?}, got {}",
                LOG_LEVELS,
                config.logging.level
            ));
        }

        Ok(config)
    }
}
