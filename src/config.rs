use crate::ai_provider::AiProvider;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "BAGGAGE_CHECK_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai_provider: AiProvider,
    pub model: Option<String>,
    pub max_image_size: u32,
    pub jpeg_quality: u8,
    pub timeout_seconds: u64,
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", config_path.display(), e)))?;
            config
                .validate()
                .map_err(|e| AppError::Config(format!("{}: {}", config_path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("configuration directory not found".into()))?;
        Ok(dir.join("baggage-check").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            ai_provider: AiProvider::Claude,
            model: None,
            max_image_size: 1568, // recommended vision input size
            jpeg_quality: 85,
            timeout_seconds: 60,
            data_dir: None,
        }
    }

    /// Key-value store directory
    ///
    /// `BAGGAGE_CHECK_DATA_DIR` wins over the config value.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| AppError::Config("data directory not found".into()))?;
        Ok(base.join("baggage-check"))
    }

    /// Values a hand-edited file can get wrong
    fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be at least 1");
        }
        if self.max_image_size == 0 {
            return Err("max_image_size must be at least 1");
        }
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(AppError::Config("timeout must be at least 1 second".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}
