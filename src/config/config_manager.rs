// ==========================================
// 住宿报价引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、快照导出
// 存储: JSON 配置文件（可缺省,缺省即默认值）
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::importer::error::{ImportError, ImportResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// 配置键（环境变量）
// ==========================================
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "QUOTE_ENGINE_CONFIG";
    /// 日期列表头覆写
    pub const DATE_HEADER: &str = "QUOTE_ENGINE_DATE_HEADER";
    /// 最大可选天数覆写
    pub const MAX_DAYS: &str = "QUOTE_ENGINE_MAX_DAYS";
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,       // 内置默认值
    File(PathBuf),  // 配置文件
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: EngineConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 按约定加载配置
    ///
    /// # 查找顺序
    /// 1. 环境变量 QUOTE_ENGINE_CONFIG 指定的文件（必须存在）
    /// 2. 默认路径 {config_dir}/quote-engine/config.json（不存在则用默认值）
    ///
    /// 之后应用环境变量覆写并校验
    pub fn load() -> ImportResult<Self> {
        let mut manager = match std::env::var(config_keys::CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::read_file(Path::new(path.trim()))?,
            _ => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                _ => {
                    debug!("未找到配置文件,使用默认配置");
                    Self {
                        config: EngineConfig::default(),
                        source: ConfigSource::Defaults,
                    }
                }
            },
        };

        manager.apply_overrides(|key| std::env::var(key).ok())?;

        info!(source = ?manager.source, "配置加载完成");
        Ok(manager)
    }

    /// 从指定文件加载（不读取环境变量覆写）
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let manager = Self::read_file(path.as_ref())?;
        manager.config.validate()?;
        Ok(manager)
    }

    /// 从已有配置创建
    pub fn from_config(config: EngineConfig) -> ImportResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: ConfigSource::Defaults,
        })
    }

    /// 默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quote-engine").join("config.json"))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 应用覆写并重新校验（lookup 通常为环境变量读取）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ImportResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(header) = lookup(config_keys::DATE_HEADER) {
            let header = header.trim();
            if !header.is_empty() {
                debug!(date_header = %header, "覆写日期表头");
                self.config.columns.date_header = header.to_string();
            }
        }

        if let Some(raw) = lookup(config_keys::MAX_DAYS) {
            let max_days = raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ImportError::ConfigValueError {
                    key: config_keys::MAX_DAYS.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
            debug!(max_days, "覆写最大可选天数");
            self.config.range_policy.max_days = Some(max_days);
        }

        self.config.validate()
    }

    /// 获取配置快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }

    fn read_file(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::ConfigReadError {
                key: config_keys::CONFIG_PATH.to_string(),
                message: format!("配置文件不存在: {}", path.display()),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                key: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }
}
