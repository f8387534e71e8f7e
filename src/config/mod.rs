// ==========================================
// 住宿报价引擎 - 配置层
// ==========================================
// 职责: 引擎配置结构 + 加载/覆写
// 存储: JSON 文件 + 环境变量
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager, ConfigSource};
pub use engine_config::{ColumnConfig, EngineConfig, NormalizerConfig};
