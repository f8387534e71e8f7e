// ==========================================
// 住宿报价引擎 - 核心库
// ==========================================
// 职责: 价格表导入 + 日期区间报价
// 技术栈: Rust + tokio + calamine/csv
// 系统定位: 报价计算器的数据与计算内核（不含界面与网络传输）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 价格表快照
pub mod repository;

// 引擎层 - 区间约束与汇总
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 刷新与报价接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ColumnSource, PriceField, RejectReason};

// 领域实体
pub use domain::{
    CellValue, ColumnLayout, DateRange, ImportSummary, NightlyPrice, PriceImport, PriceRecord,
    PriceTable, QuoteResult, RawTable,
};

// 引擎
pub use engine::{QuoteError, RangeAggregator, RangePolicy};

// 导入
pub use importer::{FilePriceSource, ImportError, PriceSource, RawPayload, StaticPriceSource};

// 配置
pub use config::{ConfigManager, EngineConfig};

// API
pub use api::{ApiError, IngestOutcome, QuoteApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "住宿报价引擎";
