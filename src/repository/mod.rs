// ==========================================
// 住宿报价引擎 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 持有价格表快照（仅内存,不落盘）
// ==========================================

pub mod price_table_repo;

// 重导出核心仓储
pub use price_table_repo::PriceTableRepository;
