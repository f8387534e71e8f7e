// ==========================================
// 住宿报价引擎 - 引擎层
// ==========================================
// 职责: 区间约束校验 + 区间价格汇总
// 红线: 引擎只读价格表快照,不做 I/O
// ==========================================

pub mod error;
pub mod range_aggregator;
pub mod range_policy;

// 重导出核心引擎
pub use error::QuoteError;
pub use range_aggregator::RangeAggregator;
pub use range_policy::RangePolicy;
