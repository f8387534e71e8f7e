// ==========================================
// 住宿报价引擎 - 领域模型层
// ==========================================
// 职责: 定义单元格、价格记录、价格表、报价等领域类型
// 红线: 不含数据读取逻辑,不含引擎逻辑
// ==========================================

pub mod cell;
pub mod import;
pub mod price;
pub mod quote;
pub mod types;

// 重导出核心类型
pub use cell::{CellValue, RawTable};
pub use import::{
    ColumnLayout, ColumnPick, ImportSummary, PriceImport, RowOutcome, RowRejection,
};
pub use price::{PriceRecord, PriceTable};
pub use quote::{DateRange, NightlyPrice, QuoteResult};
pub use types::{ColumnSource, PriceField, RejectReason};
