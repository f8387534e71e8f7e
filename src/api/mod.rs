// ==========================================
// 住宿报价引擎 - API 层
// ==========================================
// 职责: 提供刷新/报价接口,供 CLI 与外部调用方使用
// ==========================================

pub mod error;
pub mod quote_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use quote_api::{IngestOutcome, QuoteApi};
