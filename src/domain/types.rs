// ==========================================
// 住宿报价引擎 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 价格表字段 (Price Field)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceField {
    Date,          // 入住日期
    Price,         // 每晚价格
    PriceOneNight, // 单晚价格
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceField::Date => write!(f, "date"),
            PriceField::Price => write!(f, "price"),
            PriceField::PriceOneNight => write!(f, "priceOneNight"),
        }
    }
}

// ==========================================
// 列定位来源 (Column Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnSource {
    Header,   // 表头命中
    Fallback, // 固定列位回退
}

impl fmt::Display for ColumnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSource::Header => write!(f, "HEADER"),
            ColumnSource::Fallback => write!(f, "FALLBACK"),
        }
    }
}

// ==========================================
// 行拒收原因 (Reject Reason)
// ==========================================
// 红线: 行级拒收不抛错,只计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    MissingDate,   // 日期单元格为空/缺失
    InvalidDate,   // 日期无法识别
    MissingPrice,  // 价格单元格为空/缺失
    InvalidPrice,  // 价格无法识别
    NegativePrice, // 价格为负数
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingDate => write!(f, "MISSING_DATE"),
            RejectReason::InvalidDate => write!(f, "INVALID_DATE"),
            RejectReason::MissingPrice => write!(f, "MISSING_PRICE"),
            RejectReason::InvalidPrice => write!(f, "INVALID_PRICE"),
            RejectReason::NegativePrice => write!(f, "NEGATIVE_PRICE"),
        }
    }
}
