// ==========================================
// 住宿报价引擎 - 导入过程数据
// ==========================================
// 用途: 列定位结果、逐行结果、导入汇总
// 红线: 行级拒收对外静默丢弃,对内保留原因与原始值
// ==========================================

use crate::domain::price::PriceRecord;
use crate::domain::types::{ColumnSource, PriceField, RejectReason};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ColumnPick / ColumnLayout - 列定位结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPick {
    pub index: usize,          // 0 基列号
    pub source: ColumnSource,  // 表头命中 / 固定列位回退
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub date: ColumnPick,
    pub price: ColumnPick,
    pub price_one_night: ColumnPick,
}

impl ColumnLayout {
    pub fn pick(&self, field: PriceField) -> ColumnPick {
        match field {
            PriceField::Date => self.date,
            PriceField::Price => self.price,
            PriceField::PriceOneNight => self.price_one_night,
        }
    }
}

// ==========================================
// RowRejection / RowOutcome - 逐行结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_number: usize,     // 数据行号（1 基,不含表头）
    pub reason: RejectReason,  // 拒收原因
    pub raw_value: String,     // 导致拒收的原始单元格文本
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(PriceRecord),
    Rejected(RowRejection),
}

// ==========================================
// ImportSummary - 导入汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,                                  // 导入批次 ID
    pub total_rows: usize,                                 // 数据行总数
    pub accepted: usize,                                   // 接收行数
    pub rejected: usize,                                   // 拒收行数
    pub rejected_by_reason: BTreeMap<RejectReason, usize>, // 按原因统计
    pub duplicates_overwritten: usize,                     // 被后续同日期行覆盖的行数
    pub distinct_dates: usize,                             // 去重后日期数
    pub layout: Option<ColumnLayout>,                      // 列定位（无表头时为 None）
    pub elapsed_ms: u128,                                  // 耗时
}

// ==========================================
// PriceImport - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PriceImport {
    pub records: Vec<PriceRecord>,      // 接收记录（保持原始行序,含重复日期）
    pub rejections: Vec<RowRejection>,  // 拒收明细
    pub summary: ImportSummary,         // 汇总
}

impl PriceImport {
    /// 原始载荷完全为空（连表头都没有）
    pub fn is_empty_payload(&self) -> bool {
        self.summary.layout.is_none()
    }
}
