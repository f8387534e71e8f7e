// ==========================================
// 住宿报价引擎 - 记录构建器
// ==========================================
// 职责: 原始行 + 列定位 → RowOutcome
// 规则: 日期可识别 且 价格为有限非负数 → 接收; 单晚价格可选
// 红线: 单行失败不影响其他行,不返回错误
// ==========================================

use crate::config::engine_config::NormalizerConfig;
use crate::domain::cell::CellValue;
use crate::domain::import::{ColumnLayout, RowOutcome, RowRejection};
use crate::domain::price::PriceRecord;
use crate::domain::types::RejectReason;
use crate::importer::date_normalizer::DateNormalizer;
use crate::importer::error::ImportResult;
use crate::importer::number_normalizer::NumberNormalizer;

pub struct RecordBuilder {
    dates: DateNormalizer,
    numbers: NumberNormalizer,
}

static MISSING_CELL: CellValue = CellValue::Empty;

impl RecordBuilder {
    pub fn new(config: &NormalizerConfig) -> ImportResult<Self> {
        Ok(Self {
            dates: DateNormalizer::new(config.clone())?,
            numbers: NumberNormalizer::new(config)?,
        })
    }

    /// 构建单行
    ///
    /// # 参数
    /// - row: 原始行（越界单元格视为空）
    /// - layout: 列定位结果
    /// - row_number: 数据行号（1 基）
    pub fn build_row(&self, row: &[CellValue], layout: &ColumnLayout, row_number: usize) -> RowOutcome {
        let cell_at = |index: usize| row.get(index).unwrap_or(&MISSING_CELL);

        let date_cell = cell_at(layout.date.index);
        let price_cell = cell_at(layout.price.index);
        let one_night_cell = cell_at(layout.price_one_night.index);

        let reject = |reason: RejectReason, cell: &CellValue| {
            RowOutcome::Rejected(RowRejection {
                row_number,
                reason,
                raw_value: cell.as_text().into_owned(),
            })
        };

        // 日期
        if date_cell.is_blank() {
            return reject(RejectReason::MissingDate, date_cell);
        }
        let Some(date) = self.dates.normalize(date_cell) else {
            return reject(RejectReason::InvalidDate, date_cell);
        };

        // 价格
        if price_cell.is_blank() {
            return reject(RejectReason::MissingPrice, price_cell);
        }
        let Some(price) = self.numbers.normalize(price_cell) else {
            return reject(RejectReason::InvalidPrice, price_cell);
        };
        if price < 0.0 {
            return reject(RejectReason::NegativePrice, price_cell);
        }

        // 单晚价格（可选，失败或为负视为缺失）
        let price_one_night = self
            .numbers
            .normalize(one_night_cell)
            .filter(|p| *p >= 0.0);

        RowOutcome::Accepted(PriceRecord::new(date, price, price_one_night))
    }
}
