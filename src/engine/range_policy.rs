// ==========================================
// 住宿报价引擎 - 日期区间约束
// ==========================================
// 职责: 构造合法 DateRange + 可预订窗口/最大天数校验
// 输入: 用户选择的 start/end
// 输出: DateRange 或 QuoteError
// ==========================================

use crate::domain::quote::DateRange;
use crate::engine::error::QuoteError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RangePolicy - 区间约束（全部可选）
// ==========================================
// max_days: 可选天数上限（含首尾）,即 end <= start + (max_days - 1)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangePolicy {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub max_days: Option<u32>,
}

impl RangePolicy {
    /// 无约束
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// 构造并校验区间
    ///
    /// # 校验顺序
    /// 1. start <= end
    /// 2. start >= min_date
    /// 3. end <= max_date
    /// 4. 含首尾天数 <= max_days
    pub fn build_range(&self, start: NaiveDate, end: NaiveDate) -> Result<DateRange, QuoteError> {
        let range = DateRange::new(start, end).ok_or(QuoteError::InvertedRange { start, end })?;
        self.validate(&range)?;
        Ok(range)
    }

    /// 校验已构造的区间
    pub fn validate(&self, range: &DateRange) -> Result<(), QuoteError> {
        if let Some(min_date) = self.min_date {
            if range.start() < min_date {
                return Err(QuoteError::BeforeMinDate {
                    start: range.start(),
                    min_date,
                });
            }
        }

        if let Some(max_date) = self.max_date {
            if range.end() > max_date {
                return Err(QuoteError::AfterMaxDate {
                    end: range.end(),
                    max_date,
                });
            }
        }

        if let Some(max_days) = self.max_days {
            let days = range.nights() + 1;
            if days > i64::from(max_days) {
                return Err(QuoteError::TooManyDays { days, max_days });
            }
        }

        Ok(())
    }
}
