// ==========================================
// 住宿报价引擎 - 日期区间与报价结果
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DateRange - 入住/退房日期区间
// ==========================================
// 约束: start <= end（构造时校验,倒置区间无法构造）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeFields")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// 反序列化中间形态,经 DateRange::new 校验
#[derive(Deserialize)]
struct DateRangeFields {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeFields> for DateRange {
    type Error = String;

    fn try_from(fields: DateRangeFields) -> Result<Self, Self::Error> {
        DateRange::new(fields.start, fields.end).ok_or_else(|| {
            format!("日期区间倒置: start={}, end={}", fields.start, fields.end)
        })
    }
}

impl DateRange {
    /// 创建区间，start > end 时返回 None
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 晚数 = 日历日差
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// 逐日枚举 start..=end（含首尾）
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

// ==========================================
// QuoteResult - 报价结果（派生,不存储）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub nights: i64,            // 晚数
    pub total_price: f64,       // 总价
    pub surcharge_percent: f64, // 单晚加价指标（百分比,不计入总价）
}

impl QuoteResult {
    pub fn zero() -> Self {
        Self {
            nights: 0,
            total_price: 0.0,
            surcharge_percent: 0.0,
        }
    }
}

// ==========================================
// NightlyPrice - 计费夜明细
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NightlyPrice {
    pub date: NaiveDate,
    pub price: Option<f64>, // 当日无价格记录时为 None
}
