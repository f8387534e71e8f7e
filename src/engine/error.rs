// ==========================================
// 住宿报价引擎 - 报价错误类型
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 报价错误类型（日期区间不合法）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("日期区间倒置: start={start}, end={end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("入住日期早于可预订起始日: start={start}, min_date={min_date}")]
    BeforeMinDate {
        start: NaiveDate,
        min_date: NaiveDate,
    },

    #[error("退房日期晚于可预订截止日: end={end}, max_date={max_date}")]
    AfterMaxDate { end: NaiveDate, max_date: NaiveDate },

    #[error("区间天数超限: days={days}, max_days={max_days}")]
    TooManyDays { days: i64, max_days: u32 },
}
