// ==========================================
// 住宿报价引擎 - 区间汇总引擎
// ==========================================
// 红线: 计费日不含最后一天（退房日）; 单晚加价只看最后一天
// ==========================================
// 职责: 计算晚数 / 总价 / 单晚加价百分比
// 输入: DateRange + PriceTable 快照
// 输出: QuoteResult
// ==========================================

use crate::domain::price::PriceTable;
use crate::domain::quote::{DateRange, NightlyPrice, QuoteResult};
use chrono::NaiveDate;
use tracing::{debug, instrument};

// ==========================================
// RangeAggregator - 区间汇总引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeAggregator;

impl RangeAggregator {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算区间报价
    ///
    /// # 规则
    /// 1. nights = end - start（日历日差）
    /// 2. 逐日枚举 start..=end
    /// 3. 适用价格: nights == 1 时优先单晚价格,否则每晚价格
    /// 4. totalPrice = 除最后一天外所有日期的适用价格之和（无记录的日期不计）
    /// 5. surchargePercent = 最后一天 price / priceOneNight * 100（仅 nights == 1）
    #[instrument(skip(self, table), fields(start = %range.start(), end = %range.end(), version = table.version()))]
    pub fn quote(&self, range: &DateRange, table: &PriceTable) -> QuoteResult {
        let nights = range.nights();
        let one_night = nights == 1;

        let total_price: f64 = billed_days(range)
            .filter_map(|date| table.get(&date))
            .map(|record| record.applicable_price(one_night))
            .sum();

        let surcharge_percent = if one_night {
            self.surcharge_percent(range.end(), table)
        } else {
            0.0
        };

        debug!(nights, total_price, surcharge_percent, "区间汇总完成");

        QuoteResult {
            nights,
            total_price,
            surcharge_percent,
        }
    }

    /// 计费夜明细（除最后一天外的每一天）
    pub fn nightly_prices(&self, range: &DateRange, table: &PriceTable) -> Vec<NightlyPrice> {
        let one_night = range.nights() == 1;

        billed_days(range)
            .map(|date| NightlyPrice {
                date,
                price: table.get(&date).map(|r| r.applicable_price(one_night)),
            })
            .collect()
    }

    /// 单晚加价百分比
    ///
    /// 无记录 / 无单晚价格 / 单晚价格为 0 → 0
    fn surcharge_percent(&self, last_date: NaiveDate, table: &PriceTable) -> f64 {
        match table.get(&last_date) {
            Some(record) => match record.price_one_night {
                Some(one_night) if one_night != 0.0 => record.price / one_night * 100.0,
                _ => 0.0,
            },
            None => 0.0,
        }
    }
}

/// 计费日: start..end（不含 end）
fn billed_days(range: &DateRange) -> impl Iterator<Item = NaiveDate> {
    let end = range.end();
    range.days().take_while(move |date| *date < end)
}
