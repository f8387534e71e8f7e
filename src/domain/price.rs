// ==========================================
// 住宿报价引擎 - 价格记录与价格表
// ==========================================
// 职责: 规范化后的按日价格数据
// 红线: 价格表是不可变快照,只能整体替换,不能局部修改
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PriceRecord - 单日价格记录
// ==========================================
// 输出形态: { "date": "YYYY-MM-DD", "price": n, "priceOneNight"?: n }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub date: NaiveDate,                  // 日历日期（无时间、无时区）
    pub price: f64,                       // 每晚价格（>= 0）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_one_night: Option<f64>,     // 单晚价格（仅住一晚时使用）
}

impl PriceRecord {
    pub fn new(date: NaiveDate, price: f64, price_one_night: Option<f64>) -> Self {
        Self {
            date,
            price,
            price_one_night,
        }
    }

    /// 适用价格：住一晚时优先单晚价格，缺失则回退每晚价格
    pub fn applicable_price(&self, one_night: bool) -> f64 {
        if one_night {
            self.price_one_night.unwrap_or(self.price)
        } else {
            self.price
        }
    }
}

// ==========================================
// PriceTable - 价格表快照
// ==========================================
// version: 0 为初始空表,每次成功导入递增
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceTable {
    version: u64,
    batch_id: Option<String>,
    records: BTreeMap<NaiveDate, PriceRecord>,
}

impl PriceTable {
    /// 初始空表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由记录列表构建快照（同一日期后出现的记录覆盖先出现的）
    pub fn from_records<I>(version: u64, batch_id: Option<String>, records: I) -> Self
    where
        I: IntoIterator<Item = PriceRecord>,
    {
        let mut map = BTreeMap::new();
        for record in records {
            map.insert(record.date, record);
        }

        Self {
            version,
            batch_id,
            records: map,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn batch_id(&self) -> Option<&str> {
        self.batch_id.as_deref()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&PriceRecord> {
        self.records.get(date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按日期升序遍历
    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.records.values()
    }

    /// 覆盖的日期范围（首日, 末日）
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.keys().next()?;
        let last = self.records.keys().next_back()?;
        Some((*first, *last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_applicable_price() {
        let with_one_night = PriceRecord::new(date(2025, 1, 1), 120.0, Some(150.0));
        let without = PriceRecord::new(date(2025, 1, 1), 120.0, None);

        assert_eq!(with_one_night.applicable_price(true), 150.0);
        assert_eq!(with_one_night.applicable_price(false), 120.0);
        assert_eq!(without.applicable_price(true), 120.0);
    }

    #[test]
    fn test_from_records_later_duplicate_wins() {
        let table = PriceTable::from_records(
            3,
            Some("batch".to_string()),
            vec![
                PriceRecord::new(date(2025, 1, 1), 100.0, None),
                PriceRecord::new(date(2025, 1, 2), 110.0, None),
                PriceRecord::new(date(2025, 1, 1), 130.0, None),
            ],
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.version(), 3);
        assert_eq!(table.get(&date(2025, 1, 1)).unwrap().price, 130.0);
        assert_eq!(table.date_span(), Some((date(2025, 1, 1), date(2025, 1, 2))));
    }

    #[test]
    fn test_price_record_serde_shape() {
        let record = PriceRecord::new(date(2025, 3, 9), 99.5, None);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json, serde_json::json!({ "date": "2025-03-09", "price": 99.5 }));

        let record = PriceRecord::new(date(2025, 3, 9), 99.5, Some(120.0));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["priceOneNight"], 120.0);
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.version(), 0);
        assert_eq!(table.batch_id(), None);
        assert_eq!(table.date_span(), None);
    }
}
