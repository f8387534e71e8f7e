// ==========================================
// 住宿报价引擎 - 区间汇总集成测试
// ==========================================
// 覆盖: 导入后的价格表 + 区间报价的边界语义
// ==========================================

mod test_helpers;

use quote_engine::domain::{DateRange, PriceRecord, PriceTable};
use quote_engine::engine::RangeAggregator;
use quote_engine::ApiError;
use test_helpers::{date, price_csv, seeded_api};

#[test]
fn test_three_nights_at_flat_price() {
    let api = seeded_api(&price_csv(&[
        ("2025-05-01", "100", ""),
        ("2025-05-02", "100", ""),
        ("2025-05-03", "100", ""),
        ("2025-05-04", "100", ""),
    ]));

    let result = api.quote(date(2025, 5, 1), date(2025, 5, 4)).unwrap();

    assert_eq!(result.nights, 3);
    assert_eq!(result.total_price, 300.0);
    assert_eq!(result.surcharge_percent, 0.0);
}

#[test]
fn test_one_night_surcharge_uses_last_date() {
    // 首日无记录,末日 price=120 / priceOneNight=150
    let api = seeded_api(&price_csv(&[("2025-05-02", "120", "150")]));

    let result = api.quote(date(2025, 5, 1), date(2025, 5, 2)).unwrap();

    assert_eq!(result.nights, 1);
    assert_eq!(result.total_price, 0.0);
    assert!((result.surcharge_percent - 80.0).abs() < 1e-9);
}

#[test]
fn test_one_night_bills_one_night_price_of_first_date() {
    let api = seeded_api(&price_csv(&[
        ("2025-05-01", "100", "140"),
        ("2025-05-02", "120", "150"),
    ]));

    let result = api.quote(date(2025, 5, 1), date(2025, 5, 2)).unwrap();

    assert_eq!(result.total_price, 140.0);
    assert!((result.surcharge_percent - 80.0).abs() < 1e-9);
}

#[test]
fn test_same_day_is_zero() {
    let api = seeded_api(&price_csv(&[("2025-05-01", "100", "150")]));

    let result = api.quote(date(2025, 5, 1), date(2025, 5, 1)).unwrap();

    assert_eq!(result.nights, 0);
    assert_eq!(result.total_price, 0.0);
    assert_eq!(result.surcharge_percent, 0.0);
}

#[test]
fn test_multi_night_ignores_one_night_price() {
    let api = seeded_api(&price_csv(&[
        ("2025-05-01", "100", "999"),
        ("2025-05-02", "110", "999"),
        ("2025-05-03", "120", "999"),
    ]));

    let result = api.quote(date(2025, 5, 1), date(2025, 5, 3)).unwrap();

    assert_eq!(result.total_price, 210.0);
    assert_eq!(result.surcharge_percent, 0.0);
}

#[test]
fn test_later_duplicate_rows_win() {
    let api = seeded_api(&price_csv(&[
        ("2025-05-01", "100", ""),
        ("01/05/2025", "130", ""),
    ]));

    let result = api.quote(date(2025, 5, 1), date(2025, 5, 2)).unwrap();

    assert_eq!(result.total_price, 130.0);
    assert_eq!(api.current_table().len(), 1);
}

#[test]
fn test_date_formats_land_on_same_record() {
    // ISO / 日在前 / 序列日期 → 同一天
    let api = seeded_api(&price_csv(&[
        ("2025-01-01", "100", ""),
        ("02/01/2025", "100", ""),
        ("45660", "100", ""),
    ]));

    let nightly = api.nightly_prices(date(2025, 1, 1), date(2025, 1, 4)).unwrap();

    assert_eq!(nightly.len(), 3);
    assert!(nightly.iter().all(|n| n.price == Some(100.0)));
}

#[test]
fn test_inverted_range_is_error() {
    let api = seeded_api(&price_csv(&[("2025-05-01", "100", "")]));

    let result = api.quote(date(2025, 5, 3), date(2025, 5, 1));

    assert!(matches!(result, Err(ApiError::InvalidRange(_))));
}

#[test]
fn test_aggregator_on_large_sparse_table() {
    let records = (0..365).map(|offset| {
        PriceRecord::new(
            date(2025, 1, 1) + chrono::Duration::days(offset),
            if offset % 2 == 0 { 50.0 } else { 70.0 },
            None,
        )
    });
    let table = PriceTable::from_records(1, None, records);
    let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 11)).unwrap();

    let result = RangeAggregator::new().quote(&range, &table);

    // 10 晚: 5 × 50 + 5 × 70
    assert_eq!(result.nights, 10);
    assert_eq!(result.total_price, 600.0);
}
