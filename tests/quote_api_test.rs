// ==========================================
// 住宿报价引擎 - 报价API集成测试
// ==========================================
// 覆盖: 刷新（成功/失败/取消/空载荷）对快照的影响 + 区间约束
// ==========================================

mod test_helpers;

use futures::future::AbortHandle;
use quote_engine::api::{ApiError, IngestOutcome, QuoteApi};
use quote_engine::config::EngineConfig;
use quote_engine::engine::{QuoteError, RangePolicy};
use quote_engine::importer::{FilePriceSource, RawPayload, StaticPriceSource};
use quote_engine::logging;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::{
    date, default_api, price_csv, seeded_api, write_temp_file, FailingSource, SlowSource,
};

fn seed_csv() -> String {
    price_csv(&[("2025-06-01", "100", "130"), ("2025-06-02", "100", "130")])
}

// ==========================================
// 刷新
// ==========================================

#[tokio::test]
async fn test_refresh_from_file_replaces_snapshot() {
    logging::init_test();
    let api = default_api();
    let file = write_temp_file(".csv", &seed_csv());

    let outcome = api.refresh(&FilePriceSource::new(file.path())).await.unwrap();

    match outcome {
        IngestOutcome::Replaced { version, summary } => {
            assert_eq!(version, 1);
            assert_eq!(summary.accepted, 2);
            assert_eq!(api.current_table().batch_id(), Some(summary.batch_id.as_str()));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(api.quote(date(2025, 6, 1), date(2025, 6, 3)).unwrap().total_price, 200.0);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let api = seeded_api(&seed_csv());
    let before = api.current_table();

    let result = api.refresh(&FailingSource).await;

    assert!(matches!(result, Err(ApiError::SourceUnavailable(_))));
    let after = api.current_table();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.version(), 1);
}

#[tokio::test]
async fn test_missing_file_keeps_previous_snapshot() {
    let api = seeded_api(&seed_csv());

    let result = api.refresh(&FilePriceSource::new("no_such_prices.csv")).await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert_eq!(api.current_table().len(), 2);
}

#[tokio::test]
async fn test_malformed_payload_keeps_previous_snapshot() {
    let api = seeded_api(&seed_csv());
    let source = StaticPriceSource::new("broken", RawPayload::SheetValuesJson("{".to_string()));

    let result = api.refresh(&source).await;

    assert!(matches!(result, Err(ApiError::ImportError(_))));
    assert_eq!(api.current_table().version(), 1);
}

#[tokio::test]
async fn test_empty_payload_is_skipped() {
    let api = seeded_api(&seed_csv());
    let source = StaticPriceSource::new("empty", RawPayload::CsvText(String::new()));

    let outcome = api.refresh(&source).await.unwrap();

    assert!(matches!(outcome, IngestOutcome::Skipped { .. }));
    assert_eq!(api.current_table().version(), 1);
    assert_eq!(api.current_table().len(), 2);
}

#[tokio::test]
async fn test_header_only_payload_replaces_with_empty_table() {
    let api = seeded_api(&seed_csv());
    let source = StaticPriceSource::new("header", RawPayload::CsvText(price_csv(&[])));

    let outcome = api.refresh(&source).await.unwrap();

    assert!(matches!(outcome, IngestOutcome::Replaced { version: 2, .. }));
    assert!(api.current_table().is_empty());
    assert_eq!(api.quote(date(2025, 6, 1), date(2025, 6, 3)).unwrap().total_price, 0.0);
}

#[tokio::test]
async fn test_repeated_refresh_is_idempotent() {
    let api = default_api();
    let source = StaticPriceSource::new("same", RawPayload::CsvText(seed_csv()));

    api.refresh(&source).await.unwrap();
    let first = api.current_table();
    api.refresh(&source).await.unwrap();
    let second = api.current_table();

    assert_eq!(second.version(), first.version() + 1);
    assert_eq!(
        first.records().collect::<Vec<_>>(),
        second.records().collect::<Vec<_>>()
    );
}

// ==========================================
// 取消
// ==========================================

#[tokio::test]
async fn test_aborted_before_start_is_cancelled() {
    let api = seeded_api(&seed_csv());
    let source = SlowSource::new(Duration::from_millis(10), RawPayload::CsvText(price_csv(&[])));
    let (handle, registration) = AbortHandle::new_pair();
    handle.abort();

    let outcome = api.refresh_abortable(&source, registration).await.unwrap();

    assert_eq!(outcome, IngestOutcome::Cancelled);
    assert_eq!(source.completed(), 0);
    assert_eq!(api.current_table().version(), 1);
}

#[tokio::test]
async fn test_abort_in_flight_keeps_snapshot() {
    let api = seeded_api(&seed_csv());
    let source = SlowSource::new(Duration::from_secs(30), RawPayload::CsvText(price_csv(&[])));
    let (handle, registration) = AbortHandle::new_pair();

    let aborter = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.abort();
    });

    let outcome = api.refresh_abortable(&source, registration).await.unwrap();
    aborter.await.unwrap();

    assert_eq!(outcome, IngestOutcome::Cancelled);
    assert_eq!(source.completed(), 0);
    assert_eq!(api.current_table().len(), 2);
}

#[tokio::test]
async fn test_not_aborted_refresh_completes() {
    let api = default_api();
    let source = SlowSource::new(Duration::from_millis(5), RawPayload::CsvText(seed_csv()));
    let (_handle, registration) = AbortHandle::new_pair();

    let outcome = api.refresh_abortable(&source, registration).await.unwrap();

    assert!(matches!(outcome, IngestOutcome::Replaced { version: 1, .. }));
    assert_eq!(source.completed(), 1);
}

// ==========================================
// 并发读取
// ==========================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_see_whole_snapshots_during_refresh() {
    let api = Arc::new(default_api());
    let small = RawPayload::CsvText(price_csv(&[("2025-06-01", "100", "")]));
    let large = RawPayload::CsvText(price_csv(&[
        ("2025-06-01", "200", ""),
        ("2025-06-02", "200", ""),
        ("2025-06-03", "200", ""),
    ]));

    let writer = {
        let api = Arc::clone(&api);
        tokio::spawn(async move {
            for i in 0..50 {
                let payload = if i % 2 == 0 { &small } else { &large };
                api.ingest(payload).unwrap();
            }
        })
    };

    let reader = {
        let api = Arc::clone(&api);
        tokio::spawn(async move {
            for _ in 0..200 {
                let table = api.current_table();
                // 快照只可能是空表、小表或大表之一
                let total: f64 = table.records().map(|r| r.price).sum();
                assert!(
                    [0.0, 100.0, 600.0].contains(&total),
                    "mixed snapshot: total={}",
                    total
                );
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(api.current_table().version(), 50);
}

// ==========================================
// 区间约束
// ==========================================

#[test]
fn test_range_policy_enforced() {
    let config = EngineConfig {
        range_policy: RangePolicy {
            min_date: Some(date(2025, 6, 1)),
            max_date: Some(date(2025, 6, 30)),
            max_days: Some(7),
        },
        ..Default::default()
    };
    let api = QuoteApi::new(&config).unwrap();

    assert!(matches!(
        api.quote(date(2025, 5, 31), date(2025, 6, 2)),
        Err(ApiError::InvalidRange(QuoteError::BeforeMinDate { .. }))
    ));
    assert!(matches!(
        api.quote(date(2025, 6, 29), date(2025, 7, 1)),
        Err(ApiError::InvalidRange(QuoteError::AfterMaxDate { .. }))
    ));
    assert!(matches!(
        api.quote(date(2025, 6, 1), date(2025, 6, 8)),
        Err(ApiError::InvalidRange(QuoteError::TooManyDays { days: 8, max_days: 7 }))
    ));
    assert!(api.quote(date(2025, 6, 1), date(2025, 6, 7)).is_ok());
}
