// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的价格表文本、临时文件、模拟数据源
// ==========================================
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use quote_engine::config::EngineConfig;
use quote_engine::importer::{ImportError, ImportResult, PriceSource, RawPayload};
use quote_engine::QuoteApi;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::NamedTempFile;

/// 日期构造
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 每个单元格加引号的 CSV 行（与表格导出格式一致）
pub fn quoted_line(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(",")
}

/// 构造价格表 CSV: 表头 FirstDate,precio,precioUnaNoche + 数据行
pub fn price_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut lines = vec![quoted_line(&["FirstDate", "precio", "precioUnaNoche"])];
    for &(d, price, one_night) in rows {
        lines.push(quoted_line(&[d, price, one_night]));
    }
    lines.join("\n") + "\n"
}

/// 写入带扩展名的临时文件
pub fn write_temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file.flush().expect("刷新临时文件失败");
    file
}

/// 默认配置的报价 API
pub fn default_api() -> QuoteApi {
    QuoteApi::new(&EngineConfig::default()).expect("创建 QuoteApi 失败")
}

/// 默认配置并已导入给定 CSV 的报价 API
pub fn seeded_api(csv: &str) -> QuoteApi {
    let api = default_api();
    api.ingest(&RawPayload::CsvText(csv.to_string()))
        .expect("导入测试数据失败");
    api
}

// ==========================================
// FailingSource - 始终失败的数据源
// ==========================================
pub struct FailingSource;

#[async_trait]
impl PriceSource for FailingSource {
    async fn fetch(&self) -> ImportResult<RawPayload> {
        Err(ImportError::SourceFetchError {
            source_name: "failing".to_string(),
            message: "connection reset".to_string(),
        })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

// ==========================================
// SlowSource - 延迟返回的数据源（用于取消测试）
// ==========================================
pub struct SlowSource {
    pub delay: Duration,
    pub payload: RawPayload,
    pub completed: AtomicUsize,
}

impl SlowSource {
    pub fn new(delay: Duration, payload: RawPayload) -> Self {
        Self {
            delay,
            payload,
            completed: AtomicUsize::new(0),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for SlowSource {
    async fn fetch(&self) -> ImportResult<RawPayload> {
        tokio::time::sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }

    fn describe(&self) -> String {
        format!("slow:{:?}", self.delay)
    }
}
