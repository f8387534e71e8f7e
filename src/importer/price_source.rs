// ==========================================
// 住宿报价引擎 - 价格数据源
// ==========================================
// 职责: 一次性获取原始载荷
// 实现: 文件数据源（tokio 异步读取）/ 内存数据源
// 说明: HTTP 获取由外部协作方负责,结果以内存数据源接入
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{PayloadKind, RawPayload};
use crate::importer::price_importer_trait::PriceSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// FilePriceSource - 文件数据源
// ==========================================
#[derive(Debug, Clone)]
pub struct FilePriceSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl FilePriceSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// 指定工作表（仅对 .xlsx/.xls 生效）
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PriceSource for FilePriceSource {
    async fn fetch(&self) -> ImportResult<RawPayload> {
        let kind = PayloadKind::from_path(&self.path)?;

        if !tokio::fs::try_exists(&self.path).await? {
            return Err(ImportError::FileNotFound(self.path.display().to_string()));
        }

        let payload = match kind {
            PayloadKind::Workbook => RawPayload::Workbook {
                path: self.path.clone(),
                sheet: self.sheet.clone(),
            },
            _ => {
                let text = tokio::fs::read_to_string(&self.path).await?;
                debug!(path = %self.path.display(), bytes = text.len(), "文件读取完成");
                kind.into_payload(&self.path, Some(text))
            }
        };

        Ok(payload)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

// ==========================================
// StaticPriceSource - 内存数据源
// ==========================================
// 用途: 接入外部已获取的载荷（HTTP 响应体、测试数据）
#[derive(Debug, Clone)]
pub struct StaticPriceSource {
    name: String,
    payload: RawPayload,
}

impl StaticPriceSource {
    pub fn new(name: impl Into<String>, payload: RawPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn fetch(&self) -> ImportResult<RawPayload> {
        Ok(self.payload.clone())
    }

    fn describe(&self) -> String {
        format!("static:{}", self.name)
    }
}
