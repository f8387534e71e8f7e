// ==========================================
// 住宿报价引擎 - 报价API
// ==========================================
// 职责: 封装价格数据刷新与区间报价
// 流程: 数据源获取 → 导入 → 快照替换; 报价读取当前快照
// 红线: 获取失败/取消/空载荷时保持旧快照不变
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::import::ImportSummary;
use crate::domain::price::PriceTable;
use crate::domain::quote::{NightlyPrice, QuoteResult};
use crate::engine::{RangeAggregator, RangePolicy};
use crate::importer::{
    DateNormalizer, PriceImporter, PriceImporterImpl, PriceSource, RawPayload,
};
use crate::repository::PriceTableRepository;
use chrono::NaiveDate;
use futures::future::{AbortRegistration, Abortable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 刷新结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestOutcome {
    /// 快照已替换
    Replaced { version: u64, summary: ImportSummary },
    /// 载荷为空,快照保持不变
    Skipped { reason: String },
    /// 获取被取消,快照保持不变
    Cancelled,
}

/// 报价API
pub struct QuoteApi {
    importer: Box<dyn PriceImporter>,
    repo: PriceTableRepository,
    aggregator: RangeAggregator,
    policy: RangePolicy,
    dates: DateNormalizer,
}

impl QuoteApi {
    /// 按配置创建
    pub fn new(config: &EngineConfig) -> ApiResult<Self> {
        let importer = PriceImporterImpl::new(config)?;
        Self::with_importer(config, Box::new(importer))
    }

    /// 指定导入器创建（先校验配置）
    pub fn with_importer(config: &EngineConfig, importer: Box<dyn PriceImporter>) -> ApiResult<Self> {
        config.validate()?;

        Ok(Self {
            importer,
            repo: PriceTableRepository::new(),
            aggregator: RangeAggregator::new(),
            policy: config.range_policy.clone(),
            dates: DateNormalizer::new(config.normalizer.clone())?,
        })
    }

    pub fn policy(&self) -> &RangePolicy {
        &self.policy
    }

    /// 当前价格表快照
    pub fn current_table(&self) -> Arc<PriceTable> {
        self.repo.snapshot()
    }

    // ==========================================
    // 数据刷新
    // ==========================================

    /// 导入已获取的载荷
    ///
    /// # 返回
    /// - Ok(Replaced): 导入完成,快照已替换（仅表头时为空表）
    /// - Ok(Skipped): 载荷连表头都没有,快照不变
    /// - Err: 载荷格式错误,快照不变
    #[instrument(skip(self, payload), fields(kind = payload.kind_name()))]
    pub fn ingest(&self, payload: &RawPayload) -> ApiResult<IngestOutcome> {
        let import = self.importer.import_payload(payload)?;

        if import.is_empty_payload() {
            warn!(version = self.repo.version(), "载荷为空,保留当前价格表");
            return Ok(IngestOutcome::Skipped {
                reason: "载荷为空".to_string(),
            });
        }

        let summary = import.summary;
        let table = self.repo.replace(import.records, summary.batch_id.clone());

        info!(
            version = table.version(),
            batch_id = %summary.batch_id,
            dates = table.len(),
            rejected = summary.rejected,
            "价格表已更新"
        );

        Ok(IngestOutcome::Replaced {
            version: table.version(),
            summary,
        })
    }

    /// 从数据源刷新
    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub async fn refresh(&self, source: &dyn PriceSource) -> ApiResult<IngestOutcome> {
        let payload = source.fetch().await.map_err(|e| {
            warn!(error = %e, "数据源获取失败,保留当前价格表");
            ApiError::from(e)
        })?;

        self.ingest(&payload)
    }

    /// 可取消的刷新
    ///
    /// 取消只作用于获取阶段; 取消后快照不变
    #[instrument(skip(self, source, registration), fields(source = %source.describe()))]
    pub async fn refresh_abortable(
        &self,
        source: &dyn PriceSource,
        registration: AbortRegistration,
    ) -> ApiResult<IngestOutcome> {
        let fetched = Abortable::new(source.fetch(), registration).await;

        let payload = match fetched {
            Ok(result) => result.map_err(|e| {
                warn!(error = %e, "数据源获取失败,保留当前价格表");
                ApiError::from(e)
            })?,
            Err(_aborted) => {
                warn!("刷新已取消,保留当前价格表");
                return Ok(IngestOutcome::Cancelled);
            }
        };

        self.ingest(&payload)
    }

    // ==========================================
    // 报价
    // ==========================================

    /// 区间报价
    pub fn quote(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<QuoteResult> {
        let range = self.policy.build_range(start, end)?;
        let table = self.repo.snapshot();
        Ok(self.aggregator.quote(&range, &table))
    }

    /// 计费夜明细
    pub fn nightly_prices(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<Vec<NightlyPrice>> {
        let range = self.policy.build_range(start, end)?;
        let table = self.repo.snapshot();
        Ok(self.aggregator.nightly_prices(&range, &table))
    }

    /// 解析用户输入的日期（接受导入时支持的全部格式）
    pub fn parse_date(&self, input: &str) -> ApiResult<NaiveDate> {
        self.dates
            .normalize_str(input)
            .ok_or_else(|| ApiError::InvalidInput(format!("无法识别的日期: {}", input)))
    }
}
