// ==========================================
// 住宿报价引擎 - 价格导入器实现
// ==========================================
// 职责: 整合导入流程，从原始载荷到价格记录
// 流程: 读取 → 列定位 → 逐行规范化 → 汇总
// 红线: 行级拒收只计数,不中断导入
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::cell::RawTable;
use crate::domain::import::{ImportSummary, PriceImport, RowOutcome};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{RawPayload, UniversalTableParser};
use crate::importer::price_importer_trait::{PriceImporter, TableParser};
use crate::importer::record_builder::RecordBuilder;
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// PriceImporterImpl - 价格导入器实现
// ==========================================
pub struct PriceImporterImpl {
    // 导入组件
    table_parser: Box<dyn TableParser>,
    column_resolver: ColumnResolver,
    record_builder: RecordBuilder,
}

impl PriceImporterImpl {
    /// 按配置创建（默认表解析器）
    pub fn new(config: &EngineConfig) -> ImportResult<Self> {
        Self::with_parser(config, Box::new(UniversalTableParser))
    }

    /// 指定表解析器创建
    pub fn with_parser(config: &EngineConfig, table_parser: Box<dyn TableParser>) -> ImportResult<Self> {
        Ok(Self {
            table_parser,
            column_resolver: ColumnResolver::new(&config.columns)?,
            record_builder: RecordBuilder::new(&config.normalizer)?,
        })
    }
}

impl PriceImporter for PriceImporterImpl {
    #[instrument(skip(self, payload), fields(kind = payload.kind_name()))]
    fn import_payload(&self, payload: &RawPayload) -> ImportResult<PriceImport> {
        // === 步骤 1: 读取原始表 ===
        debug!("步骤 1: 读取原始表");
        let table = self.table_parser.parse_table(payload)?;
        debug!(header = ?table.header, rows = table.rows.len(), "原始表读取完成");

        Ok(self.import_table(&table))
    }

    #[instrument(skip(self, table), fields(batch_id))]
    fn import_table(&self, table: &RawTable) -> PriceImport {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        if table.is_empty() {
            info!(batch_id = %batch_id, "载荷为空,无表头");
            return PriceImport {
                records: Vec::new(),
                rejections: Vec::new(),
                summary: ImportSummary {
                    batch_id,
                    total_rows: 0,
                    accepted: 0,
                    rejected: 0,
                    rejected_by_reason: BTreeMap::new(),
                    duplicates_overwritten: 0,
                    distinct_dates: 0,
                    layout: None,
                    elapsed_ms: start_time.elapsed().as_millis(),
                },
            };
        }

        // === 步骤 2: 列定位 ===
        debug!("步骤 2: 列定位");
        let layout = self.column_resolver.resolve(&table.header);
        debug!(
            date = layout.date.index,
            price = layout.price.index,
            price_one_night = layout.price_one_night.index,
            "列定位完成"
        );

        // === 步骤 3: 逐行构建 ===
        debug!("步骤 3: 逐行构建");
        let mut records = Vec::with_capacity(table.rows.len());
        let mut rejections = Vec::new();
        let mut rejected_by_reason = BTreeMap::new();

        for (idx, row) in table.rows.iter().enumerate() {
            match self.record_builder.build_row(row, &layout, idx + 1) {
                RowOutcome::Accepted(record) => records.push(record),
                RowOutcome::Rejected(rejection) => {
                    debug!(
                        row_number = rejection.row_number,
                        reason = %rejection.reason,
                        raw_value = %rejection.raw_value,
                        "行被拒收"
                    );
                    *rejected_by_reason.entry(rejection.reason).or_insert(0) += 1;
                    rejections.push(rejection);
                }
            }
        }

        // === 步骤 4: 汇总 ===
        let distinct_dates = records.iter().map(|r| r.date).collect::<HashSet<_>>().len();
        let summary = ImportSummary {
            batch_id,
            total_rows: table.rows.len(),
            accepted: records.len(),
            rejected: rejections.len(),
            rejected_by_reason,
            duplicates_overwritten: records.len() - distinct_dates,
            distinct_dates,
            layout: Some(layout),
            elapsed_ms: start_time.elapsed().as_millis(),
        };

        info!(
            batch_id = %summary.batch_id,
            total_rows = summary.total_rows,
            accepted = summary.accepted,
            rejected = summary.rejected,
            duplicates = summary.duplicates_overwritten,
            elapsed_ms = summary.elapsed_ms as u64,
            "价格导入完成"
        );

        PriceImport {
            records,
            rejections,
            summary,
        }
    }
}
