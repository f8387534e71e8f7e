// ==========================================
// 住宿报价引擎 - 价格导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 载荷获取 → 原始表读取 → 列定位 → 逐行构建 → 汇总
// ==========================================

use crate::domain::cell::RawTable;
use crate::domain::import::PriceImport;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawPayload;
use async_trait::async_trait;

// ==========================================
// PriceSource Trait
// ==========================================
// 用途: 一次性获取原始载荷（唯一的异步边界）
// 实现者: FilePriceSource, StaticPriceSource
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// 获取原始载荷
    ///
    /// # 返回
    /// - Ok(RawPayload): 载荷（可以为空）
    /// - Err: 数据源不可用,调用方保持旧价格表
    async fn fetch(&self) -> ImportResult<RawPayload>;

    /// 数据源描述（日志使用）
    fn describe(&self) -> String;
}

// ==========================================
// TableParser Trait
// ==========================================
// 用途: 载荷 → 原始表
// 实现者: UniversalTableParser
pub trait TableParser: Send + Sync {
    /// 解析载荷为表头 + 数据行
    ///
    /// # 返回
    /// - Ok(RawTable): 空载荷返回空表
    /// - Err: 格式错误（JSON 损坏、工作簿无法打开等）
    fn parse_table(&self, payload: &RawPayload) -> ImportResult<RawTable>;
}

// ==========================================
// PriceImporter Trait
// ==========================================
// 用途: 价格导入主接口
// 实现者: PriceImporterImpl
pub trait PriceImporter: Send + Sync {
    /// 从原始载荷导入
    ///
    /// # 导入流程
    /// 1. 原始表读取
    /// 2. 列定位（表头匹配 + 固定列位回退）
    /// 3. 逐行日期/数值规范化,构建记录
    /// 4. 汇总统计
    fn import_payload(&self, payload: &RawPayload) -> ImportResult<PriceImport>;

    /// 从已读取的原始表导入（跳过阶段 1）
    fn import_table(&self, table: &RawTable) -> PriceImport;
}
