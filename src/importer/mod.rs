// ==========================================
// 住宿报价引擎 - 导入层
// ==========================================
// 职责: 外部价格数据导入,生成按日价格记录
// 支持: CSV 文本, 单元格矩阵, Sheets values JSON, Excel
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod date_normalizer;
pub mod error;
pub mod file_parser;
pub mod number_normalizer;
pub mod price_importer_impl;
pub mod price_importer_trait;
pub mod price_source;
pub mod record_builder;

// 重导出核心类型
pub use column_resolver::ColumnResolver;
pub use date_normalizer::DateNormalizer;
pub use error::{ImportError, ImportResult};
pub use file_parser::{
    CsvParser, ExcelParser, MatrixParser, PayloadKind, RawPayload, SheetValuesParser,
    UniversalTableParser,
};
pub use number_normalizer::NumberNormalizer;
pub use price_importer_impl::PriceImporterImpl;
pub use price_source::{FilePriceSource, StaticPriceSource};
pub use record_builder::RecordBuilder;

// 重导出 Trait 接口
pub use price_importer_trait::{PriceImporter, PriceSource, TableParser};
