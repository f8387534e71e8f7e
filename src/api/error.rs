// ==========================================
// 住宿报价引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/报价错误转换为调用方可读的错误消息
// ==========================================

use crate::engine::error::QuoteError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("日期区间不合法: {0}")]
    InvalidRange(#[from] QuoteError),

    // ==========================================
    // 数据源/导入错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据源不可用: {0}")]
    SourceUnavailable(String),

    #[error("价格数据导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            // 文件错误
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件不存在: {}", path)),
            ImportError::FileReadError(msg) => ApiError::SourceUnavailable(msg),
            ImportError::SourceFetchError {
                source_name,
                message,
            } => ApiError::SourceUnavailable(format!("{}: {}", source_name, message)),

            // 格式错误
            err @ (ImportError::UnsupportedFormat(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_)
            | ImportError::JsonParseError(_)) => ApiError::ImportError(err.to_string()),

            // 配置错误
            err @ (ImportError::ConfigReadError { .. } | ImportError::ConfigValueError { .. }) => {
                ApiError::ConfigError(err.to_string())
            }

            // 通用错误
            ImportError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_import_error_mapping() {
        let err: ApiError = ImportError::FileNotFound("prices.csv".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m.contains("prices.csv")));

        let err: ApiError = ImportError::SourceFetchError {
            source_name: "sheet".to_string(),
            message: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::SourceUnavailable(ref m) if m == "sheet: timeout"));

        let err: ApiError = ImportError::JsonParseError("eof".to_string()).into();
        assert!(matches!(err, ApiError::ImportError(_)));

        let err: ApiError = ImportError::ConfigValueError {
            key: "k".to_string(),
            value: "v".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ConfigError(_)));
    }

    #[test]
    fn test_quote_error_keeps_variant() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err: ApiError = QuoteError::InvertedRange { start, end }.into();

        assert!(matches!(
            err,
            ApiError::InvalidRange(QuoteError::InvertedRange { .. })
        ));
        assert!(err.to_string().contains("2025-01-02"));
    }
}
