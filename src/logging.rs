// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 输出: stderr（stdout 留给报价结果）
// 格式: 文本 / JSON 行,由 QUOTE_ENGINE_LOG_FORMAT 选择
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志格式环境变量
pub const LOG_FORMAT_ENV: &str = "QUOTE_ENGINE_LOG_FORMAT";

/// 未设置 RUST_LOG 时的默认级别
const DEFAULT_LEVEL: &str = "info";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// 解析格式名（大小写不敏感,未知值按文本处理）
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    /// 读取 QUOTE_ENGINE_LOG_FORMAT
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// RUST_LOG 过滤器,缺省为 info
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=quote_engine::importer=trace
/// - QUOTE_ENGINE_LOG_FORMAT: json → JSON 行
///
/// # 示例
/// ```no_run
/// use quote_engine::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with(LogFormat::from_env());
}

/// 按指定格式初始化
pub fn init_with(format: LogFormat) {
    match format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter())
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// 测试环境日志（debug 级别,可重复调用）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
