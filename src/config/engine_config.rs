// ==========================================
// 住宿报价引擎 - 引擎配置结构
// ==========================================
// 职责: 表头名/列位回退/日期纪元/拒收关键字/区间约束的显式配置
// 说明: 所有字段均有默认值,部分配置文件会被默认值补全
// ==========================================

use crate::engine::range_policy::RangePolicy;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// 默认日期表头
pub const DEFAULT_DATE_HEADER: &str = "FirstDate";
/// 默认价格表头模式
pub const DEFAULT_PRICE_PATTERN: &str = "^(precio|price)$";
/// 默认单晚价格表头模式
pub const DEFAULT_ONE_NIGHT_PATTERN: &str = "^(precioUnaNoche|priceOneNight)$";

// ==========================================
// ColumnConfig - 列定位配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// 日期列表头（大小写不敏感精确匹配）
    pub date_header: String,

    /// 价格列表头模式（大小写不敏感正则）
    pub price_pattern: String,

    /// 单晚价格列表头模式（大小写不敏感正则）
    pub one_night_pattern: String,

    /// 日期列回退列位（A 列）
    pub date_fallback: usize,

    /// 价格列回退列位（H 列）
    pub price_fallback: usize,

    /// 单晚价格列回退列位（I 列）
    pub one_night_fallback: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date_header: DEFAULT_DATE_HEADER.to_string(),
            price_pattern: DEFAULT_PRICE_PATTERN.to_string(),
            one_night_pattern: DEFAULT_ONE_NIGHT_PATTERN.to_string(),
            date_fallback: 0,
            price_fallback: 7,
            one_night_fallback: 8,
        }
    }
}

// ==========================================
// NormalizerConfig - 日期/数值规范化配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// 表格序列日期纪元（1899-12-30）
    pub serial_epoch: NaiveDate,

    /// 两位年份所属世纪（2000 → "25" 解析为 2025）
    pub two_digit_year_base: i32,

    /// 日期单元格拒收关键字（表头串入数据行）
    pub date_reject_token: String,

    /// 数值单元格拒收关键字（表头串入数据行）
    pub number_reject_token: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            serial_epoch: default_serial_epoch(),
            two_digit_year_base: 2000,
            date_reject_token: "fecha".to_string(),
            number_reject_token: "precio".to_string(),
        }
    }
}

/// 表格序列日期纪元
///
/// 常量日期,构造不会失败
pub fn default_serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

// ==========================================
// EngineConfig - 引擎总配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub columns: ColumnConfig,
    pub normalizer: NormalizerConfig,
    pub range_policy: RangePolicy,
}

impl EngineConfig {
    /// 校验配置值
    ///
    /// # 规则
    /// - date_header 非空
    /// - 两个表头模式可编译
    /// - two_digit_year_base 为整百年
    /// - 拒收关键字非空
    /// - max_days >= 1, min_date <= max_date
    pub fn validate(&self) -> ImportResult<()> {
        if self.columns.date_header.trim().is_empty() {
            return Err(value_error("columns.date_header", "", "日期表头不能为空"));
        }

        for (key, pattern) in [
            ("columns.price_pattern", &self.columns.price_pattern),
            ("columns.one_night_pattern", &self.columns.one_night_pattern),
        ] {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| value_error(key, pattern, &e.to_string()))?;
        }

        let base = self.normalizer.two_digit_year_base;
        let last_year = base
            .checked_add(99)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 12, 31));
        if base % 100 != 0 || last_year.is_none() {
            return Err(value_error(
                "normalizer.two_digit_year_base",
                &base.to_string(),
                "必须为整百年",
            ));
        }

        for (key, token) in [
            ("normalizer.date_reject_token", &self.normalizer.date_reject_token),
            ("normalizer.number_reject_token", &self.normalizer.number_reject_token),
        ] {
            if token.trim().is_empty() {
                return Err(value_error(key, token, "拒收关键字不能为空"));
            }
        }

        let policy = &self.range_policy;
        if policy.max_days == Some(0) {
            return Err(value_error("range_policy.max_days", "0", "最大天数必须 >= 1"));
        }
        if let (Some(min), Some(max)) = (policy.min_date, policy.max_date) {
            if min > max {
                return Err(value_error(
                    "range_policy.min_date",
                    &min.to_string(),
                    &format!("晚于 max_date={}", max),
                ));
            }
        }

        Ok(())
    }
}

fn value_error(key: &str, value: &str, message: &str) -> ImportError {
    ImportError::ConfigValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
