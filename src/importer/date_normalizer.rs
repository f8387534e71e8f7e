// ==========================================
// 住宿报价引擎 - 日期规范化器
// ==========================================
// 职责: 单元格 → 日历日期（YYYY-MM-DD）或拒收
// 支持: 原生日期 / 表格序列日期 / ISO / 日-月-年 / 两位年份 / 英文月份名
// 红线: 只取年月日字段,不经过时间戳换算
// ==========================================

use crate::config::engine_config::NormalizerConfig;
use crate::domain::cell::CellValue;
use crate::importer::error::ImportResult;
use chrono::{Days, NaiveDate};
use regex::Regex;

/// 序列日期允许的最大绝对值（超出 chrono 可表达范围前即拒收）
const MAX_SERIAL_DAYS: f64 = 100_000_000.0;

/// 兜底解析格式（英文月份名 / 宽松位数）
///
/// 仅在文本含四位年份时尝试,chrono 的 %Y 也接受一两位年份
const GENERIC_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%a, %d %b %Y",
    "%a %b %d %Y",
    "%A, %B %d, %Y",
];

pub struct DateNormalizer {
    config: NormalizerConfig,
    date_reject_token: String,
    numeric: Regex,
    time_suffix: Regex,
    iso: Regex,
    day_first: Regex,
    four_digit_year: Regex,
}

impl DateNormalizer {
    pub fn new(config: NormalizerConfig) -> ImportResult<Self> {
        let date_reject_token = config.date_reject_token.to_lowercase();
        Ok(Self {
            config,
            date_reject_token,
            numeric: Regex::new(r"^-?\d+(\.\d+)?$")?,
            time_suffix: Regex::new(r"[ T]\d+:\d+")?,
            iso: Regex::new(r"^(\d{4})([-/.])(\d{2})([-/.])(\d{2})$")?,
            day_first: Regex::new(r"^(\d{1,2})([-/.])(\d{1,2})([-/.])(\d{4}|\d{2})$")?,
            four_digit_year: Regex::new(r"(^|\D)\d{4}(\D|$)")?,
        })
    }

    /// 规范化单元格
    ///
    /// # 判定顺序（命中即返回）
    /// 1. 原生日期 → 取显示的年月日
    /// 2. 纯数字/数字字符串 → 表格序列日期（纪元 1899-12-30,向下取整）
    /// 3. 文本: 含 "fecha" 拒收; 去引号; 去时间后缀
    /// 4. 严格 ISO: YYYY-MM-DD / YYYY/MM/DD / YYYY.MM.DD
    /// 5. 日在前: DD/MM/YYYY 等,单位数日月,两位年份 → 20YY
    /// 6. 兜底通用解析
    /// 7. 其他 → None
    pub fn normalize(&self, cell: &CellValue) -> Option<NaiveDate> {
        match cell {
            CellValue::Empty | CellValue::Bool(_) => None,
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Number(n) => self.from_serial(*n),
            CellValue::Text(s) => self.normalize_text(s),
        }
    }

    /// 规范化字符串（CLI 参数等直接输入）
    pub fn normalize_str(&self, input: &str) -> Option<NaiveDate> {
        self.normalize_text(input)
    }

    /// 表格序列日期 → 日历日期
    pub fn from_serial(&self, serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() {
            return None;
        }

        let days = serial.floor();
        if days.abs() > MAX_SERIAL_DAYS {
            return None;
        }

        let epoch = self.config.serial_epoch;
        if days >= 0.0 {
            epoch.checked_add_days(Days::new(days as u64))
        } else {
            epoch.checked_sub_days(Days::new((-days) as u64))
        }
    }

    fn normalize_text(&self, raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        // 表头串入数据行
        if trimmed.to_lowercase().contains(&self.date_reject_token) {
            return None;
        }

        let unquoted = strip_quotes(trimmed);

        // 数字字符串 → 序列日期
        if self.numeric.is_match(unquoted) {
            return unquoted.parse::<f64>().ok().and_then(|n| self.from_serial(n));
        }

        // 去掉时间后缀，只保留日期部分
        let date_part = match self.time_suffix.find(unquoted) {
            Some(m) => unquoted[..m.start()].trim(),
            None => unquoted,
        };
        if date_part.is_empty() {
            return None;
        }

        self.parse_iso(date_part)
            .or_else(|| self.parse_day_first(date_part))
            .or_else(|| self.parse_generic(date_part))
    }

    /// 严格 ISO（年-月-日,分隔符一致,月日两位）
    fn parse_iso(&self, s: &str) -> Option<NaiveDate> {
        let caps = self.iso.captures(s)?;
        if caps[2] != caps[4] {
            return None;
        }

        let year = caps[1].parse().ok()?;
        let month = caps[3].parse().ok()?;
        let day = caps[5].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// 日在前（日-月-年,分隔符一致）
    fn parse_day_first(&self, s: &str) -> Option<NaiveDate> {
        let caps = self.day_first.captures(s)?;
        if caps[2] != caps[4] {
            return None;
        }

        let day = caps[1].parse().ok()?;
        let month = caps[3].parse().ok()?;
        let year_raw = &caps[5];
        let year: i32 = year_raw.parse().ok()?;
        let year = if year_raw.len() == 2 {
            self.config.two_digit_year_base.checked_add(year)?
        } else {
            year
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// 兜底通用解析，结果只取年月日
    fn parse_generic(&self, s: &str) -> Option<NaiveDate> {
        if !self.four_digit_year.is_match(s) {
            return None;
        }

        GENERIC_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    }
}

/// 去掉首尾各一层引号
fn strip_quotes(s: &str) -> &str {
    let s = s
        .strip_prefix('"')
        .or_else(|| s.strip_prefix('\''))
        .unwrap_or(s);
    let s = s
        .strip_suffix('"')
        .or_else(|| s.strip_suffix('\''))
        .unwrap_or(s);
    s.trim()
}
