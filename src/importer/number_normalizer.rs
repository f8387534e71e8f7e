// ==========================================
// 住宿报价引擎 - 数值规范化器
// ==========================================
// 职责: 单元格 → 有限实数或拒收
// 支持: 原生数值 / 千分位逗号 / 小数逗号 / 欧式 "1.234,56" / 美式 "1,234.56"
// 剥离: 数字、',' '.' '-' 以外的全部字符（空白/引号/货币符号等）
// ==========================================

use crate::config::engine_config::NormalizerConfig;
use crate::domain::cell::CellValue;
use crate::importer::error::ImportResult;
use regex::Regex;

pub struct NumberNormalizer {
    number_reject_token: String,
    comma_thousands: Regex,
}

impl NumberNormalizer {
    pub fn new(config: &NormalizerConfig) -> ImportResult<Self> {
        Ok(Self {
            number_reject_token: config.number_reject_token.to_lowercase(),
            comma_thousands: Regex::new(r"^\d{1,3}(,\d{3})+(,\d+)?$")?,
        })
    }

    /// 规范化单元格
    ///
    /// # 规则
    /// - 原生数值: 有限即接受
    /// - 文本: 含 "precio" 拒收; 只保留数字与 ',' '.' '-',剥离后为空拒收
    /// - 同时含 ',' 与 '.': 靠后者为小数点,另一个视为千分位
    /// - 只含 ',': 整体符合千分位分组则删除逗号,否则第一个逗号视为小数点
    /// - 其他: 直接解析,非有限数拒收
    pub fn normalize(&self, cell: &CellValue) -> Option<f64> {
        match cell {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => self.normalize_text(s),
            _ => None,
        }
    }

    fn normalize_text(&self, raw: &str) -> Option<f64> {
        if raw.to_lowercase().contains(&self.number_reject_token) {
            return None;
        }

        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
            .collect();
        if cleaned.is_empty() {
            return None;
        }

        let has_comma = cleaned.contains(',');
        let has_dot = cleaned.contains('.');

        let canonical = if has_comma && has_dot {
            let last_comma = cleaned.rfind(',')?;
            let last_dot = cleaned.rfind('.')?;
            if last_comma > last_dot {
                // 欧式: 1.234,56
                cleaned.replace('.', "").replacen(',', ".", 1)
            } else {
                // 美式: 1,234.56
                cleaned.replace(',', "")
            }
        } else if has_comma {
            if self.comma_thousands.is_match(&cleaned) {
                cleaned.replace(',', "")
            } else {
                cleaned.replacen(',', ".", 1)
            }
        } else {
            cleaned
        };

        canonical.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}
