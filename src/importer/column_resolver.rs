// ==========================================
// 住宿报价引擎 - 列定位器
// ==========================================
// 职责: 语义字段（date / price / priceOneNight）→ 列号
// 顺序: 表头精确匹配（日期）/ 表头模式匹配（价格）→ 固定列位回退
// 说明: 多列命中时取第一个
// ==========================================

use crate::config::engine_config::ColumnConfig;
use crate::domain::import::{ColumnLayout, ColumnPick};
use crate::domain::types::{ColumnSource, PriceField};
use crate::importer::error::ImportResult;
use regex::{Regex, RegexBuilder};
use tracing::info;

pub struct ColumnResolver {
    date_header: String,
    price_pattern: Regex,
    one_night_pattern: Regex,
    date_fallback: usize,
    price_fallback: usize,
    one_night_fallback: usize,
}

impl ColumnResolver {
    /// 编译表头模式（大小写不敏感）
    pub fn new(config: &ColumnConfig) -> ImportResult<Self> {
        Ok(Self {
            date_header: config.date_header.trim().to_lowercase(),
            price_pattern: RegexBuilder::new(&config.price_pattern)
                .case_insensitive(true)
                .build()?,
            one_night_pattern: RegexBuilder::new(&config.one_night_pattern)
                .case_insensitive(true)
                .build()?,
            date_fallback: config.date_fallback,
            price_fallback: config.price_fallback,
            one_night_fallback: config.one_night_fallback,
        })
    }

    /// 定位三个字段
    pub fn resolve(&self, header: &[String]) -> ColumnLayout {
        let layout = ColumnLayout {
            date: self.pick(
                header.iter().position(|h| h.to_lowercase() == self.date_header),
                self.date_fallback,
            ),
            price: self.pick(
                header.iter().position(|h| self.price_pattern.is_match(h)),
                self.price_fallback,
            ),
            price_one_night: self.pick(
                header.iter().position(|h| self.one_night_pattern.is_match(h)),
                self.one_night_fallback,
            ),
        };

        for field in [PriceField::Date, PriceField::Price, PriceField::PriceOneNight] {
            let pick = layout.pick(field);
            if pick.source == ColumnSource::Fallback {
                info!(field = %field, column = pick.index, "表头未命中,使用固定列位");
            }
        }

        layout
    }

    fn pick(&self, found: Option<usize>, fallback: usize) -> ColumnPick {
        match found {
            Some(index) => ColumnPick {
                index,
                source: ColumnSource::Header,
            },
            None => ColumnPick {
                index: fallback,
                source: ColumnSource::Fallback,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn resolver() -> ColumnResolver {
        ColumnResolver::new(&ColumnConfig::default()).unwrap()
    }

    #[test]
    fn test_header_match_case_insensitive() {
        let layout = resolver().resolve(&header(&["x", "FIRSTDATE", "Precio", "PriceOneNight"]));

        assert_eq!(layout.date, ColumnPick { index: 1, source: ColumnSource::Header });
        assert_eq!(layout.price, ColumnPick { index: 2, source: ColumnSource::Header });
        assert_eq!(
            layout.price_one_night,
            ColumnPick { index: 3, source: ColumnSource::Header }
        );
    }

    #[test]
    fn test_positional_fallback() {
        let layout = resolver().resolve(&header(&["Fecha", "Importe"]));

        assert_eq!(layout.date, ColumnPick { index: 0, source: ColumnSource::Fallback });
        assert_eq!(layout.price, ColumnPick { index: 7, source: ColumnSource::Fallback });
        assert_eq!(
            layout.price_one_night,
            ColumnPick { index: 8, source: ColumnSource::Fallback }
        );
    }

    #[test]
    fn test_first_match_wins_and_patterns_are_anchored() {
        let layout = resolver().resolve(&header(&[
            "FirstDate",
            "precioUnaNoche",
            "price",
            "precio",
            "priceOneNight",
        ]));

        // "precioUnaNoche" 不匹配 ^(precio|price)$
        assert_eq!(layout.price.index, 2);
        assert_eq!(layout.price_one_night.index, 1);
    }

    #[test]
    fn test_custom_config() {
        let config = ColumnConfig {
            date_header: "Llegada".to_string(),
            price_fallback: 1,
            ..Default::default()
        };
        let layout = ColumnResolver::new(&config)
            .unwrap()
            .resolve(&header(&["a", "b", "llegada"]));

        assert_eq!(layout.date.index, 2);
        assert_eq!(layout.price, ColumnPick { index: 1, source: ColumnSource::Fallback });
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let config = ColumnConfig {
            one_night_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(ColumnResolver::new(&config).is_err());
    }
}
