// ==========================================
// 住宿报价引擎 - 原始单元格与原始表
// ==========================================
// 职责: 表达来自 CSV / 单元格矩阵 / 工作簿的未清洗数据
// 生命周期: 仅在导入流程内
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ==========================================
// CellValue - 原始单元格
// ==========================================
// JSON 反序列化: null → Empty, bool → Bool, number → Number, string → Text
// DateTime 仅由调用方直接构造（原生日期值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// 空单元格、纯空白文本或只有引号的文本（如 `""`）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .is_empty(),
            _ => false,
        }
    }

    /// 渲染为文本（表头匹配 / 拒收明细使用）
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

// ==========================================
// RawTable - 原始表（表头 + 数据行）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { header, rows }
    }

    /// 完全没有内容（连表头都没有）
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// 读取单元格，越界视为空单元格
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_from_json() {
        let cells: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 45658, "01/02/2025"]"#).unwrap();

        assert_eq!(cells[0], CellValue::Empty);
        assert_eq!(cells[1], CellValue::Bool(true));
        assert_eq!(cells[2], CellValue::Number(45658.0));
        assert_eq!(cells[3], CellValue::Text("01/02/2025".to_string()));
    }

    #[test]
    fn test_cell_value_as_text() {
        assert_eq!(CellValue::Number(5.0).as_text(), "5");
        assert_eq!(CellValue::Number(5.5).as_text(), "5.5");
        assert_eq!(CellValue::Empty.as_text(), "");
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(CellValue::Text("\"\"".to_string()).is_blank());
        assert!(!CellValue::Text("\"x\"".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_raw_table_cell_out_of_range() {
        let table = RawTable::new(
            vec!["FirstDate".to_string()],
            vec![vec![CellValue::from("2025-01-01")]],
        );

        assert_eq!(table.cell(0, 0), &CellValue::from("2025-01-01"));
        assert_eq!(table.cell(0, 7), &CellValue::Empty);
        assert_eq!(table.cell(3, 0), &CellValue::Empty);
    }
}
