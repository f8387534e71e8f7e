// ==========================================
// 住宿报价引擎 - 原始表读取器
// ==========================================
// 职责: 载荷 → 表头 + 数据行（不做任何清洗）
// 支持: CSV 文本 / 单元格矩阵 / Sheets values JSON / Excel (.xlsx/.xls)
// 红线: 空载荷返回空表,不是错误
// ==========================================

use crate::domain::cell::{CellValue, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::price_importer_trait::TableParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ==========================================
// RawPayload - 原始载荷
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// CSV 文本（首行表头）
    CsvText(String),
    /// 单元格矩阵（首行表头）
    Matrix(Vec<Vec<CellValue>>),
    /// Google Sheets v4 values 响应体
    SheetValuesJson(String),
    /// 工作簿文件（sheet 为空时取第一张表）
    Workbook { path: PathBuf, sheet: Option<String> },
}

/// 文件扩展名对应的载荷类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Csv,
    Json,
    Workbook,
}

impl PayloadKind {
    /// 根据扩展名判断（大小写不敏感）
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(PayloadKind::Csv),
            "json" => Ok(PayloadKind::Json),
            "xlsx" | "xls" => Ok(PayloadKind::Workbook),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    /// 用已读取的文本构造载荷（工作簿不读文本,直接引用路径）
    pub fn into_payload(self, path: &Path, text: Option<String>) -> RawPayload {
        match self {
            PayloadKind::Csv => RawPayload::CsvText(text.unwrap_or_default()),
            PayloadKind::Json => RawPayload::SheetValuesJson(text.unwrap_or_default()),
            PayloadKind::Workbook => RawPayload::Workbook {
                path: path.to_path_buf(),
                sheet: None,
            },
        }
    }
}

impl RawPayload {
    /// 载荷类型名（日志使用）
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawPayload::CsvText(_) => "csv",
            RawPayload::Matrix(_) => "matrix",
            RawPayload::SheetValuesJson(_) => "sheet_values",
            RawPayload::Workbook { .. } => "workbook",
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 表头: 逗号分隔,支持引号包裹,去空白
// 数据行: 每个 `",` 改写为 `";` 后按 ';' 切分,单元格保持原样（含引号）
pub struct CsvParser;

impl CsvParser {
    pub fn parse_text(&self, text: &str) -> ImportResult<RawTable> {
        let lines: Vec<&str> = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .collect();

        let Some((header_line, data_lines)) = lines.split_first() else {
            return Ok(RawTable::default());
        };

        let header = self.parse_header(header_line)?;
        let rows = self.parse_data_lines(data_lines)?;

        Ok(RawTable::new(header, rows))
    }

    fn parse_header(&self, line: &str) -> ImportResult<Vec<String>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut header = Vec::new();
        if let Some(record) = reader.records().next() {
            header = record?.iter().map(|h| h.trim().to_string()).collect();
        }
        Ok(header)
    }

    fn parse_data_lines(&self, lines: &[&str]) -> ImportResult<Vec<Vec<CellValue>>> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let rewritten: Vec<String> = lines.iter().map(|l| l.replace("\",", "\";")).collect();
        let joined = rewritten.join("\n");

        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .quoting(false)
            .from_reader(joined.as_bytes());

        let mut rows = Vec::with_capacity(lines.len());
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(CellValue::from).collect());
        }
        Ok(rows)
    }
}

// ==========================================
// Matrix Parser 实现
// ==========================================
// 首行渲染为文本作为表头,其余行原样保留
pub struct MatrixParser;

impl MatrixParser {
    pub fn parse_matrix(&self, matrix: &[Vec<CellValue>]) -> RawTable {
        let Some((header_row, body)) = matrix.split_first() else {
            return RawTable::default();
        };

        let header = header_row
            .iter()
            .map(|cell| cell.as_text().trim().to_string())
            .collect();

        RawTable::new(header, body.to_vec())
    }
}

// ==========================================
// Sheets values JSON Parser 实现
// ==========================================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetValuesResponse {
    #[serde(default)]
    major_dimension: Option<String>,
    #[serde(default)]
    values: Vec<Vec<CellValue>>,
}

pub struct SheetValuesParser;

impl SheetValuesParser {
    /// 解析为行优先矩阵（COLUMNS 维度转置）
    pub fn parse_values(&self, json: &str) -> ImportResult<Vec<Vec<CellValue>>> {
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response: SheetValuesResponse = serde_json::from_str(json)?;
        let column_major = response
            .major_dimension
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case("COLUMNS"));

        if column_major {
            Ok(transpose(response.values))
        } else {
            Ok(response.values)
        }
    }
}

/// 列优先 → 行优先（短列以空单元格补齐）
fn transpose(columns: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = vec![Vec::with_capacity(columns.len()); height];

    for column in columns {
        let len = column.len();
        for (row_idx, cell) in column.into_iter().enumerate() {
            rows[row_idx].push(cell);
        }
        for row in rows.iter_mut().skip(len) {
            row.push(CellValue::Empty);
        }
    }
    rows
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_workbook(&self, path: &Path, sheet: Option<&str>) -> ImportResult<Vec<Vec<CellValue>>> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = match sheet {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect())
    }
}

/// 工作簿单元格 → CellValue（日期单元格保留为序列数）
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        _ => CellValue::Empty,
    }
}

// ==========================================
// 通用表解析器（按载荷类型分派）
// ==========================================
pub struct UniversalTableParser;

impl TableParser for UniversalTableParser {
    fn parse_table(&self, payload: &RawPayload) -> ImportResult<RawTable> {
        match payload {
            RawPayload::CsvText(text) => CsvParser.parse_text(text),
            RawPayload::Matrix(matrix) => Ok(MatrixParser.parse_matrix(matrix)),
            RawPayload::SheetValuesJson(json) => {
                let matrix = SheetValuesParser.parse_values(json)?;
                Ok(MatrixParser.parse_matrix(&matrix))
            }
            RawPayload::Workbook { path, sheet } => {
                let matrix = ExcelParser.parse_workbook(path, sheet.as_deref())?;
                Ok(MatrixParser.parse_matrix(&matrix))
            }
        }
    }
}
