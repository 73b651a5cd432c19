//! ワークブック読み込みモジュール
//!
//! xlsxをシート単位のセル表とハイパーリンク表に変換する。
//! セル位置はA1起点の絶対座標で保持する（メニュー行の料理セルは常にD列）。

mod cell_ref;
mod hyperlinks;
mod xlsx;

pub use cell_ref::{CellRef, Location};
pub use hyperlinks::HyperlinkRange;
pub use xlsx::read_xlsx;

use crate::error::{Result, TrackerError};
use nutrition_common::Record;
use std::collections::HashMap;

/// 1枚のシート
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    /// 行→列のセル値（空セルは空文字）
    rows: Vec<Vec<String>>,
    /// リンク範囲（ファイル内の順。重なる場合は後のものが優先）
    hyperlinks: Vec<HyperlinkRange>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A1起点の行データから作成
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut sheet = Self::new(name);
        sheet.rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// セル値を設定（必要に応じて表を広げる）
    pub fn set_value(&mut self, cell: CellRef, value: impl Into<String>) {
        let (row, col) = (cell.row as usize, cell.col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.into();
    }

    pub fn set_hyperlink(&mut self, cell: CellRef, target: impl Into<String>) {
        self.add_hyperlink(HyperlinkRange::new(cell, cell, target));
    }

    pub fn add_hyperlink(&mut self, link: HyperlinkRange) {
        self.hyperlinks.push(link);
    }

    /// セル値を取得（空セル・範囲外は `None`）
    pub fn value(&self, cell: CellRef) -> Option<&str> {
        self.rows
            .get(cell.row as usize)
            .and_then(|r| r.get(cell.col as usize))
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// セルを含むリンク範囲のリンク先
    pub fn hyperlink(&self, cell: CellRef) -> Option<&str> {
        self.hyperlinks
            .iter()
            .rev()
            .find(|link| link.contains(cell))
            .map(|link| link.target.as_str())
    }

    /// リンク範囲の数
    pub fn hyperlink_count(&self) -> usize {
        self.hyperlinks.len()
    }

    /// 行数（末尾の空行を含む場合あり）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 最初に値のある行（使用範囲の先頭）
    pub fn first_used_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.iter().any(|c| !c.is_empty()))
    }

    /// 行の値（末尾の空セルは除く）
    pub fn row_values(&self, row: usize) -> &[String] {
        let Some(cells) = self.rows.get(row) else {
            return &[];
        };
        let len = cells
            .iter()
            .rposition(|c| !c.is_empty())
            .map(|i| i + 1)
            .unwrap_or(0);
        &cells[..len]
    }

    /// 見出し行をキーにした行オブジェクトに変換
    ///
    /// - 使用範囲の先頭行が見出し
    /// - 空セルはキーごと省略し、値のない行は捨てる
    /// - 空の見出しは `__EMPTY`, `__EMPTY_1`…、重複見出しは `名前_1`…
    pub fn records(&self) -> Vec<Record> {
        let Some(header_row) = self.first_used_row() else {
            return Vec::new();
        };
        let first_col = self
            .rows
            .iter()
            .skip(header_row)
            .filter_map(|r| r.iter().position(|c| !c.is_empty()))
            .min()
            .unwrap_or(0);
        let width = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);

        let headers = unique_headers(
            (first_col..width).map(|c| self.rows[header_row].get(c).map(|s| s.as_str()).unwrap_or("")),
        );

        self.rows
            .iter()
            .skip(header_row + 1)
            .filter_map(|row| {
                let record: Record = headers
                    .iter()
                    .enumerate()
                    .filter_map(|(i, header)| {
                        row.get(first_col + i)
                            .filter(|v| !v.is_empty())
                            .map(|v| (header.as_str(), v.as_str()))
                    })
                    .collect();
                (!record.is_empty()).then_some(record)
            })
            .collect()
    }
}

/// 見出しを一意化
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|h| {
        let base = if h.trim().is_empty() { "__EMPTY" } else { h };
        let count = seen.entry(base.to_string()).or_insert(0);
        let name = if *count == 0 {
            base.to_string()
        } else {
            format!("{}_{}", base, count)
        };
        *count += 1;
        name
    })
    .collect()
}

/// シートの集合
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// シート名で取得（なければ `SheetNotFound`）
    pub fn require(&self, name: &str) -> Result<&Sheet> {
        self.sheet(name)
            .ok_or_else(|| TrackerError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
