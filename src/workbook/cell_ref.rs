//! セル参照（A1形式）とシート内位置の解析

use crate::error::{Result, TrackerError};
use regex::Regex;
use std::fmt;

/// Excelの最大列数（XFD）
const MAX_COLUMNS: u32 = 16_384;

/// 0始まりの行・列番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// `D2` / `$D$2` 形式を解析
    pub fn parse(reference: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref A1_RE: Regex = Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]+)$").unwrap();
        }

        let invalid = || TrackerError::InvalidCellReference(reference.to_string());
        let caps = A1_RE.captures(reference.trim()).ok_or_else(invalid)?;

        let col = caps[1]
            .chars()
            .fold(0u32, |acc, c| acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1));
        let row: u32 = caps[2].parse().map_err(|_| invalid())?;

        if row == 0 || col == 0 || col > MAX_COLUMNS {
            return Err(invalid());
        }

        Ok(Self { row: row - 1, col: col - 1 })
    }

    /// `D2:F4` 形式の範囲を左上・右下に分解（単一セルも可）
    pub fn parse_range(range: &str) -> Result<(Self, Self)> {
        match range.split_once(':') {
            Some((start, end)) => {
                let a = Self::parse(start)?;
                let b = Self::parse(end)?;
                Ok((
                    Self::new(a.row.min(b.row), a.col.min(b.col)),
                    Self::new(a.row.max(b.row), a.col.max(b.col)),
                ))
            }
            None => {
                let cell = Self::parse(range)?;
                Ok((cell, cell))
            }
        }
    }

    /// 列番号を列名に変換（0 → A, 26 → AA）
    pub fn column_name(col: u32) -> String {
        let mut n = col + 1;
        let mut name = Vec::new();
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            name.push((b'A' + rem) as char);
            n = (n - 1) / 26;
        }
        name.iter().rev().collect()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_name(self.col), self.row + 1)
    }
}

/// ハイパーリンク先などのシート内位置（例: `'Быстрые рецепты'!A5`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// シート名（省略時は同じシート）
    pub sheet: Option<String>,
    /// 範囲指定の場合は左上セル
    pub cell: CellRef,
}

impl Location {
    pub fn parse(target: &str) -> Result<Self> {
        let target = target.trim().trim_start_matches('#');

        let (sheet, reference) = match target.rsplit_once('!') {
            Some((sheet, reference)) => (Some(unquote_sheet_name(sheet)), reference),
            None => (None, target),
        };

        let (cell, _) = CellRef::parse_range(reference)?;
        Ok(Self { sheet, cell })
    }

    /// 指定シートを指しているか
    pub fn points_to(&self, sheet_name: &str) -> bool {
        self.sheet.as_deref() == Some(sheet_name)
    }
}

/// `'Sheet ''1'''` → `Sheet '1'`
fn unquote_sheet_name(name: &str) -> String {
    let name = name.trim();
    if name.len() >= 2 && name.starts_with('\'') && name.ends_with('\'') {
        name[1..name.len() - 1].replace("''", "'")
    } else {
        name.to_string()
    }
}
