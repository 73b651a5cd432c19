//! xlsx読み込み（calamine + ハイパーリンク）

use super::cell_ref::CellRef;
use super::hyperlinks::read_hyperlinks;
use super::{Sheet, Workbook};
use crate::error::Result;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;

/// xlsxのバイト列をワークブックに変換
pub fn read_xlsx(bytes: &[u8]) -> Result<Workbook> {
    let mut xlsx: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let mut links = read_hyperlinks(bytes)?;

    let mut workbook = Workbook::new();
    for name in xlsx.sheet_names() {
        let range = xlsx.worksheet_range(&name)?;
        let mut sheet = sheet_from_range(&name, &range);

        if let Some(sheet_links) = links.remove(&name) {
            for link in sheet_links {
                sheet.add_hyperlink(link);
            }
        }

        log::debug!(
            "シート読み込み: {} ({}行, リンク{}件)",
            name,
            sheet.row_count(),
            sheet.hyperlink_count()
        );
        workbook.add_sheet(sheet);
    }

    Ok(workbook)
}

/// 使用範囲をA1起点の絶対座標に置き直す
fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let Some((row_offset, col_offset)) = range.start() else {
        return sheet;
    };

    for (row, col, data) in range.used_cells() {
        let text = cell_text(data);
        if !text.is_empty() {
            sheet.set_value(
                CellRef::new(row_offset + row as u32, col_offset + col as u32),
                text,
            );
        }
    }

    sheet
}

/// セル値を表示用文字列に変換（1.0 → "1"）
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
