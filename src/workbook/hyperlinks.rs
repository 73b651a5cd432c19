//! シート内ハイパーリンクの読み込み
//!
//! calamineはハイパーリンクを公開しないため、xlsxパッケージのXMLを直接読む。
//! ブック内リンク（`location` 属性）のみ対象。外部URLはメニュー→レシピの照合に使わない。

use super::cell_ref::CellRef;
use crate::error::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// ブック内リンク1件（`ref` が範囲なら範囲内の全セルに適用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkRange {
    /// 左上
    pub start: CellRef,
    /// 右下
    pub end: CellRef,
    pub target: String,
}

impl HyperlinkRange {
    pub fn new(start: CellRef, end: CellRef, target: impl Into<String>) -> Self {
        Self {
            start,
            end,
            target: target.into(),
        }
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }
}

/// シート名→リンク一覧（ファイル内の順）
pub type SheetHyperlinks = HashMap<String, Vec<HyperlinkRange>>;

/// xlsxのバイト列から全シートのブック内リンクを読む
pub fn read_hyperlinks(bytes: &[u8]) -> Result<SheetHyperlinks> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;

    let Some(workbook_xml) = read_zip_entry(&mut zip, WORKBOOK_PART)? else {
        return Ok(HashMap::new());
    };
    let sheets = parse_sheet_ids(&workbook_xml)?;
    let rels = match read_zip_entry(&mut zip, WORKBOOK_RELS_PART)? {
        Some(xml) => parse_relationships(&xml)?,
        None => HashMap::new(),
    };

    let mut out = HashMap::new();
    for (name, rel_id) in sheets {
        let Some(target) = rels.get(&rel_id) else {
            log::debug!("シート {} の参照 {} が見つかりません", name, rel_id);
            continue;
        };
        let part = resolve_part_path(target);
        let Some(sheet_xml) = read_zip_entry(&mut zip, &part)? else {
            continue;
        };
        let links = parse_sheet_hyperlinks(&sheet_xml)?;
        if !links.is_empty() {
            out.insert(name, links);
        }
    }

    Ok(out)
}

/// workbook.xml から (シート名, r:id) を順に取得
fn parse_sheet_ids(xml: &[u8]) -> Result<Vec<(String, String)>> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut out = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr_value(&reader, &e, b"name")?;
                let id = attr_value(&reader, &e, b"id")?;
                if let (Some(name), Some(id)) = (name, id) {
                    out.push((name, id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

/// .rels から Id→Target を取得
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut out = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&reader, &e, b"Id")?;
                let target = attr_value(&reader, &e, b"Target")?;
                if let (Some(id), Some(target)) = (id, target) {
                    out.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

/// シートXMLの `<hyperlink ref=".." location=".."/>` を取得
fn parse_sheet_hyperlinks(xml: &[u8]) -> Result<Vec<HyperlinkRange>> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut out = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"hyperlink" => {
                let reference = attr_value(&reader, &e, b"ref")?;
                let location = attr_value(&reader, &e, b"location")?;
                if let (Some(reference), Some(location)) = (reference, location) {
                    match CellRef::parse_range(&reference) {
                        Ok((start, end)) => out.push(HyperlinkRange::new(start, end, location)),
                        Err(err) => log::warn!("ハイパーリンクを無視します: {}", err),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

/// 属性値をローカル名で取得（`r:id` は `id`）
fn attr_value(reader: &XmlReader<&[u8]>, e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.decode_and_unescape_value(reader)?.into_owned()));
        }
    }
    Ok(None)
}

/// workbook.xml.rels の Target をパッケージ内パスに変換
fn resolve_part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

fn read_zip_entry<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    match zip.by_name(name) {
        Ok(mut entry) => {
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            Ok(Some(bytes))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
