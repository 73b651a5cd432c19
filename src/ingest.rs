//! ワークブック取り込みモジュール
//!
//! ## 処理フロー
//! 1. 4つの必須シートを名前で検索（1つでも欠ければ中断）
//! 2. メニューシートを行単位で読み、D列のハイパーリンクから料理名→レシピ名の索引を作る
//! 3. レシピ・デザート・買い物リストを見出しキーの行オブジェクトに変換
//! 4. 5つの成果物をまとめてセッションストアに公開・保存
//!
//! 解析に失敗した場合は公開済みの結果に触れない。

use crate::error::Result;
use crate::layout::WorkbookLayout;
use crate::store::{Persistence, SessionStore};
use crate::workbook::{self, CellRef, Location, Sheet, Workbook};
use nutrition_common::{DishRecipeIndex, MenuEntry, ShoppingItem, WorkbookData};
use std::path::Path;

/// メニュー行として扱う最小列数
const MENU_MIN_COLUMNS: usize = 4;
/// 料理名の列（D）
const DISH_COLUMN: u32 = 3;

/// 取り込み結果の概要
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub menu_entries: usize,
    pub recipes: usize,
    pub desserts: usize,
    pub shopping_items: usize,
    pub linked_dishes: usize,
    pub persistence: Persistence,
}

/// ワークブックを解析して取り込み結果を作る（公開はしない）
pub fn ingest_workbook(workbook: &Workbook, layout: &WorkbookLayout) -> Result<WorkbookData> {
    let [menu_sheet, recipe_sheet, dessert_sheet, shopping_sheet] =
        require_sheets(workbook, layout.required_sheets())?;

    let (menu, recipe_map) = read_menu(menu_sheet, recipe_sheet);
    let recipes = recipe_sheet.records();
    let desserts = dessert_sheet.records();
    let shopping = read_shopping(shopping_sheet, layout);

    log::info!(
        "取り込み: メニュー{}件, レシピ{}件, デザート{}件, 買い物{}件, リンク{}件",
        menu.len(),
        recipes.len(),
        desserts.len(),
        shopping.len(),
        recipe_map.len()
    );

    Ok(WorkbookData {
        menu,
        recipes,
        desserts,
        shopping,
        recipe_map,
    })
}

/// 必須シートを順に取得（最初に欠けたシートで `SheetNotFound`）
fn require_sheets<'a>(workbook: &'a Workbook, names: [&str; 4]) -> Result<[&'a Sheet; 4]> {
    let require = |name: &str| {
        workbook
            .require(name)
            .inspect_err(|_| log::debug!("ワークブック内のシート: {:?}", workbook.sheet_names()))
    };
    let [menu, recipes, desserts, shopping] = names;
    Ok([require(menu)?, require(recipes)?, require(desserts)?, require(shopping)?])
}

/// メニュー行と料理名→レシピ名の索引を作る
///
/// 列が4未満の行は読み飛ばす。見出し行は使用範囲の先頭行。
fn read_menu(menu_sheet: &Sheet, recipe_sheet: &Sheet) -> (Vec<MenuEntry>, DishRecipeIndex) {
    let mut menu = Vec::new();
    let mut index = DishRecipeIndex::new();

    let Some(header_row) = menu_sheet.first_used_row() else {
        return (menu, index);
    };

    for row in (header_row + 1)..menu_sheet.row_count() {
        let values = menu_sheet.row_values(row);
        if values.len() < MENU_MIN_COLUMNS {
            continue;
        }

        let dish = values[3].clone();
        let dish_cell = CellRef::new(row as u32, DISH_COLUMN);
        if let Some(recipe_name) = linked_recipe_name(menu_sheet, recipe_sheet, dish_cell) {
            if !dish.is_empty() && index.link(&dish, recipe_name) {
                log::debug!("リンク: {} → {}", dish, recipe_name);
            }
        }

        menu.push(MenuEntry {
            day: values[0].clone(),
            meal_time: values[1].clone(),
            meal_slot: values[2].clone(),
            dish,
        });
    }

    (menu, index)
}

/// 料理セルのハイパーリンクがレシピシートを指していれば、リンク先セルの値を返す
fn linked_recipe_name<'a>(menu_sheet: &Sheet, recipe_sheet: &'a Sheet, dish_cell: CellRef) -> Option<&'a str> {
    let target = menu_sheet.hyperlink(dish_cell)?;
    let location = match Location::parse(target) {
        Ok(location) => location,
        Err(e) => {
            log::debug!("{} のリンク先を解釈できません: {}", dish_cell, e);
            return None;
        }
    };

    if !location.points_to(recipe_sheet.name()) {
        return None;
    }
    recipe_sheet.value(location.cell)
}

fn read_shopping(sheet: &Sheet, layout: &WorkbookLayout) -> Vec<ShoppingItem> {
    let headers = &layout.headers;
    sheet
        .records()
        .into_iter()
        .map(|record| ShoppingItem {
            product: record.get(&headers.product).unwrap_or_default().to_string(),
            quantity: record.get(&headers.quantity).unwrap_or_default().to_string(),
        })
        .collect()
}

/// ワークブックを解析してセッションストアに公開する
pub fn ingest_into(store: &SessionStore, workbook: &Workbook, layout: &WorkbookLayout) -> Result<IngestReport> {
    let _guard = store.begin_ingest()?;
    publish(store, ingest_workbook(workbook, layout)?)
}

/// ファイルを読み込み、解析してセッションストアに公開する
///
/// ファイル読み込みの間だけ待機し、解析・公開は一括で行う。
/// 取り込み中に呼ばれた場合は `IngestInProgress`。
pub async fn ingest_file(store: &SessionStore, path: &Path, layout: &WorkbookLayout) -> Result<IngestReport> {
    let _guard = store.begin_ingest()?;

    if !path.exists() {
        return Err(crate::error::TrackerError::FileNotFound(path.display().to_string()));
    }
    let bytes = tokio::fs::read(path).await?;

    let workbook = workbook::read_xlsx(&bytes)?;
    publish(store, ingest_workbook(&workbook, layout)?)
}

fn publish(store: &SessionStore, data: WorkbookData) -> Result<IngestReport> {
    let menu_entries = data.menu.len();
    let recipes = data.recipes.len();
    let desserts = data.desserts.len();
    let shopping_items = data.shopping.len();
    let linked_dishes = data.recipe_map.len();

    Ok(IngestReport {
        menu_entries,
        recipes,
        desserts,
        shopping_items,
        linked_dishes,
        persistence: store.replace(data),
    })
}
