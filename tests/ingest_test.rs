//! 取り込み統合テスト
//!
//! 実際の .xlsx（ハイパーリンク付き）を生成して、読み込み→解析→公開→再読み込みを検証

mod common;

use common::{Fixture, MenuRow, DESSERTS, MENU, RECIPES};
use nutrition_common::{MatchKind, RecipeResolver};
use nutrition_tracker::error::TrackerError;
use nutrition_tracker::ingest::{ingest_file, ingest_workbook};
use nutrition_tracker::layout::WorkbookLayout;
use nutrition_tracker::store::{FileStore, SessionStore, SNAPSHOT_KEY};
use nutrition_tracker::workbook::{read_xlsx, CellRef};
use tempfile::tempdir;

fn write_fixture(fixture: &Fixture, dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let bytes = fixture.to_xlsx().expect("Failed to build workbook");
    std::fs::write(&path, bytes).unwrap();
    path
}

/// シート名・順序・ハイパーリンクがそのまま読めること
#[test]
fn test_read_xlsx_sheets_and_hyperlinks() {
    let bytes = Fixture::default().to_xlsx().unwrap();
    let workbook = read_xlsx(&bytes).unwrap();

    assert_eq!(workbook.sheet_names(), vec![MENU, RECIPES, DESSERTS, common::SHOPPING]);

    let menu = workbook.sheet(MENU).unwrap();
    let d2 = CellRef::parse("D2").unwrap();
    assert_eq!(menu.value(d2), Some("Oatmeal"));
    assert_eq!(menu.hyperlink(d2), Some("'Быстрые рецепты'!A3"));
    assert_eq!(menu.hyperlink_count(), 1);

    let recipes = workbook.sheet(RECIPES).unwrap();
    assert_eq!(recipes.value(CellRef::parse("A3").unwrap()), Some("Oatmeal Bowl"));
}

/// 取り込み結果の4つの表と索引
#[test]
fn test_ingest_real_workbook() {
    let bytes = Fixture::default().to_xlsx().unwrap();
    let workbook = read_xlsx(&bytes).unwrap();
    let data = ingest_workbook(&workbook, &WorkbookLayout::default()).unwrap();

    // 3列しかない行は除外
    assert_eq!(data.menu.len(), 3);
    assert_eq!(data.menu[0].day, "Mon");
    assert_eq!(data.menu[0].meal_time, "Breakfast");
    assert_eq!(data.menu[0].meal_slot, "Meal1");
    assert_eq!(data.menu[0].dish, "Oatmeal");
    assert_eq!(data.menu[1].dish, "Grilled Chicken Salad");

    assert_eq!(data.recipes.len(), 4);
    assert_eq!(data.recipes[1].get("Состав (в сыром виде)"), Some("oats 50 g, milk 200 ml"));
    assert_eq!(data.desserts.len(), 1);
    assert_eq!(data.desserts[0].get("Название"), Some("Сырники"));

    // 数値セルは文字列として取り込む
    assert_eq!(data.shopping.len(), 2);
    assert_eq!(data.shopping[0].product, "Овсянка");
    assert_eq!(data.shopping[0].quantity, "500");

    assert_eq!(data.recipe_map.len(), 1);
    assert_eq!(data.recipe_map.linked_recipe("oatmeal"), Some("oatmeal bowl"));
}

/// リンク優先・部分一致・見つからない場合
#[test]
fn test_resolve_against_real_workbook() {
    let bytes = Fixture::default().to_xlsx().unwrap();
    let workbook = read_xlsx(&bytes).unwrap();
    let data = ingest_workbook(&workbook, &WorkbookLayout::default()).unwrap();
    let resolver = RecipeResolver::new(&data, "Блюдо");

    // "Oatmeal Cookies" が先に部分一致するが、リンク先が優先される
    let linked = resolver.resolve_with_kind(Some("Oatmeal")).unwrap();
    assert_eq!(linked.kind, MatchKind::Linked);
    assert_eq!(linked.record.get("Блюдо"), Some("Oatmeal Bowl"));

    let substring = resolver.resolve_with_kind(Some("omelette")).unwrap();
    assert_eq!(substring.kind, MatchKind::Substring);
    assert_eq!(substring.record.get("Блюдо"), Some("Cheese Omelette"));

    // 入力がレシピ名を含む方向では一致しない
    assert!(resolver.resolve(Some("Grilled Chicken Salad")).is_none());
    assert!(resolver.resolve(None).is_none());
}

/// 必須シートが1つ欠けていれば中断
#[test]
fn test_missing_sheet_aborts() {
    let fixture = Fixture {
        include_desserts: false,
        ..Default::default()
    };
    let workbook = read_xlsx(&fixture.to_xlsx().unwrap()).unwrap();

    let err = ingest_workbook(&workbook, &WorkbookLayout::default()).unwrap_err();
    match err {
        TrackerError::SheetNotFound(name) => assert_eq!(name, DESSERTS),
        other => panic!("unexpected error: {other}"),
    }
}

/// 別シートを指すリンクは索引に入らない
#[test]
fn test_link_to_other_sheet_ignored() {
    let fixture = Fixture {
        menu: vec![MenuRow::linked(
            &["Mon", "Breakfast", "Meal1", "Сырники"],
            "'ПП-десерты'!A2",
        )],
        ..Default::default()
    };
    let workbook = read_xlsx(&fixture.to_xlsx().unwrap()).unwrap();
    let data = ingest_workbook(&workbook, &WorkbookLayout::default()).unwrap();

    assert_eq!(data.menu.len(), 1);
    assert!(data.recipe_map.is_empty());
}

/// ファイル取り込み→保存→別セッションで再読み込み
#[tokio::test]
async fn test_ingest_file_persists_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_fixture(&Fixture::default(), dir.path(), "menu.xlsx");
    let data_dir = dir.path().join("data");
    let layout = WorkbookLayout::default();

    let store = SessionStore::open(FileStore::new(&data_dir));
    let report = ingest_file(&store, &path, &layout).await.unwrap();

    assert_eq!(report.menu_entries, 3);
    assert_eq!(report.recipes, 4);
    assert_eq!(report.desserts, 1);
    assert_eq!(report.shopping_items, 2);
    assert_eq!(report.linked_dishes, 1);
    assert!(report.persistence.is_saved());
    assert!(data_dir.join(format!("{}.json", SNAPSHOT_KEY)).exists());

    let reopened = SessionStore::open(FileStore::new(&data_dir));
    let snapshot = reopened.require_snapshot().unwrap();
    assert_eq!(snapshot.menu.len(), 3);
    assert_eq!(snapshot.recipe_map.linked_recipe("Oatmeal"), Some("oatmeal bowl"));
    assert_eq!(
        RecipeResolver::new(&snapshot, "Блюдо")
            .resolve(Some("Oatmeal"))
            .and_then(|r| r.get("Блюдо")),
        Some("Oatmeal Bowl")
    );
}

/// 再取り込みは前回の結果を完全に置き換える
#[tokio::test]
async fn test_reingest_replaces_everything() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = write_fixture(&Fixture::default(), dir.path(), "first.xlsx");
    let second = write_fixture(
        &Fixture {
            menu: vec![MenuRow::plain(&["Fri", "Dinner", "Meal3", "Суп"])],
            recipes: vec![["Суп овощной", "овощи", "варить"]],
            desserts: vec![],
            shopping: vec![("Морковь", 2.0)],
            include_desserts: true,
        },
        dir.path(),
        "second.xlsx",
    );
    let layout = WorkbookLayout::default();
    let store = SessionStore::open(FileStore::new(dir.path().join("data")));

    ingest_file(&store, &first, &layout).await.unwrap();
    let report = ingest_file(&store, &second, &layout).await.unwrap();
    assert_eq!(report.linked_dishes, 0);

    let snapshot = store.require_snapshot().unwrap();
    assert_eq!(snapshot.menu.len(), 1);
    assert_eq!(snapshot.menu[0].dish, "Суп");
    assert_eq!(snapshot.recipes.len(), 1);
    assert!(snapshot.desserts.is_empty());
    assert_eq!(snapshot.shopping[0].quantity, "2");
    // 前回のリンクは残らない
    assert!(snapshot.recipe_map.is_empty());
    assert!(RecipeResolver::new(&snapshot, "Блюдо").resolve(Some("Oatmeal")).is_none());
}

/// 失敗した取り込みは公開済みの結果を変えない
#[tokio::test]
async fn test_failed_ingest_keeps_previous_data() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = write_fixture(&Fixture::default(), dir.path(), "good.xlsx");
    let broken = write_fixture(
        &Fixture {
            include_desserts: false,
            ..Default::default()
        },
        dir.path(),
        "broken.xlsx",
    );
    let not_xlsx = dir.path().join("notes.xlsx");
    std::fs::write(&not_xlsx, "not a workbook").unwrap();

    let layout = WorkbookLayout::default();
    let store = SessionStore::open(FileStore::new(dir.path().join("data")));
    ingest_file(&store, &good, &layout).await.unwrap();

    let err = ingest_file(&store, &broken, &layout).await.unwrap_err();
    assert!(matches!(err, TrackerError::SheetNotFound(_)));
    assert!(ingest_file(&store, &not_xlsx, &layout).await.is_err());

    let snapshot = store.require_snapshot().unwrap();
    assert_eq!(snapshot.menu.len(), 3);
    assert_eq!(snapshot.recipe_map.len(), 1);
    assert!(!store.is_ingesting());
}

/// 存在しないファイル
#[tokio::test]
async fn test_ingest_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SessionStore::open(FileStore::new(dir.path()));
    let missing = dir.path().join("missing.xlsx");

    let err = ingest_file(&store, &missing, &WorkbookLayout::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::FileNotFound(_)));
    assert!(store.snapshot().is_none());
}
