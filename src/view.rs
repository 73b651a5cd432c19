//! テキスト表示（メニュー・レシピ・デザート・買い物リスト・レシピ詳細）

use crate::layout::Headers;
use nutrition_common::{CompletionState, Record, WorkbookData};
use std::fmt::Write;

/// 完了マーカー
fn mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

/// メニュー: `[x] 曜日 - 時間: 料理名`
pub fn render_menu(data: &WorkbookData, completion: &CompletionState) -> String {
    let mut out = String::new();
    for entry in &data.menu {
        let _ = writeln!(
            out,
            "{} {} - {}: {}",
            mark(completion.is_done(&entry.dish)),
            entry.day,
            entry.meal_time,
            entry.dish
        );
    }
    out
}

/// 名前・材料・作り方の3行で表示
fn render_records(records: &[Record], name: &str, ingredients: &str, steps: &str) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "■ {}", record.get(name).unwrap_or_default());
        if let Some(value) = record.get(ingredients) {
            let _ = writeln!(out, "  {}", value);
        }
        if let Some(value) = record.get(steps) {
            let _ = writeln!(out, "  {}", value);
        }
    }
    out
}

pub fn render_recipes(data: &WorkbookData, headers: &Headers) -> String {
    render_records(
        &data.recipes,
        &headers.recipe_name,
        &headers.recipe_ingredients,
        &headers.recipe_steps,
    )
}

pub fn render_desserts(data: &WorkbookData, headers: &Headers) -> String {
    render_records(
        &data.desserts,
        &headers.dessert_name,
        &headers.dessert_ingredients,
        &headers.dessert_steps,
    )
}

/// 買い物リスト: `[x] 品名: 数量`
pub fn render_shopping(data: &WorkbookData, completion: &CompletionState) -> String {
    let mut out = String::new();
    for item in &data.shopping {
        let _ = writeln!(
            out,
            "{} {}: {}",
            mark(completion.is_done(&item.product)),
            item.product,
            item.quantity
        );
    }
    out
}

/// レシピ詳細（見つからなければ案内文）
pub fn render_recipe_detail(dish: &str, recipe: Option<&Record>, headers: &Headers) -> String {
    let Some(recipe) = recipe else {
        return format!("Рецепт не найден для: {}\n", dish);
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.get(&headers.recipe_name).unwrap_or(dish));
    let _ = writeln!(
        out,
        "Ингредиенты: {}",
        recipe.get(&headers.recipe_ingredients).unwrap_or_default()
    );
    let _ = writeln!(
        out,
        "Приготовление: {}",
        recipe.get(&headers.recipe_steps).unwrap_or_default()
    );
    out
}
