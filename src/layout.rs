//! ワークブックのレイアウト定義
//!
//! シート名と見出しはワークブックとの契約。既定値は元のRU版ワークブックに合わせる。
//! メニューシートの列は位置で固定（A:曜日, B:時間, C:食事枠, D:料理名）。

use serde::{Deserialize, Serialize};

/// 4つの必須シートの名前
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetNames {
    pub menu: String,
    pub recipes: String,
    pub desserts: String,
    pub shopping: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            menu: "Меню на неделю (v4)".into(),
            recipes: "Быстрые рецепты".into(),
            desserts: "ПП-десерты".into(),
            shopping: "Список покупок (v4)".into(),
        }
    }
}

/// 見出しで読むシートの列名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Headers {
    pub recipe_name: String,
    pub recipe_ingredients: String,
    pub recipe_steps: String,
    pub dessert_name: String,
    pub dessert_ingredients: String,
    pub dessert_steps: String,
    pub product: String,
    pub quantity: String,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            recipe_name: "Блюдо".into(),
            recipe_ingredients: "Состав (в сыром виде)".into(),
            recipe_steps: "Приготовление".into(),
            dessert_name: "Название".into(),
            dessert_ingredients: "Ингредиенты".into(),
            dessert_steps: "Приготовление".into(),
            product: "Продукт".into(),
            quantity: "Количество".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookLayout {
    pub sheets: SheetNames,
    pub headers: Headers,
}

impl WorkbookLayout {
    /// 必須シート名（メニュー, レシピ, デザート, 買い物リストの順）
    pub fn required_sheets(&self) -> [&str; 4] {
        [
            self.sheets.menu.as_str(),
            self.sheets.recipes.as_str(),
            self.sheets.desserts.as_str(),
            self.sheets.shopping.as_str(),
        ]
    }
}
