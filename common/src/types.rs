//! ワークブック取り込み結果の型定義
//!
//! - MenuEntry: 週間メニューの1行
//! - Record: 見出し→セル値の1行（レシピ・デザート）
//! - ShoppingItem: 買い物リストの1行
//! - WorkbookData: 1回の取り込みで生成される5つの成果物

use crate::error::{Error, Result};
use crate::index::DishRecipeIndex;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 週間メニューの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuEntry {
    pub day: String,          // 曜日
    pub meal_time: String,    // 食事の時間
    pub meal_slot: String,    // 食事枠
    pub dish: String,         // 料理名
}

/// 見出し→セル値の1行
///
/// 空セルは含まない。キーはシートの列順。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 見出しに対応する値を取得
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(|s| s.as_str())
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.insert(header.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// 買い物リストの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingItem {
    pub product: String,
    pub quantity: String,
}

/// 1回の取り込みで生成される成果物一式
///
/// 4つの表と索引は常にまとめて置き換える。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbookData {
    #[serde(rename = "menuData")]
    pub menu: Vec<MenuEntry>,

    #[serde(rename = "recipesData")]
    pub recipes: Vec<Record>,

    #[serde(rename = "dessertsData")]
    pub desserts: Vec<Record>,

    #[serde(rename = "shoppingList")]
    pub shopping: Vec<ShoppingItem>,

    #[serde(rename = "recipeMap")]
    pub recipe_map: DishRecipeIndex,
}

impl WorkbookData {
    /// 保存済みJSONから復元
    ///
    /// 5つのキーのいずれかが欠けていれば不完全なスナップショットとして拒否する。
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        for key in ["menuData", "recipesData", "dessertsData", "shoppingList", "recipeMap"] {
            if value.get(key).is_none() {
                return Err(Error::InvalidData(format!("{} がありません", key)));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.menu.is_empty()
            && self.recipes.is_empty()
            && self.desserts.is_empty()
            && self.shopping.is_empty()
            && self.recipe_map.is_empty()
    }
}
