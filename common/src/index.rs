//! 料理名→レシピ名の索引
//!
//! メニューシートのハイパーリンクから取り込み時に1度だけ構築する。
//! キーと値はどちらも正規化済み。同じキーへの登録は後勝ち。

use crate::normalize::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishRecipeIndex(HashMap<String, String>);

impl DishRecipeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 料理名とレシピ名を正規化して登録
    ///
    /// どちらかが空なら何もしない。登録した場合は `true`。
    pub fn link(&mut self, dish: &str, recipe: &str) -> bool {
        let dish = normalize_name(dish);
        let recipe = normalize_name(recipe);
        if dish.is_empty() || recipe.is_empty() {
            return false;
        }
        self.0.insert(dish, recipe);
        true
    }

    /// 料理名（未正規化）に対応するレシピ名を取得
    pub fn linked_recipe(&self, dish: &str) -> Option<&str> {
        self.get_normalized(&normalize_name(dish))
    }

    /// 正規化済みの料理名で取得
    pub fn get_normalized(&self, normalized_dish: &str) -> Option<&str> {
        self.0.get(normalized_dish).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
