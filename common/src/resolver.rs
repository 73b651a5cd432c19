//! 料理名→レシピ照合モジュール
//!
//! ## 照合順序
//! 1. 索引にある料理名なら、リンク先レシピ名と完全一致するレシピ
//! 2. 料理名を部分文字列として含むレシピ名（表の先頭から最初の1件）
//! 3. どちらもなければ「見つからない」（エラーではない）

use crate::index::DishRecipeIndex;
use crate::normalize::normalize_name;
use crate::types::{Record, WorkbookData};

/// 照合の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// ハイパーリンク経由の完全一致
    Linked,
    /// レシピ名への部分一致
    Substring,
}

/// 照合結果
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub record: &'a Record,
    pub kind: MatchKind,
}

/// 公開済みの表を読むだけの照合器
pub struct RecipeResolver<'a> {
    recipes: &'a [Record],
    index: &'a DishRecipeIndex,
    name_field: &'a str,
}

impl<'a> RecipeResolver<'a> {
    /// # Arguments
    /// * `data` - 取り込み済みデータ
    /// * `name_field` - レシピ名の見出し（例: `Блюдо`）
    pub fn new(data: &'a WorkbookData, name_field: &'a str) -> Self {
        Self::from_parts(&data.recipes, &data.recipe_map, name_field)
    }

    pub fn from_parts(recipes: &'a [Record], index: &'a DishRecipeIndex, name_field: &'a str) -> Self {
        Self {
            recipes,
            index,
            name_field,
        }
    }

    /// 料理名に対応するレシピを取得
    pub fn resolve(&self, dish: Option<&str>) -> Option<&'a Record> {
        self.resolve_with_kind(dish).map(|r| r.record)
    }

    /// 照合の種類付きでレシピを取得
    pub fn resolve_with_kind(&self, dish: Option<&str>) -> Option<Resolution<'a>> {
        let normalized = normalize_name(dish?);
        // 空文字はすべてのレシピ名に含まれてしまうため照合しない
        if normalized.is_empty() {
            return None;
        }

        if let Some(linked) = self.index.get_normalized(&normalized) {
            if let Some(record) = self.find(|name| name == linked) {
                return Some(Resolution {
                    record,
                    kind: MatchKind::Linked,
                });
            }
        }

        self.find(|name| name.contains(normalized.as_str()))
            .map(|record| Resolution {
                record,
                kind: MatchKind::Substring,
            })
    }

    fn find(&self, pred: impl Fn(&str) -> bool) -> Option<&'a Record> {
        self.recipes.iter().find(|r| {
            r.get(self.name_field)
                .map(|name| pred(normalize_name(name).as_str()))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "Блюдо";

    fn recipe(name: &str, steps: &str) -> Record {
        [(NAME, name), ("Приготовление", steps)].into_iter().collect()
    }

    fn data(names: &[&str]) -> WorkbookData {
        WorkbookData {
            recipes: names
                .iter()
                .enumerate()
                .map(|(i, n)| recipe(n, &format!("step{}", i)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_linked_recipe_preferred() {
        let mut data = data(&["Oatmeal Cookies", "Oatmeal Bowl"]);
        data.recipe_map.link("Oatmeal", "Oatmeal Bowl");

        let resolver = RecipeResolver::new(&data, NAME);
        let found = resolver.resolve_with_kind(Some("Oatmeal")).expect("見つからない");
        assert_eq!(found.record.get(NAME), Some("Oatmeal Bowl"));
        assert_eq!(found.kind, MatchKind::Linked);
    }

    #[test]
    fn test_linked_match_ignores_case_and_spaces() {
        let mut data = data(&["  OATMEAL bowl "]);
        data.recipe_map.link("oatmeal", "Oatmeal Bowl");

        let resolver = RecipeResolver::new(&data, NAME);
        assert!(resolver.resolve(Some(" Oatmeal")).is_some());
    }

    #[test]
    fn test_substring_fallback_first_in_table_order() {
        let data = data(&["Суп грибной", "Салат куриный", "Салат куриный с яйцом"]);
        let resolver = RecipeResolver::new(&data, NAME);

        let found = resolver.resolve_with_kind(Some("САЛАТ КУРИНЫЙ")).unwrap();
        assert_eq!(found.record.get(NAME), Some("Салат куриный"));
        assert_eq!(found.kind, MatchKind::Substring);
    }

    #[test]
    fn test_broken_link_falls_back_to_substring() {
        let mut data = data(&["Омлет с сыром"]);
        data.recipe_map.link("Омлет", "Омлет по-французски");

        let resolver = RecipeResolver::new(&data, NAME);
        let found = resolver.resolve_with_kind(Some("Омлет")).unwrap();
        assert_eq!(found.record.get(NAME), Some("Омлет с сыром"));
        assert_eq!(found.kind, MatchKind::Substring);
    }

    #[test]
    fn test_substring_direction() {
        // 入力がレシピ名に含まれる場合のみ一致（逆方向は不一致）
        let data = data(&["Chicken Salad"]);
        let resolver = RecipeResolver::new(&data, NAME);

        assert!(resolver.resolve(Some("Grilled Chicken Salad")).is_none());
        assert!(resolver.resolve(Some("chicken")).is_some());
    }

    #[test]
    fn test_not_found() {
        let data = data(&["Суп"]);
        let resolver = RecipeResolver::new(&data, NAME);
        assert!(resolver.resolve(Some("Плов")).is_none());
    }

    #[test]
    fn test_absent_or_blank_dish() {
        let data = data(&["Суп"]);
        let resolver = RecipeResolver::new(&data, NAME);
        assert!(resolver.resolve(None).is_none());
        assert!(resolver.resolve(Some("")).is_none());
        assert!(resolver.resolve(Some("   ")).is_none());
    }

    #[test]
    fn test_records_without_name_field_are_skipped() {
        let mut data = data(&["Каша"]);
        data.recipes.insert(0, [("Приготовление", "каша")].into_iter().collect());

        let resolver = RecipeResolver::new(&data, NAME);
        let found = resolver.resolve(Some("каша")).unwrap();
        assert_eq!(found.get(NAME), Some("Каша"));
    }
}
