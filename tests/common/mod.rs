//! テスト用ワークブック生成

#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

pub const MENU: &str = "Меню на неделю (v4)";
pub const RECIPES: &str = "Быстрые рецепты";
pub const DESSERTS: &str = "ПП-десерты";
pub const SHOPPING: &str = "Список покупок (v4)";

/// メニュー行（料理名のリンク先セルを指定可）
pub struct MenuRow {
    pub cells: Vec<&'static str>,
    pub link: Option<String>,
}

impl MenuRow {
    pub fn plain(cells: &[&'static str]) -> Self {
        Self {
            cells: cells.to_vec(),
            link: None,
        }
    }

    pub fn linked(cells: &[&'static str], location: &str) -> Self {
        Self {
            cells: cells.to_vec(),
            link: Some(location.to_string()),
        }
    }
}

pub struct Fixture {
    pub menu: Vec<MenuRow>,
    pub recipes: Vec<[&'static str; 3]>,
    pub desserts: Vec<[&'static str; 3]>,
    pub shopping: Vec<(&'static str, f64)>,
    pub include_desserts: bool,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            menu: vec![
                MenuRow::linked(&["Mon", "Breakfast", "Meal1", "Oatmeal"], "'Быстрые рецепты'!A3"),
                MenuRow::plain(&["Mon", "Lunch", "Meal2"]),
                MenuRow::plain(&["Tue", "Dinner", "Meal3", "Grilled Chicken Salad"]),
                MenuRow::plain(&["Wed", "Breakfast", "Meal1", "Omelette"]),
            ],
            recipes: vec![
                ["Oatmeal Cookies", "oats, sugar", "bake 20 min"],
                ["Oatmeal Bowl", "oats 50 g, milk 200 ml", "boil 5 min"],
                ["Chicken Salad", "chicken, lettuce", "mix"],
                ["Cheese Omelette", "eggs 2, cheese", "fry"],
            ],
            desserts: vec![["Сырники", "творог 200 г", "жарить"]],
            shopping: vec![("Овсянка", 500.0), ("Яйца", 10.0)],
            include_desserts: true,
        }
    }
}

impl Fixture {
    pub fn to_xlsx(&self) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let menu = workbook.add_worksheet().set_name(MENU)?;
        write_row(menu, 0, &["День", "Время приёма пищи", "Приём пищи", "Блюдо / Рецепт"])?;
        for (i, row) in self.menu.iter().enumerate() {
            let r = i as u32 + 1;
            match (&row.link, row.cells.get(3)) {
                (Some(location), Some(dish)) => {
                    write_row(menu, r, &row.cells[..3])?;
                    menu.write_url_with_text(r, 3, format!("internal:{}", location).as_str(), *dish)?;
                }
                _ => write_row(menu, r, &row.cells)?,
            }
        }

        let recipes = workbook.add_worksheet().set_name(RECIPES)?;
        write_row(recipes, 0, &["Блюдо", "Состав (в сыром виде)", "Приготовление"])?;
        for (i, row) in self.recipes.iter().enumerate() {
            write_row(recipes, i as u32 + 1, row)?;
        }

        if self.include_desserts {
            let desserts = workbook.add_worksheet().set_name(DESSERTS)?;
            write_row(desserts, 0, &["Название", "Ингредиенты", "Приготовление"])?;
            for (i, row) in self.desserts.iter().enumerate() {
                write_row(desserts, i as u32 + 1, row)?;
            }
        }

        let shopping = workbook.add_worksheet().set_name(SHOPPING)?;
        write_row(shopping, 0, &["Продукт", "Количество"])?;
        for (i, (product, quantity)) in self.shopping.iter().enumerate() {
            let r = i as u32 + 1;
            shopping.write_string(r, 0, *product)?;
            shopping.write_number(r, 1, *quantity)?;
        }

        workbook.save_to_buffer()
    }
}

fn write_row(sheet: &mut Worksheet, row: u32, cells: &[&str]) -> Result<(), XlsxError> {
    for (col, value) in cells.iter().enumerate() {
        if !value.is_empty() {
            sheet.write_string(row, col as u16, *value)?;
        }
    }
    Ok(())
}
