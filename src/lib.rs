//! 週間メニュー・レシピ・買い物リストのワークブックビューア
//!
//! ワークブックを取り込み、料理名→レシピの索引と4つの表をセッションストアに保持する。
//! 表・照合の型は `nutrition_common` を参照。

pub mod checklist;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod store;
pub mod view;
pub mod workbook;
