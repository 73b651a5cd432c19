use crate::checklist::ChecklistKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nutrition-tracker")]
#[command(about = "週間メニュー・レシピ・買い物リストのワークブックビューア", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データディレクトリ（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ワークブック(.xlsx)を取り込む（以前のデータは置き換え）
    Load {
        /// ワークブックのパス
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 週間メニューを表示
    Menu,

    /// レシピ一覧を表示
    Recipes,

    /// デザート一覧を表示
    Desserts,

    /// 買い物リストを表示
    Shopping,

    /// 料理名からレシピを表示
    Recipe {
        /// 料理名（メニューの表記）
        #[arg(required = true)]
        dish: String,
    },

    /// 料理・品名の完了状態を切り替え
    Toggle {
        /// 料理名または品名
        #[arg(required = true)]
        label: String,
    },

    /// 対話式チェックリスト (menu/shopping)
    Checklist {
        #[arg(default_value = "menu")]
        list: ChecklistKind,
    },

    /// 保存済みの取り込み結果を削除
    Clear {
        /// 完了状態も削除
        #[arg(long)]
        completed: bool,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
