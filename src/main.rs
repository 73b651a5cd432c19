use anyhow::Context;
use clap::Parser;
use nutrition_common::{MatchKind, RecipeResolver};
use nutrition_tracker::{checklist, cli, config, ingest, store, view};
use cli::{Cli, Commands};
use config::Config;
use store::{FileStore, Persistence, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir()?,
    };
    log::debug!("データディレクトリ: {}", data_dir.display());

    let store = SessionStore::open(FileStore::new(&data_dir));
    let layout = &config.layout;

    match cli.command {
        Commands::Load { file } => {
            println!("🥗 nutrition-tracker - 取り込み\n");

            let report = ingest::ingest_file(&store, &file, layout)
                .await
                .with_context(|| format!("取り込みに失敗: {}", file.display()))?;

            println!("✔ メニュー: {}件", report.menu_entries);
            println!("✔ レシピ: {}件", report.recipes);
            println!("✔ デザート: {}件", report.desserts);
            println!("✔ 買い物リスト: {}件", report.shopping_items);
            println!("✔ レシピへのリンク: {}件", report.linked_dishes);

            match report.persistence {
                Persistence::Saved => println!("\n✅ 取り込み完了: {}", data_dir.display()),
                Persistence::Failed(reason) => {
                    println!("\n⚠ 取り込み完了（保存に失敗したため次回は再取り込みが必要）: {}", reason)
                }
            }
        }

        Commands::Menu => {
            let data = store.require_snapshot()?;
            print!("{}", view::render_menu(&data, &store.completion()));
        }

        Commands::Recipes => {
            let data = store.require_snapshot()?;
            print!("{}", view::render_recipes(&data, &layout.headers));
        }

        Commands::Desserts => {
            let data = store.require_snapshot()?;
            print!("{}", view::render_desserts(&data, &layout.headers));
        }

        Commands::Shopping => {
            let data = store.require_snapshot()?;
            print!("{}", view::render_shopping(&data, &store.completion()));
        }

        Commands::Recipe { dish } => {
            let data = store.require_snapshot()?;
            let resolver = RecipeResolver::new(&data, &layout.headers.recipe_name);
            let resolution = resolver.resolve_with_kind(Some(&dish));

            match resolution.map(|r| r.kind) {
                Some(MatchKind::Linked) => log::debug!("リンク先のレシピを表示: {}", dish),
                Some(MatchKind::Substring) => log::debug!("部分一致のレシピを表示: {}", dish),
                None => log::info!("レシピが見つかりません: {}", dish),
            }

            print!(
                "{}",
                view::render_recipe_detail(&dish, resolution.map(|r| r.record), &layout.headers)
            );
        }

        Commands::Toggle { label } => {
            let (done, persistence) = store.toggle_completed(&label);
            println!("{} {}", if done { "[x]" } else { "[ ]" }, label);
            if let Persistence::Failed(reason) = persistence {
                println!("⚠ 完了状態を保存できませんでした: {}", reason);
            }
        }

        Commands::Checklist { list } => {
            let changed = checklist::run_interactive_checklist(&store, list)?;
            println!("✔ {}件を更新", changed);
        }

        Commands::Clear { completed } => {
            if store.clear_storage(completed)? {
                println!("✔ 保存済みデータを削除しました: {}", data_dir.display());
            } else {
                println!("保存済みデータはありません");
            }
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データディレクトリを設定しました");
            }

            if show {
                println!("設定:");
                println!("  データディレクトリ: {}", config.data_dir()?.display());
                println!("  メニューシート: {}", config.layout.sheets.menu);
                println!("  レシピシート: {}", config.layout.sheets.recipes);
                println!("  デザートシート: {}", config.layout.sheets.desserts);
                println!("  買い物リストシート: {}", config.layout.sheets.shopping);
            }
        }
    }

    Ok(())
}
