//! 対話式チェックリスト
//!
//! メニューまたは買い物リストの項目を一覧表示し、選択状態を完了状態として反映する。

use crate::error::Result;
use crate::store::{Persistence, SessionStore};
use dialoguer::MultiSelect;
use nutrition_common::{CompletionState, WorkbookData};
use std::collections::HashSet;

/// 対象の一覧
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecklistKind {
    #[default]
    Menu,
    Shopping,
}

impl std::str::FromStr for ChecklistKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "menu" | "meals" | "m" => Ok(ChecklistKind::Menu),
            "shopping" | "shop" | "s" => Ok(ChecklistKind::Shopping),
            _ => Err(format!("Unknown list: {}. Use menu or shopping", s)),
        }
    }
}

/// チェック対象のラベル（重複・空を除き、表の順）
pub fn checklist_labels(data: &WorkbookData, kind: ChecklistKind) -> Vec<String> {
    let labels: Box<dyn Iterator<Item = &String>> = match kind {
        ChecklistKind::Menu => Box::new(data.menu.iter().map(|m| &m.dish)),
        ChecklistKind::Shopping => Box::new(data.shopping.iter().map(|s| &s.product)),
    };

    let mut seen = HashSet::new();
    labels
        .filter(|l| !l.trim().is_empty())
        .filter(|l| seen.insert(l.as_str()))
        .cloned()
        .collect()
}

/// 選択結果と現在の状態が異なるラベル
pub fn changed_labels<'a>(
    labels: &'a [String],
    completion: &CompletionState,
    selected: &[usize],
) -> Vec<&'a str> {
    let selected: HashSet<usize> = selected.iter().copied().collect();
    labels
        .iter()
        .enumerate()
        .filter(|(i, label)| completion.is_done(label) != selected.contains(i))
        .map(|(_, label)| label.as_str())
        .collect()
}

/// 対話式で完了状態を編集し、変更したラベル数を返す
pub fn run_interactive_checklist(store: &SessionStore, kind: ChecklistKind) -> Result<usize> {
    let data = store.require_snapshot()?;
    let labels = checklist_labels(&data, kind);
    if labels.is_empty() {
        println!("項目がありません");
        return Ok(0);
    }

    let completion = store.completion();
    let defaults: Vec<bool> = labels.iter().map(|l| completion.is_done(l)).collect();

    let prompt = match kind {
        ChecklistKind::Menu => "完了した食事を選択 (Space: 切替, Enter: 確定)",
        ChecklistKind::Shopping => "購入済みの品を選択 (Space: 切替, Enter: 確定)",
    };
    let selected = MultiSelect::new()
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let Some(selected) = selected else {
        println!("キャンセルしました");
        return Ok(0);
    };

    let changed = changed_labels(&labels, &completion, &selected);
    for label in &changed {
        let (_, persistence) = store.toggle_completed(label);
        if let Persistence::Failed(reason) = persistence {
            println!("⚠ 完了状態を保存できませんでした: {}", reason);
        }
    }

    Ok(changed.len())
}
