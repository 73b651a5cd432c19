//! 完了状態（チェックリスト）
//!
//! 料理名と買い物リストの品名を区別せず、生のラベルをキーにする。
//! 同じ文字列の料理と品名は1つのフラグを共有する。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionState(HashMap<String, bool>);

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 完了済みか（未登録は未完了）
    pub fn is_done(&self, label: &str) -> bool {
        self.0.get(label).copied().unwrap_or(false)
    }

    /// 完了状態を反転し、反転後の値を返す
    pub fn toggle(&mut self, label: &str) -> bool {
        let done = !self.is_done(label);
        self.0.insert(label.to_string(), done);
        done
    }

    pub fn set(&mut self, label: &str, done: bool) {
        self.0.insert(label.to_string(), done);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
