//! セッションストア
//!
//! 取り込み結果（4つの表と索引）と完了状態を保持し、永続ストレージへ反映する。
//! 取り込み結果は `Arc<WorkbookData>` ごと差し替えるため、読み手は常に1回分の取り込み結果だけを見る。

mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

use crate::error::{Result, TrackerError};
use nutrition_common::{CompletionState, WorkbookData};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// 取り込み結果のキー
pub const SNAPSHOT_KEY: &str = "excelNutritionData";
/// 完了状態のキー
pub const COMPLETION_KEY: &str = "completedMeals";

/// 永続化の結果
///
/// 失敗してもメモリ上の状態は更新済み。呼び出し側は警告として扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Persistence {
    Saved,
    Failed(String),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }

    fn from_result(what: &str, result: Result<()>) -> Self {
        match result {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                log::warn!("{}の保存に失敗: {}", what, e);
                Persistence::Failed(e.to_string())
            }
        }
    }
}

/// 起動時の読み込み結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    pub snapshot_loaded: bool,
    pub completion_entries: usize,
}

pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    data: RwLock<Option<Arc<WorkbookData>>>,
    completion: Mutex<CompletionState>,
    ingesting: AtomicBool,
}

/// 取り込み中フラグのガード（drop時に解除）
pub struct IngestGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for IngestGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SessionStore {
    /// 空の状態で作成（ストレージは読まない）
    pub fn init(storage: impl KeyValueStore + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            data: RwLock::new(None),
            completion: Mutex::new(CompletionState::new()),
            ingesting: AtomicBool::new(false),
        }
    }

    /// 作成して保存済みの状態を読み込む
    pub fn open(storage: impl KeyValueStore + 'static) -> Self {
        let store = Self::init(storage);
        let summary = store.reload();
        log::debug!(
            "セッション復元: 取り込み結果={}, 完了状態={}件",
            summary.snapshot_loaded,
            summary.completion_entries
        );
        store
    }

    /// 永続ストレージから取り込み結果と完了状態を読み直す
    ///
    /// 壊れたデータは警告を出して無視する（メモリ上の値は空になる）。
    pub fn reload(&self) -> ReloadSummary {
        let snapshot = self
            .read_key(SNAPSHOT_KEY)
            .and_then(|json| match WorkbookData::from_json(&json) {
                Ok(data) => Some(data),
                Err(e) => {
                    log::warn!("保存済みの取り込み結果が壊れているため無視します: {}", e);
                    None
                }
            });
        let completion = self
            .read_key(COMPLETION_KEY)
            .and_then(|json| match CompletionState::from_json(&json) {
                Ok(state) => Some(state),
                Err(e) => {
                    log::warn!("保存済みの完了状態が壊れているため無視します: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let summary = ReloadSummary {
            snapshot_loaded: snapshot.is_some(),
            completion_entries: completion.len(),
        };

        *self.data_mut() = snapshot.map(Arc::new);
        *self.completion_mut() = completion;
        summary
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{} の読み込みに失敗: {}", key, e);
                None
            }
        }
    }

    /// 公開中の取り込み結果
    pub fn snapshot(&self) -> Option<Arc<WorkbookData>> {
        self.data
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// 公開中の取り込み結果（なければ `NoData`）
    pub fn require_snapshot(&self) -> Result<Arc<WorkbookData>> {
        self.snapshot().ok_or(TrackerError::NoData)
    }

    /// 取り込み結果を丸ごと差し替えて保存
    ///
    /// 以前の結果とはマージしない。
    pub fn replace(&self, data: WorkbookData) -> Persistence {
        let json = data.to_json();
        *self.data_mut() = Some(Arc::new(data));

        let result = json
            .map_err(TrackerError::from)
            .and_then(|json| self.storage.set(SNAPSHOT_KEY, &json));
        Persistence::from_result("取り込み結果", result)
    }

    /// メモリ上の状態を破棄（永続データは残す）
    pub fn teardown(&self) {
        *self.data_mut() = None;
        *self.completion_mut() = CompletionState::new();
    }

    /// 永続データを削除
    ///
    /// `include_completion` が `false` なら完了状態は残す。
    pub fn clear_storage(&self, include_completion: bool) -> Result<bool> {
        let mut removed = self.storage.remove(SNAPSHOT_KEY)?;
        *self.data_mut() = None;
        if include_completion {
            removed |= self.storage.remove(COMPLETION_KEY)?;
            *self.completion_mut() = CompletionState::new();
        }
        Ok(removed)
    }

    pub fn is_completed(&self, label: &str) -> bool {
        self.completion_mut().is_done(label)
    }

    pub fn completion(&self) -> CompletionState {
        self.completion_mut().clone()
    }

    /// 完了状態を反転して保存し、反転後の値を返す
    pub fn toggle_completed(&self, label: &str) -> (bool, Persistence) {
        let (done, json) = {
            let mut state = self.completion_mut();
            let done = state.toggle(label);
            (done, state.to_json())
        };

        let result = json
            .map_err(TrackerError::from)
            .and_then(|json| self.storage.set(COMPLETION_KEY, &json));
        (done, Persistence::from_result("完了状態", result))
    }

    /// 取り込み開始（実行中なら `IngestInProgress`）
    pub fn begin_ingest(&self) -> Result<IngestGuard<'_>> {
        self.ingesting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TrackerError::IngestInProgress)?;
        Ok(IngestGuard {
            flag: &self.ingesting,
        })
    }

    pub fn is_ingesting(&self) -> bool {
        self.ingesting.load(Ordering::Acquire)
    }

    fn data_mut(&self) -> std::sync::RwLockWriteGuard<'_, Option<Arc<WorkbookData>>> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }

    fn completion_mut(&self) -> MutexGuard<'_, CompletionState> {
        self.completion.lock().unwrap_or_else(|e| e.into_inner())
    }
}
