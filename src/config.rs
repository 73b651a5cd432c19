use crate::error::{Result, TrackerError};
use crate::layout::WorkbookLayout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "NUTRITION_TRACKER_DATA_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 取り込み結果と完了状態の保存先
    pub data_dir: Option<PathBuf>,
    pub layout: WorkbookLayout,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrackerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("nutrition-tracker").join("config.json"))
    }

    /// 保存先ディレクトリを決定
    ///
    /// 環境変数 > 設定ファイル > OS標準のデータディレクトリ
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|d| d.join("nutrition-tracker"))
            .ok_or_else(|| TrackerError::Config("データディレクトリが見つかりません".into()))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }
}
