use crate::error::{Result, TipReceiptsError};
use crate::view::SortPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tip_receipts_common::{Field, SortSpec};

/// ページサイズの環境変数による上書き
pub const PAGE_SIZE_ENV: &str = "TIP_RECEIPTS_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// グリッド1ページあたりの件数
    pub page_size: usize,
    /// 起動時の並べ替え
    pub default_sort: SortSpec,
    pub sort_policy: SortPolicy,
    /// グリッドに表示する列
    pub columns: Vec<Field>,
    /// 出力ファイル名・シート名
    pub export_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 12,
            default_sort: SortSpec::default(),
            sort_policy: SortPolicy::FollowFilter,
            columns: vec![
                Field::Date,
                Field::Time,
                Field::CustomerName,
                Field::Amount,
                Field::Tip,
                Field::Total,
                Field::PaymentType,
            ],
            export_title: "receipts".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env_overrides())
    }

    /// 指定パスから読み込む（無ければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| TipReceiptsError::Config(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TipReceiptsError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tip-receipts").join("config.json"))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(size) = std::env::var(PAGE_SIZE_ENV).ok().and_then(|v| v.parse().ok()) {
            self.page_size = size;
        }
        self
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(TipReceiptsError::Config("page size must be at least 1".into()));
        }
        self.page_size = size;
        Ok(())
    }
}
