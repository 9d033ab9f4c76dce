use crate::error::{Result, SkinLogError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// 入力デバウンスの既定値（ミリ秒）
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 製品カタログ（CSV / xlsx）
    pub catalog_path: Option<PathBuf>,
    /// エントリ保存先JSON
    pub store_path: Option<PathBuf>,
    pub owner_id: Option<String>,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            store_path: None,
            owner_id: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読み取り専用コマンド用。読めない設定ファイルは警告して既定値で続行する
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                warn!(error = %e, "config directory unavailable; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_or_default(config_path: &Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            warn!(path = %config_path.display(), error = %e, "failed to read config; using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SkinLogError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("skin-log"))
    }

    /// カタログパス（環境変数を優先）
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SKIN_LOG_CATALOG") {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        self.catalog_path.clone()
    }

    /// エントリ保存先（未設定なら設定ディレクトリ直下）
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("entries.json")),
        }
    }

    /// オーナーID（環境変数を優先）
    pub fn owner_id(&self) -> Result<String> {
        if let Ok(owner) = std::env::var("SKIN_LOG_OWNER") {
            if !owner.trim().is_empty() {
                return Ok(owner);
            }
        }

        self.owner_id
            .clone()
            .filter(|o| !o.trim().is_empty())
            .ok_or(SkinLogError::MissingOwner)
    }

    pub fn set_owner_id(&mut self, owner: String) -> Result<()> {
        if owner.trim().is_empty() {
            return Err(SkinLogError::InvalidArgument("オーナーIDが空です".into()));
        }
        self.owner_id = Some(owner.trim().to_string());
        self.save()
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(SkinLogError::FileNotFound(path.display().to_string()));
        }
        self.catalog_path = Some(path);
        self.save()
    }
}
