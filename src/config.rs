use crate::error::{BreakfastAiError, Result};
use breakfast_ai_common::{Catalog, ClassifierConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 外部カタログのパスを指定する環境変数
pub const CATALOG_ENV: &str = "BREAKFAST_AI_CATALOG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 外部カタログJSON（未設定なら組み込みカタログ）
    pub catalog_path: Option<PathBuf>,
    pub classifier: ClassifierConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.classifier.validate()?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
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
        let home = dirs::home_dir()
            .ok_or_else(|| BreakfastAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("breakfast-ai").join("config.json"))
    }

    /// 使用するカタログのパス
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル。どれもなければ None（組み込み）。
    pub fn resolve_catalog_path(&self, override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path.to_path_buf());
        }

        // 環境変数を優先
        if let Ok(path) = std::env::var(CATALOG_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        self.catalog_path.clone()
    }

    /// カタログを読み込む（整合性エラーなら起動を中止する）
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<Catalog> {
        match self.resolve_catalog_path(override_path) {
            Some(path) => {
                if !path.exists() {
                    return Err(BreakfastAiError::FileNotFound(path.display().to_string()));
                }
                tracing::info!(path = %path.display(), "loading external catalog");
                Ok(Catalog::from_file(&path)?)
            }
            None => Ok(Catalog::builtin()?),
        }
    }

    pub fn set_similarity_threshold(&mut self, value: f64) -> Result<()> {
        self.classifier.similarity_threshold = value;
        self.classifier.validate()?;
        Ok(())
    }

    pub fn set_confidence_floor(&mut self, value: f64) -> Result<()> {
        self.classifier.confidence_floor = value;
        self.classifier.validate()?;
        Ok(())
    }

    /// カタログを検証してから絶対パスで設定する
    pub fn set_catalog(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(BreakfastAiError::FileNotFound(path.display().to_string()));
        }
        let path = std::fs::canonicalize(&path)?;
        Catalog::from_file(&path)?;
        self.catalog_path = Some(path);
        Ok(())
    }
}
