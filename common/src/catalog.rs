//! 食品カタログモジュール
//!
//! 分類の基準となる食品データを管理する。
//! 組み込みデータは `data/catalog.json` からコンパイル時に読み込む。
//! 外部JSONファイルも同じ形式（`{"sweet": [...], "savory": [...]}`）で読み込める。

use crate::error::{Error, Result};
use crate::types::{FoodEntry, Label};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// データファイルの1件（ラベルは所属するリストで決まる）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    #[serde(default)]
    pub category: String,
}

/// データファイル全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub sweet: Vec<CatalogItem>,
    #[serde(default)]
    pub savory: Vec<CatalogItem>,
}

impl CatalogData {
    /// sweet → savory の順でラベル付きエントリに変換
    fn into_entries(self) -> Vec<FoodEntry> {
        let tag = |items: Vec<CatalogItem>, label: Label| {
            items.into_iter().map(move |item| FoodEntry {
                name: item.name.trim().to_lowercase(),
                label,
                calories: item.calories,
                protein: item.protein,
                category: item.category,
            })
        };

        tag(self.sweet, Label::Sweet)
            .chain(tag(self.savory, Label::Savory))
            .collect()
    }
}

/// 食品カタログ
///
/// 構築後は変更しない。エントリの並び順は fuzzy 照合の同点判定に使われる。
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<FoodEntry>,
    /// 名前 → entries のインデックス
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// ラベル付きエントリから構築
    ///
    /// 名前が空のエントリ、重複した名前（ラベルが違っても）はエラー。
    pub fn new(entries: Vec<FoodEntry>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(Error::InvalidFood {
                    name: entry.name.clone(),
                    reason: "name is empty".to_string(),
                });
            }
            if entry.name != entry.name.trim().to_lowercase() {
                return Err(Error::InvalidFood {
                    name: entry.name.clone(),
                    reason: "name must be lowercase without surrounding whitespace".to_string(),
                });
            }
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(Error::DuplicateFood {
                    name: entry.name.clone(),
                });
            }
        }

        tracing::debug!(entries = entries.len(), "catalog built");

        Ok(Self { entries, by_name })
    }

    /// 組み込みカタログ
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_data(data: CatalogData) -> Result<Self> {
        Self::new(data.into_entries())
    }

    /// 全エントリ（sweet → savory の順）
    pub fn all_entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    /// 正規化済みの名前で完全一致検索
    pub fn find_exact(&self, normalized_name: &str) -> Option<&FoodEntry> {
        self.by_name
            .get(normalized_name)
            .map(|&idx| &self.entries[idx])
    }

    /// 指定ラベルのエントリ（カタログ順）
    pub fn entries_by_label(&self, label: Label) -> impl Iterator<Item = &FoodEntry> {
        self.entries.iter().filter(move |e| e.label == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
