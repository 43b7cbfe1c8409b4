//! 分類ロジック
//!
//! ## 処理フロー
//! 1. 入力の正規化（小文字化・前後空白除去）
//! 2. カタログとの完全一致
//! 3. 編集距離による fuzzy 照合（類似度が閾値を超える候補のうち距離最小）
//! 4. どれにも当たらなければ Unknown
//!
//! 完全一致以外の場合は、距離の近い順に候補名を付ける。

use crate::catalog::Catalog;
use crate::distance::{levenshtein_distance, similarity_from_distance};
use crate::error::{Error, Result};
use crate::types::{ClassificationResult, FoodEntry, MatchKind, ResultLabel};
use serde::{Deserialize, Serialize};

/// 分類の閾値設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// fuzzy 照合の候補になる類似度（これを「超える」必要がある）
    pub similarity_threshold: f64,
    /// fuzzy 一致時の信頼度の下限
    pub confidence_floor: f64,
    /// 完全一致時の信頼度（固定値）
    pub exact_confidence: f64,
    pub max_suggestions: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            confidence_floor: 0.6,
            exact_confidence: 0.95,
            max_suggestions: 3,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        let in_unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::Config(format!("{} must be within 0.0-1.0 (got {})", name, value)))
            }
        };

        in_unit("similarity_threshold", self.similarity_threshold)?;
        in_unit("confidence_floor", self.confidence_floor)?;
        in_unit("exact_confidence", self.exact_confidence)?;

        if self.max_suggestions == 0 {
            return Err(Error::Config("max_suggestions must be at least 1".into()));
        }

        Ok(())
    }
}

/// 入力を正規化する（小文字化・前後空白除去）
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 入力を正規化し、空なら検証エラーを返す
///
/// `Classifier::classify` の前に呼び出し側で使う。
pub fn validate_query(raw: &str) -> Result<String> {
    let normalized = normalize_query(raw);
    if normalized.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(normalized)
}

/// fuzzy 照合の候補
struct Candidate<'a> {
    entry: &'a FoodEntry,
    distance: usize,
    similarity: f64,
}

/// 食品分類器
///
/// カタログを借用するだけで状態を持たないので、複数スレッドから同時に使える。
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    catalog: &'a Catalog,
    config: ClassifierConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_config(catalog, ClassifierConfig::default())
    }

    pub fn with_config(catalog: &'a Catalog, config: ClassifierConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// 食品名を分類する
    ///
    /// 一致なしも正常な結果（`ResultLabel::Unknown`）として返す。
    pub fn classify(&self, raw_input: &str) -> ClassificationResult {
        let query = normalize_query(raw_input);

        if let Some(entry) = self.catalog.find_exact(&query) {
            tracing::debug!(query = %query, label = %entry.label, "exact match");
            return ClassificationResult {
                label: entry.label.into(),
                confidence: self.config.exact_confidence,
                match_kind: MatchKind::Exact,
                matched_entry: Some(entry.clone()),
                suggestions: None,
            };
        }

        let suggestions = Some(self.top_suggestions(&query));

        match self.best_fuzzy_match(&query) {
            Some(best) => {
                tracing::debug!(
                    query = %query,
                    matched = %best.entry.name,
                    distance = best.distance,
                    similarity = best.similarity,
                    "fuzzy match"
                );
                ClassificationResult {
                    label: best.entry.label.into(),
                    confidence: best.similarity.max(self.config.confidence_floor),
                    match_kind: MatchKind::Fuzzy,
                    matched_entry: Some(best.entry.clone()),
                    suggestions,
                }
            }
            None => {
                tracing::debug!(query = %query, "no match");
                ClassificationResult {
                    label: ResultLabel::Unknown,
                    confidence: 0.0,
                    match_kind: MatchKind::None,
                    matched_entry: None,
                    suggestions,
                }
            }
        }
    }

    /// 類似度が閾値を超える候補のうち、距離最小のもの
    ///
    /// 同距離ならカタログ順で先のものを採用する。
    fn best_fuzzy_match(&self, query: &str) -> Option<Candidate<'a>> {
        let mut best: Option<Candidate<'a>> = None;

        for entry in self.catalog.all_entries() {
            let distance = levenshtein_distance(query, &entry.name);
            let similarity = similarity_from_distance(distance, query, &entry.name);

            if similarity <= self.config.similarity_threshold {
                continue;
            }

            // 厳密に小さい場合のみ置き換え（同点は先勝ち）
            match &best {
                Some(b) if distance >= b.distance => {}
                _ => {
                    best = Some(Candidate {
                        entry,
                        distance,
                        similarity,
                    })
                }
            }
        }

        best
    }

    /// 距離の近い順に候補名を返す（最大 `max_suggestions` 件）
    ///
    /// 類似度の閾値とは無関係に全エントリを対象にする。
    pub fn top_suggestions(&self, normalized_query: &str) -> Vec<String> {
        let mut ranked: Vec<(usize, &FoodEntry)> = self
            .catalog
            .all_entries()
            .iter()
            .map(|entry| (levenshtein_distance(normalized_query, &entry.name), entry))
            .collect();

        // 安定ソートなので同距離はカタログ順のまま
        ranked.sort_by_key(|(distance, _)| *distance);

        ranked
            .into_iter()
            .take(self.config.max_suggestions)
            .map(|(_, entry)| entry.name.clone())
            .collect()
    }
}
