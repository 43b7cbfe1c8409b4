//! 分類結果の型定義
//!
//! CLIとライブラリ利用側で共有される型:
//! - FoodEntry: カタログの1件
//! - ClassificationResult: `classify` の出力

use serde::{Deserialize, Serialize};

/// 甘い/しょっぱいのラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Sweet,
    Savory,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Sweet => "sweet",
            Label::Savory => "savory",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sweet" => Ok(Label::Sweet),
            "savory" | "savoury" => Ok(Label::Savory),
            _ => Err(format!("Unknown label: {}. Use sweet or savory", s)),
        }
    }
}

/// 分類結果のラベル（一致なしの場合は Unknown）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultLabel {
    Sweet,
    Savory,
    Unknown,
}

impl From<Label> for ResultLabel {
    fn from(label: Label) -> Self {
        match label {
            Label::Sweet => ResultLabel::Sweet,
            Label::Savory => ResultLabel::Savory,
        }
    }
}

impl std::fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultLabel::Sweet => write!(f, "sweet"),
            ResultLabel::Savory => write!(f, "savory"),
            ResultLabel::Unknown => write!(f, "unknown"),
        }
    }
}

/// カタログの食品エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// 正規化済み（小文字・前後空白なし）の名前
    pub name: String,
    pub label: Label,
    pub calories: u32,
    /// タンパク質（g）
    pub protein: u32,
    /// 説明用タグ（"fruit", "african" など）。ラベルとは別物
    pub category: String,
}

impl FoodEntry {
    pub fn new(name: &str, label: Label, calories: u32, protein: u32, category: &str) -> Self {
        Self {
            name: name.to_string(),
            label,
            calories,
            protein,
            category: category.to_string(),
        }
    }
}

/// どの段階で一致したか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    None,
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: ResultLabel,

    /// 0.0〜1.0
    pub confidence: f64,

    pub match_kind: MatchKind,

    /// label が Unknown 以外のときのみ Some
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_entry: Option<FoodEntry>,

    /// 完全一致しなかった場合の候補（近い順、最大3件）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ClassificationResult {
    pub fn is_known(&self) -> bool {
        self.label != ResultLabel::Unknown
    }

    /// 表示用の信頼度（%）
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}
