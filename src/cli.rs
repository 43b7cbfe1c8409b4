use breakfast_ai_common::Label;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "breakfast-ai")]
#[command(about = "朝食の食品名を sweet / savory に分類するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// カタログJSONを指定（設定ファイルより優先）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// 分類結果の読み上げ文を出力
    #[arg(long, global = true)]
    pub speak: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 食品名を分類
    Classify {
        /// 食品名（複数語はスペースで連結）
        #[arg(required = true)]
        food: Vec<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// ファイル内の食品名（1行1件）をまとめて分類
    Batch {
        /// 入力ファイル（空行と # で始まる行は無視）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（デフォルト: 入力と同じ場所の classification.json / .xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel)
        #[arg(short, long, default_value = "json")]
        format: ReportFormat,
    },

    /// カタログを表示
    Catalog {
        /// ラベルで絞り込み (sweet/savory)
        #[arg(short, long)]
        label: Option<Label>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話的に分類
    Interactive,

    /// 設定を表示/編集
    Config {
        /// 類似度の閾値を設定（0.0-1.0、デフォルト0.6）
        #[arg(long)]
        set_similarity_threshold: Option<f64>,

        /// fuzzy 一致時の信頼度下限を設定（0.0-1.0、デフォルト0.6）
        #[arg(long)]
        set_confidence_floor: Option<f64>,

        /// 外部カタログJSONを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 組み込みカタログに戻す
        #[arg(long)]
        reset_catalog: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// バッチ出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Excel,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use json or excel", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Excel => write!(f, "excel"),
        }
    }
}
