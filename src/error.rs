use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreakfastAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("分類する食品名がありません: {0}")]
    NoQueries(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] breakfast_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, BreakfastAiError>;
