//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use breakfast_ai::batch;
use breakfast_ai::cli::ReportFormat;
use breakfast_ai::config::Config;
use breakfast_ai::error::BreakfastAiError;
use breakfast_ai_common::{Catalog, Classifier};
use std::path::Path;
use tempfile::tempdir;

/// 存在しない入力ファイル
#[test]
fn test_batch_nonexistent_input() {
    let catalog = Catalog::builtin().unwrap();
    let classifier = Classifier::new(&catalog);

    let result = batch::run_batch(
        &catalog,
        &classifier,
        Path::new("/nonexistent/path/foods-12345.txt"),
        None,
        ReportFormat::Json,
    );

    assert!(matches!(result, Err(BreakfastAiError::FileNotFound(_))));
}

/// 空行とコメントしかない入力ファイル
#[test]
fn test_batch_no_queries() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("foods.txt");
    std::fs::write(&input, "\n   \n# nothing here\n").unwrap();

    let catalog = Catalog::builtin().unwrap();
    let classifier = Classifier::new(&catalog);
    let result = batch::run_batch(&catalog, &classifier, &input, None, ReportFormat::Json);

    assert!(matches!(result, Err(BreakfastAiError::NoQueries(_))));
}

/// 重複のある外部カタログは読み込み時点でエラー
#[test]
fn test_duplicate_catalog_refuses_to_start() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "sweet": [{ "name": "plantain", "calories": 122, "protein": 1 }],
            "savory": [{ "name": "plantain", "calories": 122, "protein": 1 }]
        }"#,
    )
    .unwrap();

    let err = Config::default().load_catalog(Some(path.as_path())).unwrap_err();
    assert!(matches!(
        err,
        BreakfastAiError::Common(breakfast_ai_common::Error::DuplicateFood { .. })
    ));
    assert!(format!("{}", err).contains("plantain"));
}

/// BreakfastAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        BreakfastAiError::Config("テスト設定エラー".to_string()),
        BreakfastAiError::FileNotFound("catalog.json".to_string()),
        BreakfastAiError::NoQueries("foods.txt".to_string()),
        BreakfastAiError::ExcelGeneration("Excel生成エラー".to_string()),
        BreakfastAiError::CliExecution("入力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: BreakfastAiError = io_err.into();

    assert!(matches!(err, BreakfastAiError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: BreakfastAiError = json_err.into();

    assert!(matches!(err, BreakfastAiError::JsonParse(_)));
}

/// 空入力は呼び出し側の検証エラー（透過的に表示される）
#[test]
fn test_empty_query_error_transparent() {
    let common_err = breakfast_ai_common::validate_query("   ").unwrap_err();
    let err: BreakfastAiError = common_err.into();

    assert!(matches!(
        err,
        BreakfastAiError::Common(breakfast_ai_common::Error::EmptyQuery)
    ));
    assert_eq!(format!("{}", err), "Please enter a food name");
}
