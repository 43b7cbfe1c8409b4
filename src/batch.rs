//! バッチ分類モジュール
//!
//! 1行1件の食品名ファイルを読み込み、並列に分類してレポートを書き出す。
//! 出力順は入力順と同じ。

use crate::cli::ReportFormat;
use crate::error::{BreakfastAiError, Result};
use breakfast_ai_common::{Catalog, ClassificationResult, Classifier, ClassifierConfig, ResultLabel};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

const DEFAULT_REPORT_NAME: &str = "classification";

/// 1件分の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    /// 入力ファイルの行番号（1始まり）
    pub line: usize,
    pub query: String,
    pub result: ClassificationResult,
}

/// ラベルごとの件数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub sweet: usize,
    pub savory: usize,
    pub unknown: usize,
}

impl BatchSummary {
    fn from_items(items: &[BatchItem]) -> Self {
        let mut summary = Self {
            total: items.len(),
            ..Default::default()
        };
        for item in items {
            match item.result.label {
                ResultLabel::Sweet => summary.sweet += 1,
                ResultLabel::Savory => summary.savory += 1,
                ResultLabel::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}

/// バッチレポート
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// RFC 3339
    pub generated_at: String,
    pub catalog_fingerprint: String,
    pub catalog_size: usize,
    /// 分類に使った閾値
    pub classifier: ClassifierConfig,
    pub summary: BatchSummary,
    pub items: Vec<BatchItem>,
}

/// 入力テキストから (行番号, 食品名) を取り出す
///
/// 空行と `#` で始まる行は無視する。
pub fn parse_queries(content: &str) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some((i + 1, trimmed.to_string()))
            }
        })
        .collect()
}

/// カタログ内容の SHA-256（16進）
pub fn catalog_fingerprint(catalog: &Catalog) -> Result<String> {
    let bytes = serde_json::to_vec(catalog.all_entries())?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// 並列に分類する（結果は入力順）
pub fn classify_all(
    classifier: &Classifier<'_>,
    queries: &[(usize, String)],
    progress: &ProgressBar,
) -> Vec<BatchItem> {
    queries
        .par_iter()
        .map(|(line, query)| {
            let result = classifier.classify(query);
            progress.inc(1);
            BatchItem {
                line: *line,
                query: query.clone(),
                result,
            }
        })
        .collect()
}

pub fn build_report(
    catalog: &Catalog,
    config: &ClassifierConfig,
    items: Vec<BatchItem>,
) -> Result<BatchReport> {
    Ok(BatchReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        catalog_fingerprint: catalog_fingerprint(catalog)?,
        catalog_size: catalog.len(),
        classifier: *config,
        summary: BatchSummary::from_items(&items),
        items,
    })
}

/// 出力パスを決める（ディレクトリまたは拡張子なしなら既定のファイル名を付ける）
pub fn output_path_for_format(input: &Path, output: Option<&Path>, format: ReportFormat) -> PathBuf {
    let file_name = format!("{}.{}", DEFAULT_REPORT_NAME, format.extension());
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(file_name),
    }
}

/// 出力先の親ディレクトリがなければ作る
fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_json(report: &BatchReport, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

pub fn write_excel(report: &BatchReport, output_path: &Path) -> Result<()> {
    let excel_err = |e: rust_xlsxwriter::XlsxError| BreakfastAiError::ExcelGeneration(e.to_string());

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("分類結果").map_err(excel_err)?;

    let headers = [
        "行", "入力", "判定", "信頼度(%)", "一致", "カロリー", "タンパク質(g)", "カテゴリ", "候補",
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (idx, item) in report.items.iter().enumerate() {
        let row = (idx + 1) as u32;
        let result = &item.result;

        worksheet.write_number(row, 0, item.line as f64).map_err(excel_err)?;
        worksheet.write_string(row, 1, &item.query).map_err(excel_err)?;
        worksheet
            .write_string(row, 2, result.label.to_string())
            .map_err(excel_err)?;
        worksheet
            .write_number(row, 3, result.confidence_percent() as f64)
            .map_err(excel_err)?;

        if let Some(entry) = &result.matched_entry {
            worksheet.write_string(row, 4, &entry.name).map_err(excel_err)?;
            worksheet.write_number(row, 5, entry.calories as f64).map_err(excel_err)?;
            worksheet.write_number(row, 6, entry.protein as f64).map_err(excel_err)?;
            worksheet.write_string(row, 7, &entry.category).map_err(excel_err)?;
        }

        if let Some(suggestions) = &result.suggestions {
            worksheet
                .write_string(row, 8, suggestions.join(", "))
                .map_err(excel_err)?;
        }
    }

    worksheet.set_column_width(1, 20).map_err(excel_err)?;
    worksheet.set_column_width(8, 30).map_err(excel_err)?;

    // 集計シート
    let summary = workbook.add_worksheet();
    summary.set_name("集計").map_err(excel_err)?;
    let rows: [(&str, String); 9] = [
        ("生成日時", report.generated_at.clone()),
        ("カタログ", report.catalog_fingerprint.clone()),
        ("カタログ件数", report.catalog_size.to_string()),
        ("類似度の閾値", report.classifier.similarity_threshold.to_string()),
        ("信頼度の下限", report.classifier.confidence_floor.to_string()),
        ("合計", report.summary.total.to_string()),
        ("sweet", report.summary.sweet.to_string()),
        ("savory", report.summary.savory.to_string()),
        ("unknown", report.summary.unknown.to_string()),
    ];
    for (idx, (label, value)) in rows.iter().enumerate() {
        let row = idx as u32;
        summary
            .write_string_with_format(row, 0, *label, &header_format)
            .map_err(excel_err)?;
        summary.write_string(row, 1, value).map_err(excel_err)?;
    }
    summary.set_column_width(1, 70).map_err(excel_err)?;

    ensure_parent_dir(output_path)?;
    workbook.save(output_path).map_err(excel_err)?;
    Ok(())
}

/// バッチ分類を実行してレポートを保存する
pub fn run_batch(
    catalog: &Catalog,
    classifier: &Classifier<'_>,
    input: &Path,
    output: Option<&Path>,
    format: ReportFormat,
) -> Result<(BatchReport, PathBuf)> {
    if !input.exists() {
        return Err(BreakfastAiError::FileNotFound(input.display().to_string()));
    }

    let content = std::fs::read_to_string(input)?;
    let queries = parse_queries(&content);
    if queries.is_empty() {
        return Err(BreakfastAiError::NoQueries(input.display().to_string()));
    }
    tracing::info!(count = queries.len(), input = %input.display(), "batch classify");

    let progress = ProgressBar::new(queries.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        progress.set_style(style);
    }
    let items = classify_all(classifier, &queries, &progress);
    progress.finish_and_clear();

    let report = build_report(catalog, classifier.config(), items)?;
    let output_path = output_path_for_format(input, output, format);

    match format {
        ReportFormat::Json => write_json(&report, &output_path)?,
        ReportFormat::Excel => write_excel(&report, &output_path)?,
    }

    Ok((report, output_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_queries() {
        let content = "pancake\n\n# comment\n  Bacon  \nxqz\n";
        let queries = parse_queries(content);
        assert_eq!(
            queries,
            vec![
                (1, "pancake".to_string()),
                (4, "Bacon".to_string()),
                (5, "xqz".to_string()),
            ]
        );
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let catalog = Catalog::builtin().unwrap();
        let classifier = Classifier::new(&catalog);
        let names: Vec<(usize, String)> = catalog
            .all_entries()
            .iter()
            .rev()
            .enumerate()
            .map(|(i, e)| (i + 1, e.name.clone()))
            .collect();

        let items = classify_all(&classifier, &names, &ProgressBar::hidden());
        assert_eq!(items.len(), names.len());
        for (item, (line, name)) in items.iter().zip(&names) {
            assert_eq!(item.line, *line);
            assert_eq!(&item.query, name);
            assert_eq!(&item.result.matched_entry.as_ref().unwrap().name, name);
        }
    }

    #[test]
    fn test_summary() {
        let catalog = Catalog::builtin().unwrap();
        let classifier = Classifier::new(&catalog);
        let queries = parse_queries("waffle\nmuffn\negg\nzzzzzzzzzz\n");
        let items = classify_all(&classifier, &queries, &ProgressBar::hidden());

        let report = build_report(&catalog, classifier.config(), items).unwrap();
        assert_eq!(
            report.summary,
            BatchSummary { total: 4, sweet: 2, savory: 1, unknown: 1 }
        );
        assert_eq!(report.catalog_size, 22);
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let catalog = Catalog::builtin().unwrap();
        let a = catalog_fingerprint(&catalog).unwrap();
        let b = catalog_fingerprint(&Catalog::builtin().unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let other = Catalog::from_json(r#"{"sweet": [{"name": "crepe", "calories": 90, "protein": 2}]}"#).unwrap();
        assert_ne!(a, catalog_fingerprint(&other).unwrap());
    }

    #[test]
    fn test_output_path_for_format() {
        let input = Path::new("data/foods.txt");
        assert_eq!(
            output_path_for_format(input, None, ReportFormat::Json),
            PathBuf::from("data/classification.json")
        );
        assert_eq!(
            output_path_for_format(input, Some(Path::new("out/report.xlsx")), ReportFormat::Excel),
            PathBuf::from("out/report.xlsx")
        );
        assert_eq!(
            output_path_for_format(input, Some(Path::new("out")), ReportFormat::Excel),
            PathBuf::from("out/classification.xlsx")
        );
    }
}
