//! 対話式分類モジュール
//!
//! 食品名を繰り返し入力して分類する。完全一致しなかった場合は候補から選び直せる。

use crate::error::{BreakfastAiError, Result};
use crate::report::{self, ResultSink};
use breakfast_ai_common::{validate_query, ClassificationResult, Classifier, MatchKind};
use dialoguer::{Input, Select};

/// 入力に対する操作
#[derive(Debug, PartialEq, Eq)]
pub enum InteractiveAction {
    /// 正規化済みの食品名を分類
    Classify(String),
    /// 空入力
    Empty,
    /// 終了
    Quit,
}

pub fn parse_input(input: &str) -> InteractiveAction {
    match input.trim() {
        "q" | "Q" | ":q" => InteractiveAction::Quit,
        other => match validate_query(other) {
            Ok(query) => InteractiveAction::Classify(query),
            Err(_) => InteractiveAction::Empty,
        },
    }
}

/// 候補から選び直すかどうか
fn offer_suggestions(result: &ClassificationResult) -> Option<&[String]> {
    if result.match_kind == MatchKind::Exact {
        return None;
    }
    result
        .suggestions
        .as_deref()
        .filter(|suggestions| !suggestions.is_empty())
}

fn prompt_suggestion(suggestions: &[String]) -> Result<Option<String>> {
    let mut items: Vec<&str> = suggestions.iter().map(|s| s.as_str()).collect();
    items.push("(そのまま)");

    let selection = Select::new()
        .with_prompt("もしかして")
        .items(&items)
        .default(items.len() - 1)
        .interact()
        .map_err(|e| BreakfastAiError::CliExecution(e.to_string()))?;

    Ok(suggestions.get(selection).cloned())
}

/// 対話式で分類
pub fn run_interactive(
    classifier: &Classifier<'_>,
    mut sink: Option<&mut dyn ResultSink>,
) -> Result<()> {
    println!("🥞 食品名を入力してください（q で終了）\n");

    loop {
        let input: String = Input::new()
            .with_prompt("食品名")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| BreakfastAiError::CliExecution(e.to_string()))?;

        let query = match parse_input(&input) {
            InteractiveAction::Quit => break,
            InteractiveAction::Empty => {
                println!("⚠ Please enter a food name\n");
                continue;
            }
            InteractiveAction::Classify(query) => query,
        };

        let mut result = classifier.classify(&query);
        println!("{}\n", report::render_text(&result));

        if let Some(suggestions) = offer_suggestions(&result) {
            if let Some(choice) = prompt_suggestion(suggestions)? {
                result = classifier.classify(&choice);
                println!("{}\n", report::render_text(&result));
            }
        }

        if let Some(sink) = sink.as_deref_mut() {
            sink.notify(&result)?;
        }
    }

    Ok(())
}
