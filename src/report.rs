//! 分類結果の表示・通知
//!
//! - 人間向けテキスト
//! - 読み上げ用の一文（音声出力そのものは外部に任せる）

use crate::error::Result;
use breakfast_ai_common::{ClassificationResult, FoodEntry, ResultLabel};
use std::io::Write;

/// 結果の見出し（絵文字, タイトル, 一言）
fn headline(label: ResultLabel) -> (&'static str, &'static str, &'static str) {
    match label {
        ResultLabel::Sweet => ("🧁", "Sweet!", "A sugary delight!"),
        ResultLabel::Savory => ("🥓", "Savory!", "Salty and satisfying!"),
        ResultLabel::Unknown => ("🤔", "Unknown Food", "I'm not sure about this one..."),
    }
}

fn nutrition_line(entry: &FoodEntry) -> String {
    format!(
        "  栄養情報: {} ({}) / {} kcal / タンパク質 {}g",
        entry.name, entry.category, entry.calories, entry.protein
    )
}

/// 分類結果をテキストに整形
pub fn render_text(result: &ClassificationResult) -> String {
    let (emoji, title, tagline) = headline(result.label);
    let mut lines = vec![format!("{} {} {}", emoji, title, tagline)];

    if let Some(entry) = &result.matched_entry {
        lines.push(nutrition_line(entry));
    }

    lines.push(format!("  信頼度: {}%", result.confidence_percent()));

    if let Some(suggestions) = &result.suggestions {
        if !suggestions.is_empty() {
            lines.push(format!("  もしかして: {}", suggestions.join(", ")));
        }
    }

    lines.join("\n")
}

/// 読み上げ用の一文（Unknown の場合は None）
pub fn announcement(result: &ClassificationResult) -> Option<String> {
    if !result.is_known() {
        return None;
    }

    let entry = result.matched_entry.as_ref()?;
    Some(format!(
        "This is {}! {} has {} calories.",
        result.label, entry.name, entry.calories
    ))
}

/// 読み上げ文の出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementTarget {
    Stdout,
    Stderr,
}

impl AnnouncementTarget {
    /// JSON を標準出力に書く場合は標準エラーに逃がす
    pub fn for_output(json_output: bool) -> Self {
        if json_output {
            Self::Stderr
        } else {
            Self::Stdout
        }
    }

    pub fn writer(self) -> Box<dyn Write> {
        match self {
            Self::Stdout => Box::new(std::io::stdout()),
            Self::Stderr => Box::new(std::io::stderr()),
        }
    }
}

/// 分類結果の通知先
pub trait ResultSink {
    fn notify(&mut self, result: &ClassificationResult) -> Result<()>;
}

/// 読み上げ文を書き出すだけの通知先
pub struct AnnouncementSink<W: Write> {
    writer: W,
}

impl<W: Write> AnnouncementSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for AnnouncementSink<W> {
    fn notify(&mut self, result: &ClassificationResult) -> Result<()> {
        if let Some(message) = announcement(result) {
            writeln!(self.writer, "🔊 {}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakfast_ai_common::{Catalog, Classifier};

    fn classify(query: &str) -> ClassificationResult {
        let catalog = Catalog::builtin().unwrap();
        Classifier::new(&catalog).classify(query)
    }

    #[test]
    fn test_render_exact() {
        let text = render_text(&classify("pancake"));
        assert!(text.starts_with("🧁 Sweet!"));
        assert!(text.contains("175 kcal"));
        assert!(text.contains("信頼度: 95%"));
        assert!(!text.contains("もしかして"));
    }

    #[test]
    fn test_render_unknown() {
        let text = render_text(&classify("xqzxqzxqz"));
        assert!(text.starts_with("🤔 Unknown Food"));
        assert!(text.contains("信頼度: 0%"));
        assert!(text.contains("もしかして"));
        assert!(!text.contains("栄養情報"));
    }

    #[test]
    fn test_announcement() {
        assert_eq!(
            announcement(&classify("Pancake")),
            Some("This is sweet! pancake has 175 calories.".to_string())
        );
        assert_eq!(
            announcement(&classify("bacn")),
            Some("This is savory! bacon has 43 calories.".to_string())
        );
        assert_eq!(announcement(&classify("xqzxqzxqz")), None);
    }

    #[test]
    fn test_announcement_sink() {
        let mut sink = AnnouncementSink::new(Vec::new());
        sink.notify(&classify("egg")).unwrap();
        sink.notify(&classify("xqzxqzxqz")).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "🔊 This is savory! egg has 78 calories.\n");
    }

    #[test]
    fn test_announcement_target() {
        assert_eq!(AnnouncementTarget::for_output(true), AnnouncementTarget::Stderr);
        assert_eq!(AnnouncementTarget::for_output(false), AnnouncementTarget::Stdout);
    }

    #[test]
    fn test_json_output_stays_parseable() {
        let result = classify("pancake");
        let mut stdout = serde_json::to_vec_pretty(&result).unwrap();
        let mut stderr = Vec::new();

        // JSON と読み上げ文は別の出力に書く
        let target = AnnouncementTarget::for_output(true);
        let mut sink = AnnouncementSink::new(match target {
            AnnouncementTarget::Stdout => &mut stdout,
            AnnouncementTarget::Stderr => &mut stderr,
        });
        sink.notify(&result).unwrap();

        let parsed: ClassificationResult = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(parsed, result);
        assert!(String::from_utf8(stderr).unwrap().starts_with("🔊 This is sweet!"));
    }
}
