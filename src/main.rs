use breakfast_ai::{batch, cli, config, error, interactive, report};
use breakfast_ai_common::{validate_query, Classifier, Label};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use report::{AnnouncementSink, AnnouncementTarget, ResultSink};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;

    // 設定コマンドはカタログが壊れていても実行できるようにする
    if let Commands::Config {
        set_similarity_threshold,
        set_confidence_floor,
        set_catalog,
        reset_catalog,
        show,
    } = cli.command
    {
        let mut changed = false;

        if let Some(value) = set_similarity_threshold {
            config.set_similarity_threshold(value)?;
            println!("✔ 類似度の閾値を {} に設定しました", value);
            changed = true;
        }

        if let Some(value) = set_confidence_floor {
            config.set_confidence_floor(value)?;
            println!("✔ 信頼度の下限を {} に設定しました", value);
            changed = true;
        }

        if let Some(path) = set_catalog {
            config.set_catalog(path)?;
            println!("✔ カタログを設定しました");
            changed = true;
        }

        if reset_catalog {
            config.catalog_path = None;
            println!("✔ 組み込みカタログに戻しました");
            changed = true;
        }

        if changed {
            config.save()?;
        }

        if show || !changed {
            println!("設定:");
            println!("  設定ファイル: {}", Config::config_path()?.display());
            println!("  類似度の閾値: {}", config.classifier.similarity_threshold);
            println!("  信頼度の下限: {}", config.classifier.confidence_floor);
            println!("  完全一致の信頼度: {}", config.classifier.exact_confidence);
            println!("  候補数: {}", config.classifier.max_suggestions);
            match config.resolve_catalog_path(cli.catalog.as_deref()) {
                Some(path) => println!("  カタログ: {}", path.display()),
                None => println!("  カタログ: 組み込み"),
            }
        }

        return Ok(());
    }

    // カタログの整合性エラーはここで起動中止
    let catalog = config.load_catalog(cli.catalog.as_deref())?;
    let classifier = Classifier::with_config(&catalog, config.classifier);
    let json_output = matches!(cli.command, Commands::Classify { json: true, .. });
    let mut speaker = cli
        .speak
        .then(|| AnnouncementSink::new(AnnouncementTarget::for_output(json_output).writer()));

    match cli.command {
        Commands::Classify { food, json } => {
            let query = validate_query(&food.join(" "))?;
            let result = classifier.classify(&query);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render_text(&result));
            }

            if let Some(sink) = speaker.as_mut() {
                sink.notify(&result)?;
            }
        }

        Commands::Batch { input, output, format } => {
            println!("🥞 breakfast-ai - バッチ分類\n");

            let (batch_report, output_path) =
                batch::run_batch(&catalog, &classifier, &input, output.as_deref(), format)?;

            println!(
                "✔ {}件を分類 (sweet: {}, savory: {}, unknown: {})",
                batch_report.summary.total,
                batch_report.summary.sweet,
                batch_report.summary.savory,
                batch_report.summary.unknown
            );
            println!("✔ 結果を保存: {}", output_path.display());
        }

        Commands::Catalog { label, json } => {
            let entries: Vec<_> = match label {
                Some(label) => catalog.entries_by_label(label).collect(),
                None => catalog.all_entries().iter().collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for group_label in [Label::Sweet, Label::Savory] {
                    let group: Vec<_> = entries.iter().filter(|e| e.label == group_label).collect();
                    if group.is_empty() {
                        continue;
                    }
                    println!("{} ({}件)", group_label, group.len());
                    for entry in group {
                        println!(
                            "  - {:<12} {:>4} kcal  タンパク質 {:>2}g  [{}]",
                            entry.name, entry.calories, entry.protein, entry.category
                        );
                    }
                }
            }
        }

        Commands::Interactive => {
            let sink = speaker.as_mut().map(|s| s as &mut dyn ResultSink);
            interactive::run_interactive(&classifier, sink)?;
        }

        // 先に処理済み
        Commands::Config { .. } => {}
    }

    Ok(())
}
