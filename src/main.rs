use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use phrasecards::commands::generate::{self, GenerationReport};
use phrasecards::llm::{
    ClientConfig, CompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL, GenerationSettings,
    resolve_api_key,
};
use phrasecards::palette::Palette;
use phrasecards::utils::pluralize;
use phrasecards::{CardGenError, CefrLevel};

#[derive(Parser, Debug)]
#[command(
    name = "phrasecards",
    version,
    about = "Generate Anki cards for language learning using the DeepSeek API.",
    long_about = None
)]
struct Cli {
    /// Target language for the cards
    #[arg(long, value_name = "LANGUAGE", value_parser = non_empty)]
    target_language: String,
    /// Your native language
    #[arg(long, value_name = "LANGUAGE", default_value = "English")]
    native_language: String,
    /// Number of cards to generate
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    number: u32,
    /// Topic for the expressions
    #[arg(long, default_value = "general")]
    topic: String,
    /// Output CSV filename
    #[arg(
        long,
        value_name = "PATH",
        default_value = "anki_cards.csv",
        value_hint = ValueHint::FilePath
    )]
    output: PathBuf,
    /// DeepSeek API key (or set DEEPSEEK_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,
    /// CEFR proficiency level
    #[arg(long, value_enum, ignore_case = true, default_value_t = CefrLevel::B1)]
    cefr_level: CefrLevel,
    /// Chat model to request
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL, value_hint = ValueHint::Url)]
    base_url: String,
}

fn non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{} {}", Palette::paint(Palette::DANGER, "Error:"), err);
        let code = err
            .downcast_ref::<CardGenError>()
            .map_or(1, CardGenError::exit_code);
        std::process::exit(code);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let api_key = resolve_api_key(cli.api_key.as_deref())?;
    let settings = GenerationSettings {
        target_language: cli.target_language,
        native_language: cli.native_language,
        topic: cli.topic,
        count: cli.number as usize,
        cefr_level: cli.cefr_level,
    };
    let config = ClientConfig {
        base_url: cli.base_url,
        model: cli.model,
        ..ClientConfig::new(api_key)
    };
    let client = CompletionClient::new(&config);

    println!(
        "Generating {} {} expressions at CEFR level {} about {} with translations in {}...",
        Palette::paint(Palette::WARNING, settings.count),
        settings.target_language,
        Palette::paint(Palette::INFO, settings.cefr_level),
        settings.topic,
        settings.native_language
    );
    println!(
        "{}",
        Palette::dim(format!(
            "Using {} with the API key from the {}",
            config.model,
            config.api_key.source.description()
        ))
    );

    let report = generate::run(&client, &settings, &cli.output).await?;
    print_report(&report)
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn print_report(report: &GenerationReport) -> Result<()> {
    println!(
        "Saved {} to {}",
        Palette::paint(Palette::SUCCESS, pluralize("card", report.cards.len())),
        Palette::paint(Palette::ACCENT, report.output.display())
    );
    if report.skipped > 0 {
        println!(
            "{}",
            Palette::paint(
                Palette::WARNING,
                format!(
                    "Skipped {} without an expression",
                    pluralize("block", report.skipped)
                )
            )
        );
    }
    if report.cards.len() < report.requested {
        println!(
            "{}",
            Palette::dim(format!("{} were requested", report.requested))
        );
    }

    if let Some(first) = report.cards.first() {
        let example =
            serde_json::to_string_pretty(first).context("Failed to render example card")?;
        println!("Example card: {example}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["phrasecards", "--target-language", "Spanish"]).unwrap();
        assert_eq!(cli.native_language, "English");
        assert_eq!(cli.number, 10);
        assert_eq!(cli.topic, "general");
        assert_eq!(cli.output, PathBuf::from("anki_cards.csv"));
        assert_eq!(cli.cefr_level, CefrLevel::B1);
        assert_eq!(cli.model, "deepseek-chat");
        assert_eq!(cli.base_url, "https://api.deepseek.com");
        assert!(cli.api_key.is_none());
    }

    #[test]
    fn cefr_level_is_case_insensitive() {
        let cli = Cli::try_parse_from([
            "phrasecards",
            "--target-language",
            "French",
            "--cefr-level",
            "c2",
        ])
        .unwrap();
        assert_eq!(cli.cefr_level, CefrLevel::C2);
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(Cli::try_parse_from(["phrasecards"]).is_err());
        assert!(Cli::try_parse_from(["phrasecards", "--target-language", "  "]).is_err());
        assert!(
            Cli::try_parse_from(["phrasecards", "--target-language", "German", "--number", "0"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "phrasecards",
                "--target-language",
                "German",
                "--cefr-level",
                "D1"
            ])
            .is_err()
        );
    }
}
