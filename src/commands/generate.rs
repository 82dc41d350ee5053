use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::card::Card;
use crate::error::CardGenError;
use crate::export::write_cards_csv;
use crate::llm::{CompletionClient, GenerationSettings, SYSTEM_PROMPT, build_user_prompt};
use crate::parser::extract_cards;

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub cards: Vec<Card>,
    pub skipped: usize,
    pub requested: usize,
    pub output: PathBuf,
}

/// One full run: prompt the model, extract cards, write the CSV.
pub async fn run(
    client: &CompletionClient,
    settings: &GenerationSettings,
    output: &Path,
) -> Result<GenerationReport, CardGenError> {
    let user_prompt = build_user_prompt(settings);
    info!(endpoint = client.endpoint(), "requesting cards");
    let response = client
        .request_single_text_response(SYSTEM_PROMPT, &user_prompt)
        .await?;

    save_response(&response, settings, output)
}

/// Parses `response` and writes the cards. Nothing is written when parsing fails.
pub fn save_response(
    response: &str,
    settings: &GenerationSettings,
    output: &Path,
) -> Result<GenerationReport, CardGenError> {
    let extraction = extract_cards(response, settings.cefr_level)?;
    let mut cards = extraction.cards;

    if cards.len() > settings.count {
        warn!(
            received = cards.len(),
            requested = settings.count,
            "model returned extra cards, keeping the first ones"
        );
        cards.truncate(settings.count);
    } else if cards.len() < settings.count {
        warn!(
            received = cards.len(),
            requested = settings.count,
            "model returned fewer cards than requested"
        );
    }

    write_cards_csv(output, &cards)?;

    Ok(GenerationReport {
        cards,
        skipped: extraction.skipped,
        requested: settings.count,
        output: output.to_path_buf(),
    })
}
