pub mod blocks;
pub mod json;
pub mod labels;

use tracing::warn;

use crate::card::{Card, CardFields, CefrLevel};
use crate::error::CardGenError;
use crate::utils::{pluralize, strip_code_fence};

pub use blocks::{RawBlock, split_blocks};
pub use json::drafts_from_json;
pub use labels::{FieldLabel, parse_field};

#[derive(Debug, Clone)]
pub struct Extraction {
    pub cards: Vec<Card>,
    /// Recognizable blocks that had no expression.
    pub skipped: usize,
}

/// Turns raw model output into cards, in response order.
///
/// Fails only when nothing usable came back; individual bad blocks are skipped
/// with a warning.
pub fn extract_cards(text: &str, default_level: CefrLevel) -> Result<Extraction, CardGenError> {
    let drafts: Vec<CardFields> = match drafts_from_json(strip_code_fence(text)) {
        Some(drafts) => drafts,
        None => split_blocks(text)
            .into_iter()
            .map(RawBlock::into_fields)
            .collect(),
    };

    if drafts.is_empty() {
        return Err(CardGenError::Parse(
            "the response contained no recognizable card blocks".to_string(),
        ));
    }

    let total = drafts.len();
    let mut cards = Vec::with_capacity(total);
    let mut skipped = 0;
    for (idx, draft) in drafts.into_iter().enumerate() {
        match Card::from_fields(draft, default_level) {
            Some(card) => cards.push(card),
            None => {
                skipped += 1;
                warn!(block = idx + 1, "skipping block without an expression");
            }
        }
    }

    if cards.is_empty() {
        return Err(CardGenError::Parse(format!(
            "none of the {} in the response had an expression",
            pluralize("block", total)
        )));
    }

    Ok(Extraction { cards, skipped })
}
