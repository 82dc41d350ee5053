use std::fmt;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::{Serialize, Serializer};

static PRONUNCIATION_LOOKUP_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://forvo.com/search/").unwrap());
static CEFR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([abc][12])\b").unwrap());

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum CefrLevel {
    #[value(name = "A1")]
    A1,
    #[value(name = "A2")]
    A2,
    #[default]
    #[value(name = "B1")]
    B1,
    #[value(name = "B2")]
    B2,
    #[value(name = "C1")]
    C1,
    #[value(name = "C2")]
    C2,
}

impl CefrLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    /// Finds a level mentioned anywhere in `text`, e.g. "b2 (upper intermediate)".
    pub fn from_text(text: &str) -> Option<Self> {
        let caps = CEFR_RE.captures(text)?;
        match caps[1].to_ascii_uppercase().as_str() {
            "A1" => Some(CefrLevel::A1),
            "A2" => Some(CefrLevel::A2),
            "B1" => Some(CefrLevel::B1),
            "B2" => Some(CefrLevel::B2),
            "C1" => Some(CefrLevel::C1),
            "C2" => Some(CefrLevel::C2),
            _ => None,
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CefrLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Field values collected for one card before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFields {
    pub expression: String,
    pub context: String,
    pub translation: String,
    pub literal_translation: String,
    pub example_sentence: String,
    pub example_translation: String,
    pub notes: String,
    pub cefr_level: String,
}

/// One flashcard. Field order here is the CSV column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    expression: String,
    context: String,
    translation: String,
    literal_translation: Option<String>,
    example_sentence: String,
    example_translation: String,
    notes: String,
    cefr_level: CefrLevel,
    audio_url: String,
}

impl Card {
    /// Returns `None` when the draft has no expression. An expression without a
    /// single letter or digit ("...", "--") counts as missing.
    pub fn from_fields(fields: CardFields, default_level: CefrLevel) -> Option<Self> {
        let expression = clean_value(&fields.expression);
        if !expression.chars().any(char::is_alphanumeric) {
            return None;
        }

        let literal = clean_value(&fields.literal_translation);
        let literal_translation = if is_placeholder(&literal) {
            None
        } else {
            Some(literal)
        };

        let cefr_level = CefrLevel::from_text(&fields.cefr_level).unwrap_or(default_level);
        let audio_url = pronunciation_url(&expression);

        Some(Card {
            expression,
            context: clean_value(&fields.context),
            translation: clean_value(&fields.translation),
            literal_translation,
            example_sentence: clean_value(&fields.example_sentence),
            example_translation: clean_value(&fields.example_translation),
            notes: clean_value(&fields.notes),
            cefr_level,
            audio_url,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn literal_translation(&self) -> Option<&str> {
        self.literal_translation.as_deref()
    }

    pub fn example_sentence(&self) -> &str {
        &self.example_sentence
    }

    pub fn example_translation(&self) -> &str {
        &self.example_translation
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn cefr_level(&self) -> CefrLevel {
        self.cefr_level
    }

    pub fn audio_url(&self) -> &str {
        &self.audio_url
    }
}

/// Forvo search link for `expression`, percent-encoded as a single path segment.
/// `expression` must contain a letter or digit: bare `.` and `..` segments are
/// dropped by URL normalization.
fn pronunciation_url(expression: &str) -> String {
    let mut url = PRONUNCIATION_LOOKUP_BASE.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(expression).push("");
    }
    url.into()
}

fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

fn is_placeholder(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "" | "-" | "n/a" | "na" | "none" | "not applicable"
    )
}
