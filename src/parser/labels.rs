use once_cell::sync::Lazy;
use regex::Regex;

use crate::card::CardFields;

// "- **Translation (English):** hello" -> ("Translation (English)", "hello")
static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[-*•+]\s+)?(?:\*\*|__)?([A-Za-z][A-Za-z _\-/()]*?)\s*(?:\*\*|__)?\s*[:：]\s*(?:\*\*|__)?\s*(.*)$",
    )
    .unwrap()
});
static PARENTHETICAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    Expression,
    Context,
    Translation,
    LiteralTranslation,
    ExampleSentence,
    ExampleTranslation,
    Notes,
    Level,
}

impl FieldLabel {
    pub fn from_label(raw: &str) -> Option<Self> {
        let without_parens = PARENTHETICAL_RE.replace_all(raw, " ");
        let normalized = without_parens
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let label = match normalized.as_str() {
            "expression" | "phrase" | "word" | "term" => FieldLabel::Expression,
            "context" | "situation" | "usage context" => FieldLabel::Context,
            "translation" | "meaning" => FieldLabel::Translation,
            "literal translation" | "literal" | "literal meaning" => {
                FieldLabel::LiteralTranslation
            }
            "example sentence" | "example" | "usage" | "example usage" => {
                FieldLabel::ExampleSentence
            }
            "example translation"
            | "example sentence translation"
            | "translation of example"
            | "translation of the example" => FieldLabel::ExampleTranslation,
            "notes" | "note" | "cultural notes" | "cultural note" | "usage notes" => {
                FieldLabel::Notes
            }
            "cefr level" | "cefr" | "level" => FieldLabel::Level,
            _ => return None,
        };
        Some(label)
    }

    pub fn slot(self, fields: &mut CardFields) -> &mut String {
        match self {
            FieldLabel::Expression => &mut fields.expression,
            FieldLabel::Context => &mut fields.context,
            FieldLabel::Translation => &mut fields.translation,
            FieldLabel::LiteralTranslation => &mut fields.literal_translation,
            FieldLabel::ExampleSentence => &mut fields.example_sentence,
            FieldLabel::ExampleTranslation => &mut fields.example_translation,
            FieldLabel::Notes => &mut fields.notes,
            FieldLabel::Level => &mut fields.cefr_level,
        }
    }
}

/// Splits a "Label: value" line. Lines whose label is not a known field return `None`.
pub fn parse_field(line: &str) -> Option<(FieldLabel, &str)> {
    let caps = FIELD_RE.captures(line)?;
    let label = FieldLabel::from_label(caps.get(1)?.as_str())?;
    let value = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((label, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels() {
        assert_eq!(
            parse_field("Expression: ¿Qué onda?"),
            Some((FieldLabel::Expression, "¿Qué onda?"))
        );
        assert_eq!(
            parse_field("CEFR level: B1"),
            Some((FieldLabel::Level, "B1"))
        );
        assert_eq!(
            parse_field("Example translation: What's up, man?"),
            Some((FieldLabel::ExampleTranslation, "What's up, man?"))
        );
    }

    #[test]
    fn decorated_labels() {
        assert_eq!(
            parse_field("- **Expression:** hola"),
            Some((FieldLabel::Expression, "hola"))
        );
        assert_eq!(
            parse_field("**Literal translation**: to be in the clouds"),
            Some((FieldLabel::LiteralTranslation, "to be in the clouds"))
        );
        assert_eq!(
            parse_field("* Translation (English): hello"),
            Some((FieldLabel::Translation, "hello"))
        );
        assert_eq!(
            parse_field("example_sentence: Hola, ¿cómo estás?"),
            Some((FieldLabel::ExampleSentence, "Hola, ¿cómo estás?"))
        );
        assert_eq!(parse_field("Notes："), Some((FieldLabel::Notes, "")));
    }

    #[test]
    fn synonyms_from_json_style_keys() {
        assert_eq!(parse_field("Meaning: hi").map(|f| f.0), Some(FieldLabel::Translation));
        assert_eq!(parse_field("Usage: Hi!").map(|f| f.0), Some(FieldLabel::ExampleSentence));
        assert_eq!(parse_field("Literal: x").map(|f| f.0), Some(FieldLabel::LiteralTranslation));
    }

    #[test]
    fn value_keeps_later_colons() {
        assert_eq!(
            parse_field("Notes: Informal; compare: ¿Qué tal?"),
            Some((FieldLabel::Notes, "Informal; compare: ¿Qué tal?"))
        );
    }

    #[test]
    fn unknown_labels_and_prose_are_not_fields() {
        assert_eq!(parse_field("Note the difference: tú vs usted"), None);
        assert_eq!(parse_field("Here are your cards"), None);
        assert_eq!(parse_field("\"expression\": \"hola\","), None);
        assert_eq!(parse_field("10:30 in the morning"), None);
    }
}
