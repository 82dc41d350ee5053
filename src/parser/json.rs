use serde_json::{Map, Value};
use tracing::debug;

use crate::card::CardFields;

/// Reads cards from a JSON document, if the model answered with one.
///
/// Returns `None` when `text` is not JSON or holds no card array, so the caller
/// can fall back to labeled blocks.
pub fn drafts_from_json(text: &str) -> Option<Vec<CardFields>> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            debug!(%err, "response looks like JSON but does not parse");
            return None;
        }
    };

    let items = card_array(&value)?;
    Some(
        items
            .iter()
            .map(|item| match item.as_object() {
                Some(object) => fields_from_object(object),
                None => CardFields::default(),
            })
            .collect(),
    )
}

fn card_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("cards") {
                return Some(items);
            }
            map.values().find_map(|entry| match entry {
                Value::Array(items) if starts_with_card(items) => Some(items),
                _ => None,
            })
        }
        _ => None,
    }
}

fn starts_with_card(items: &[Value]) -> bool {
    items
        .first()
        .and_then(Value::as_object)
        .is_some_and(|object| object.contains_key("expression"))
}

fn fields_from_object(object: &Map<String, Value>) -> CardFields {
    let text = |key: &str| object.get(key).map(value_text).unwrap_or_default();
    let first_of = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| object.get(*key).map(value_text))
            .unwrap_or_default()
    };

    // meaning/literal/usage with `translation` as the example's translation
    let short_keys = ["meaning", "literal", "usage"]
        .iter()
        .any(|key| object.contains_key(*key));

    if short_keys {
        CardFields {
            expression: text("expression"),
            context: text("context"),
            translation: text("meaning"),
            literal_translation: text("literal"),
            example_sentence: text("usage"),
            example_translation: text("translation"),
            notes: text("notes"),
            cefr_level: first_of(&["cefr_level", "level"]),
        }
    } else {
        CardFields {
            expression: text("expression"),
            context: text("context"),
            translation: text("translation"),
            literal_translation: text("literal_translation"),
            example_sentence: first_of(&["example_sentence", "example"]),
            example_translation: text("example_translation"),
            notes: text("notes"),
            cefr_level: first_of(&["cefr_level", "level"]),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
