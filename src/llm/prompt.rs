use crate::card::CefrLevel;

/// Parameters of one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationSettings {
    pub target_language: String,
    pub native_language: String,
    pub topic: String,
    pub count: usize,
    pub cefr_level: CefrLevel,
}

impl GenerationSettings {
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            native_language: "English".to_string(),
            topic: "general".to_string(),
            count: 10,
            cefr_level: CefrLevel::default(),
        }
    }
}

pub const SYSTEM_PROMPT: &str = r#"
You are an expert linguist and language teacher specializing in creating high-quality language learning materials.
You have deep knowledge of the Common European Framework of Reference for Languages (CEFR) levels and can accurately
create language content appropriate for each level.

You write one block per expression. Blocks are numbered and separated by a blank line.
Every line inside a block starts with its field label followed by a colon. Do not add any other text.

Example block:

1.
Expression: Expression in target language
Context: When/where this is used
Translation: Meaning in the native language
Literal translation: Word-for-word translation (idioms only, otherwise omit this line)
Example sentence: Example sentence in the target language
Example translation: Translation of the example sentence
Notes: Cultural context, formality or grammar notes
CEFR level: CEFR level
"#;

pub fn build_user_prompt(settings: &GenerationSettings) -> String {
    let GenerationSettings {
        target_language,
        native_language,
        topic,
        count,
        cefr_level,
    } = settings;

    format!(
        "Create {count} useful, everyday expressions in {target_language} related to {topic} at CEFR level {cefr_level}.\n\
         \n\
         Write exactly {count} numbered blocks. Each block must have these labeled lines:\n\
         - Expression: The expression in {target_language}\n\
         - Context: When/where this expression is typically used\n\
         - Translation: Translation or meaning in {native_language}\n\
         - Literal translation: Word-for-word translation in {native_language} if it's an idiom (omit otherwise)\n\
         - Example sentence: An example sentence in {target_language} using this expression\n\
         - Example translation: Translation of the example sentence in {native_language}\n\
         - Notes: Any cultural context, formality level, or grammar notes\n\
         - CEFR level: The CEFR level of this expression (should match requested level: {cefr_level})\n\
         \n\
         Make sure the expressions are:\n\
         - Appropriate for CEFR level {cefr_level} learners of {target_language}\n\
         - Commonly used by native speakers\n\
         - Useful for everyday conversation\n\
         - Varied in formality levels\n\
         - Include some idioms and colloquial phrases if appropriate for the level"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let settings = GenerationSettings::new("Spanish");
        assert_eq!(settings.native_language, "English");
        assert_eq!(settings.topic, "general");
        assert_eq!(settings.count, 10);
        assert_eq!(settings.cefr_level, CefrLevel::B1);
    }

    #[test]
    fn user_prompt_carries_every_parameter() {
        let settings = GenerationSettings {
            target_language: "Japanese".into(),
            native_language: "German".into(),
            topic: "food".into(),
            count: 7,
            cefr_level: CefrLevel::A2,
        };
        let prompt = build_user_prompt(&settings);

        assert!(prompt.contains("Create 7 useful, everyday expressions in Japanese"));
        assert!(prompt.contains("related to food at CEFR level A2"));
        assert!(prompt.contains("Write exactly 7 numbered blocks"));
        assert!(prompt.contains("Translation or meaning in German"));
        assert!(prompt.contains("should match requested level: A2"));
    }

    #[test]
    fn prompts_name_every_field_label() {
        let prompt = build_user_prompt(&GenerationSettings::new("French"));
        for label in [
            "Expression:",
            "Context:",
            "Translation:",
            "Literal translation:",
            "Example sentence:",
            "Example translation:",
            "Notes:",
            "CEFR level:",
        ] {
            assert!(prompt.contains(label), "user prompt is missing {label}");
            assert!(SYSTEM_PROMPT.contains(label), "system prompt is missing {label}");
        }
    }
}
