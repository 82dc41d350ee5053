use async_openai::{Client, config::OpenAIConfig};
use tracing::debug;

use crate::error::CardGenError;

use super::response::{chat_request, response_text, upstream_error};
use super::secrets::ApiKey;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub model: String,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Chat-completion client for DeepSeek's OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client<OpenAIConfig>,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &ClientConfig) -> Self {
        let api_base = api_base(&config.base_url);
        let openai_config = OpenAIConfig::new()
            .with_api_base(&api_base)
            .with_api_key(&config.api_key.key);

        Self {
            client: Client::with_config(openai_config),
            endpoint: format!("{api_base}/chat/completions"),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one system + user exchange and returns the model's text.
    pub async fn request_single_text_response(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CardGenError> {
        let request = chat_request(&self.model, system_prompt, user_prompt)
            .map_err(|err| CardGenError::Configuration(format!("invalid request: {err}")))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|err| upstream_error(&self.endpoint, err))?;
        debug!(choices = response.choices.len(), "completion received");

        match response_text(&response) {
            Some(text) => Ok(text.to_string()),
            None => Err(CardGenError::Parse(
                "the model returned no text output".to_string(),
            )),
        }
    }
}

fn api_base(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
