pub mod client;
pub mod prompt;
pub mod response;
pub mod secrets;

pub use client::{ClientConfig, CompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::{GenerationSettings, SYSTEM_PROMPT, build_user_prompt};
pub use secrets::{API_KEY_ENV, ApiKey, ApiKeySource, resolve_api_key};
